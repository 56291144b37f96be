//! Alerting System
//!
//! Delivers attention warnings to notification collaborators and keeps
//! per-warning fire statistics.

mod dispatcher;
mod sink;

pub use dispatcher::{WarningDispatcher, WarningRecord};
pub use sink::{ChannelSink, CollectingSink, LogSink, WarningSink};

use thiserror::Error;

/// Alerting error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    #[error("Sink closed: {0}")]
    SinkClosed(String),
}
