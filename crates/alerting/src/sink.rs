//! Warning sinks

use attention::AttentionWarning;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use crate::AlertError;

/// Receives warnings from the dispatcher
///
/// Delivery is fire-and-forget: a sink must not block, and the dispatcher
/// only logs a failed delivery.
pub trait WarningSink: Send {
    fn name(&self) -> &str;

    fn deliver(&mut self, warning: &AttentionWarning) -> Result<(), AlertError>;
}

/// Writes each warning to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn deliver(&mut self, warning: &AttentionWarning) -> Result<(), AlertError> {
        warn!(
            kind = warning.kind.as_str(),
            direction = warning.direction.as_str(),
            "Warning: {}",
            warning.message()
        );
        Ok(())
    }
}

/// Keeps every delivered warning in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    warnings: Vec<AttentionWarning>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[AttentionWarning] {
        &self.warnings
    }

    pub fn take(&mut self) -> Vec<AttentionWarning> {
        std::mem::take(&mut self.warnings)
    }
}

impl WarningSink for CollectingSink {
    fn name(&self) -> &str {
        "collect"
    }

    fn deliver(&mut self, warning: &AttentionWarning) -> Result<(), AlertError> {
        self.warnings.push(*warning);
        Ok(())
    }
}

/// Forwards warnings to an async consumer over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<AttentionWarning>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<AttentionWarning>) -> Self {
        Self { tx }
    }
}

impl WarningSink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    fn deliver(&mut self, warning: &AttentionWarning) -> Result<(), AlertError> {
        self.tx
            .send(*warning)
            .map_err(|_| AlertError::SinkClosed("channel".into()))
    }
}
