//! Warning Dispatcher Implementation

use attention::{AttentionWarning, WarningKind};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};
use crate::sink::WarningSink;

/// Fire history of one warning (kind + direction)
#[derive(Debug, Clone)]
pub struct WarningRecord {
    /// Last time this warning was fired
    pub last_fired: Instant,
    /// Number of times fired
    pub fire_count: usize,
}

/// Fans warnings out to sinks and keeps fire statistics
///
/// Every warning is forwarded; there is no cooldown or throttling.
pub struct WarningDispatcher {
    sinks: Vec<Box<dyn WarningSink>>,
    records: HashMap<AttentionWarning, WarningRecord>,
    total_fired: usize,
}

impl WarningDispatcher {
    /// Create a dispatcher with no sinks
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            records: HashMap::new(),
            total_fired: 0,
        }
    }

    /// Builder-style sink registration
    pub fn with_sink(mut self, sink: impl WarningSink + 'static) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn add_sink(&mut self, sink: impl WarningSink + 'static) {
        info!("Registered warning sink: {}", sink.name());
        self.sinks.push(Box::new(sink));
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Record and forward warnings to every sink
    ///
    /// Returns the number of successful deliveries. Failed deliveries are
    /// logged and dropped.
    pub fn dispatch(&mut self, warnings: &[AttentionWarning]) -> usize {
        let mut delivered = 0;
        for warning in warnings {
            self.record_fire(warning);
            for sink in self.sinks.iter_mut() {
                match sink.deliver(warning) {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!("Warning delivery to {} failed: {}", sink.name(), e),
                }
            }
        }
        delivered
    }

    fn record_fire(&mut self, warning: &AttentionWarning) {
        self.total_fired += 1;

        let record = self.records.entry(*warning).or_insert(WarningRecord {
            last_fired: Instant::now(),
            fire_count: 0,
        });
        record.last_fired = Instant::now();
        record.fire_count += 1;

        debug!(
            "Warning recorded: {} {} (count: {})",
            warning.kind.as_str(),
            warning.direction,
            record.fire_count
        );
    }

    /// History for one warning, if it has fired
    pub fn record(&self, warning: &AttentionWarning) -> Option<&WarningRecord> {
        self.records.get(warning)
    }

    pub fn fire_count(&self, warning: &AttentionWarning) -> usize {
        self.records.get(warning).map_or(0, |r| r.fire_count)
    }

    /// Total fires of one warning kind across all directions
    pub fn count_by_kind(&self, kind: WarningKind) -> usize {
        self.records
            .iter()
            .filter(|(w, _)| w.kind == kind)
            .map(|(_, r)| r.fire_count)
            .sum()
    }

    pub fn total_fired(&self) -> usize {
        self.total_fired
    }

    /// Clear fire statistics (sinks stay registered)
    pub fn clear(&mut self) {
        self.records.clear();
        self.total_fired = 0;
    }
}

impl Default for WarningDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
