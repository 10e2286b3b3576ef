//! Reporting channels for findings.

use std::sync::Mutex;

use lapse_core::diagnostics::Finding;

/// Where a rule sends its findings. Implementations must tolerate
/// concurrent `report` calls.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, finding: Finding);
}

impl DiagnosticSink for crossbeam_channel::Sender<Finding> {
    fn report(&self, finding: Finding) {
        // The receiver only disappears once the run is over.
        let _ = self.send(finding);
    }
}

/// Sink that keeps every finding in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Mutex<Vec<Finding>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the collected findings.
    pub fn take(&self) -> Vec<Finding> {
        match self.findings.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, finding: Finding) {
        match self.findings.lock() {
            Ok(mut guard) => guard.push(finding),
            Err(poisoned) => poisoned.into_inner().push(finding),
        }
    }
}
