//! Tracing-backed diagnostics sink

use svcwire_domain::ports::DiagnosticsSink;
use tracing::warn;

/// Forwards resolver diagnostics to `tracing` as warnings
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// Create the sink
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for TracingDiagnostics {
    fn log(&self, pass: &str, message: &str) {
        warn!(pass = %pass, "{message}");
    }
}
