//! Diagnostics Port
//!
//! Resolvers report conditions that do not abort the pipeline (skipped
//! definitions, unresolved optional references, deprecated argument keys,
//! auto-registrations) through this port.

/// Receiver of non-fatal resolver messages
pub trait DiagnosticsSink: Send + Sync {
    /// Record `message` emitted by the resolver named `pass`
    fn log(&self, pass: &str, message: &str);
}
