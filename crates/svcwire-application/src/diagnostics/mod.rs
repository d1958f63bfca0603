//! In-memory diagnostics
//!
//! [`CollectedDiagnostics`] keeps every non-fatal message a resolver reports,
//! in emission order, for inspection after a pipeline run.

use std::sync::{Mutex, PoisonError};

use svcwire_domain::ports::DiagnosticsSink;

/// A non-fatal message reported by a resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the reporting resolver
    pub pass: String,
    /// Human-readable message
    pub message: String,
}

/// Diagnostics sink that stores every message
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectedDiagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic reported so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages reported so far, without their pass names
    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|diagnostic| diagnostic.message)
            .collect()
    }

    /// Whether some message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|diagnostic| diagnostic.message.contains(needle))
    }

    /// Number of diagnostics reported so far
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticsSink for CollectedDiagnostics {
    fn log(&self, pass: &str, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                pass: pass.to_string(),
                message: message.to_string(),
            });
    }
}
