use tutorbook_ports::outbound::DiagnosticSink;
use tutorbook_ports::types::{Diagnostic, DiagnosticLevel};

/// Forwards service diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Warning => {
                tracing::warn!(operation = diagnostic.operation, "{}", diagnostic.message)
            }
            DiagnosticLevel::Error => {
                tracing::error!(operation = diagnostic.operation, "{}", diagnostic.message)
            }
        }
    }
}
