//! The error-reporting collaborator.

use crate::Diagnostic;

/// Destination for diagnostics produced by a pass.
///
/// Passes only ever push into a sink; whether a diagnostic is rendered,
/// deduplicated, or dropped past a limit is the sink's business and does
/// not change what the pass counts.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}
