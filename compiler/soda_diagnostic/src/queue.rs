//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! A pass reports into the queue as it walks; the driver flushes once the
//! pass is done and gets the diagnostics back in source order.

use soda_ir::Span;

use crate::{Diagnostic, DiagnosticSink};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued at the same span.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// build_scopes(&mut ast, root, &mut scopes, &mut queue);
/// for diag in queue.flush() { ... }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Count of kept errors (not warnings).
    error_count: usize,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Queue a diagnostic. Returns `false` if it was filtered out.
    pub fn add(&mut self, diagnostic: Diagnostic) -> bool {
        if diagnostic.is_error() && self.limit_reached() {
            return false;
        }
        if self.config.deduplicate && self.diagnostics.contains(&diagnostic) {
            return false;
        }
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Whether further errors will be dropped.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take every queued diagnostic, sorted by primary span.
    ///
    /// Diagnostics without a primary label sort last. The sort is stable,
    /// so diagnostics at the same position keep their report order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| sort_key(d.primary_span()));
        self.error_count = 0;
        out
    }
}

fn sort_key(span: Option<Span>) -> (bool, u32, u32) {
    match span {
        Some(span) => (false, span.start, span.end),
        None => (true, 0, 0),
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}
