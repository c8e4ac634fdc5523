//! Human-readable diagnostic output.
//!
//! ```text
//! error[E3002]: undefined symbol 'y'
//!   --> 3:5: not found in this scope
//!   = note: ...
//! ```

use std::io::{self, Write};

use crate::{span_utils, Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);

    fn flush(&mut self);
}

/// Terminal emitter with optional color support.
///
/// Label positions are printed as `line:col` against `source`.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    source: &'src str,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn new(writer: W, source: &'src str, colors: bool) -> Self {
        TerminalEmitter {
            writer,
            source,
            colors,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }
}

impl<'src> TerminalEmitter<'src, io::Stderr> {
    pub fn stderr(source: &'src str, colors: bool) -> Self {
        TerminalEmitter::new(io::stderr(), source, colors)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        let _ = writeln!(self.writer, "[{}]: {}", diagnostic.code, diagnostic.message);

        for label in &diagnostic.labels {
            let (line, col) = span_utils::offset_to_line_col(self.source, label.span.start);
            let arrow = if label.is_primary { "-->" } else { "..." };
            if label.is_primary {
                let _ = write!(self.writer, "  {arrow} ");
            } else {
                let _ = write!(self.writer, "  ");
                self.write_colored(arrow, colors::SECONDARY);
                let _ = write!(self.writer, " ");
            }
            if label.message.is_empty() {
                let _ = writeln!(self.writer, "{line}:{col}");
            } else {
                let _ = writeln!(self.writer, "{line}:{col}: {}", label.message);
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let mut parts = Vec::new();
        if error_count > 0 {
            parts.push(format!("{error_count} error{}", plural_s(error_count)));
        }
        if warning_count > 0 {
            parts.push(format!("{warning_count} warning{}", plural_s(warning_count)));
        }
        let _ = writeln!(self.writer, "{} emitted", parts.join(", "));
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Render diagnostics to a string without colors.
pub fn render(diagnostics: &[Diagnostic], source: &str) -> String {
    let mut emitter = TerminalEmitter::new(Vec::new(), source, false);
    emitter.emit_all(diagnostics);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[cfg(test)]
mod tests;
