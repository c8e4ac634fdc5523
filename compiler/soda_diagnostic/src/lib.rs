//! Diagnostic system for compiler error reporting.
//!
//! Every pass reports user-facing problems as a [`Diagnostic`]: an error
//! code, a message, and a labelled span pointing at the offending node.
//! Passes hand diagnostics to a [`DiagnosticSink`] and never inspect how
//! or where they are rendered.
//!
//! Messages are written as `%` templates (see [`format_template`]) so a
//! pass can report `"undefined symbol '%'"` with the name substituted.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;
mod sink;
pub mod span_utils;
mod template;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
pub use sink::DiagnosticSink;
pub use template::format_template;
