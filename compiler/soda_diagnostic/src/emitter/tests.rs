use pretty_assertions::assert_eq;
use soda_ir::Span;

use super::*;
use crate::ErrorCode;

const SOURCE: &str = "int x;\nint x;\ny = 1;\n";

#[test]
fn test_render_primary_and_secondary() {
    let diag = Diagnostic::error(ErrorCode::E3001)
        .with_message("multiple definitions of 'x'")
        .with_label(Span::new(11, 12), "redefined here")
        .with_secondary_label(Span::new(4, 5), "first defined here");

    assert_eq!(
        render(&[diag], SOURCE),
        "error[E3001]: multiple definitions of 'x'\n\
         \x20 --> 2:5: redefined here\n\
         \x20 ... 1:5: first defined here\n"
    );
}

#[test]
fn test_render_notes_and_empty_label() {
    let diag = Diagnostic::error(ErrorCode::E3002)
        .with_message("undefined symbol 'y'")
        .with_label(Span::new(14, 15), "")
        .with_note("names must be declared before use");

    assert_eq!(
        render(&[diag], SOURCE),
        "error[E3002]: undefined symbol 'y'\n\
         \x20 --> 3:1\n\
         \x20 = note: names must be declared before use\n"
    );
}

#[test]
fn test_summary() {
    let mut emitter = TerminalEmitter::new(Vec::new(), SOURCE, false);
    emitter.emit_summary(1, 2);
    emitter.emit_summary(0, 0);
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert_eq!(out, "1 error, 2 warnings emitted\n");
}

#[test]
fn test_colors_wrap_severity() {
    let mut emitter = TerminalEmitter::new(Vec::new(), SOURCE, true);
    emitter.emit(&Diagnostic::error(ErrorCode::E3003).with_message("boom"));
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert!(out.starts_with("\x1b[1;31merror\x1b[0m[E3003]: boom"));
}
