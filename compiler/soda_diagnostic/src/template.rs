//! `%` message templates.
//!
//! Passes report errors as a template plus arguments:
//! `"multiple definitions of '%'"` with the declared name. Each `%` takes
//! the next argument in order. `%%` writes a literal `%`. A `%` with no
//! argument left is written as-is, and surplus arguments are ignored, so a
//! mismatched call still produces a readable message instead of failing.

use std::fmt::{self, Write};

/// Substitute `args` into the `%` placeholders of `template`.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }
        match args.next() {
            Some(arg) => {
                let _ = write!(out, "{arg}");
            }
            None => out.push('%'),
        }
    }

    out
}
