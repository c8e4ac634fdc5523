//! Scope building and name resolution for Soda.
//!
//! Runs once per module, after parsing:
//!
//! 1. [`build_scopes`] walks the tree once, links every node to its parent
//!    and owning scope, allocates a scope for each scope-introducing node
//!    in a [`ScopeTree`], and registers every declaration in the scope that
//!    owns it.
//! 2. [`resolve_references`] walks the linked tree again and binds each
//!    identifier, type reference and `goto` label to a [`Symbol`].
//!
//! Both passes report problems through a
//! [`DiagnosticSink`](soda_diagnostic::DiagnosticSink) and return an error
//! count; neither stops early.
//!
//! # Qualified names
//!
//! A dotted name `N.S.v` resolves its first segment by walking up the
//! scope chain, then each further segment strictly inside the scope of the
//! namespace, struct or enum the previous segment named. Resolution stops
//! at the first segment that names anything else and returns that symbol.

mod builder;
mod engine;
mod qualified;
mod references;
mod scope;
mod symbol;

pub use builder::{build_scopes, ScopeBuilder};
pub use engine::Resolver;
pub use qualified::{EmptySymbol, QualifiedName};
pub use references::{resolve_references, Resolutions};
pub use scope::{AlreadyDefined, ScopeTree, SymbolTable, DEFAULT_BUILTINS};
pub use symbol::{Symbol, SymbolKind};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
