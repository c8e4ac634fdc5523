//! Symbols: what a name is bound to.

use soda_ir::{NodeId, NodeKind};
use std::fmt;

/// What kind of declaration a symbol was introduced by.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    /// Seeded by the driver; no declaration node.
    Builtin,
    Typedef,
    /// A using-alias seeded by the driver.
    Using,
    Function,
    Delegate,
    Variable,
    Namespace,
    Struct,
    Enumerator,
    Enum,
    /// A `goto` target.
    Label,
}

impl SymbolKind {
    /// Kinds whose scope is searched by later segments of a dotted name.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            SymbolKind::Namespace | SymbolKind::Struct | SymbolKind::Enum
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Builtin => "builtin",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Using => "using",
            SymbolKind::Function => "function",
            SymbolKind::Delegate => "delegate",
            SymbolKind::Variable => "variable",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Struct => "struct",
            SymbolKind::Enumerator => "enumerator",
            SymbolKind::Enum => "enum",
            SymbolKind::Label => "label",
        }
    }

    /// The kind of symbol a declaration node binds, if it binds one.
    pub const fn of(kind: &NodeKind) -> Option<SymbolKind> {
        Some(match kind {
            NodeKind::Typedef { .. } => SymbolKind::Typedef,
            NodeKind::LabelDecl { .. } => SymbolKind::Label,
            NodeKind::NamespaceDecl { .. } => SymbolKind::Namespace,
            NodeKind::VarDecl { .. } | NodeKind::ParamDecl { .. } => SymbolKind::Variable,
            NodeKind::FuncDecl { .. }
            | NodeKind::ConstructorDecl { .. }
            | NodeKind::DestructorDecl { .. } => SymbolKind::Function,
            NodeKind::DelegateDecl { .. } => SymbolKind::Delegate,
            NodeKind::StructDecl { .. } => SymbolKind::Struct,
            NodeKind::EnumeratorDecl { .. } => SymbolKind::Enumerator,
            NodeKind::EnumDecl { .. } => SymbolKind::Enum,
            _ => return None,
        })
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name binding. Immutable once defined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// The declaring node; `None` only for driver-seeded symbols.
    pub decl: Option<NodeId>,
}

impl Symbol {
    pub const fn new(kind: SymbolKind, decl: NodeId) -> Self {
        Symbol {
            kind,
            decl: Some(decl),
        }
    }

    pub const fn builtin() -> Self {
        Symbol {
            kind: SymbolKind::Builtin,
            decl: None,
        }
    }

    #[inline]
    pub const fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}
