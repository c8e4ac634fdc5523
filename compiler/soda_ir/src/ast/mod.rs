//! Syntax tree node kinds.
//!
//! The tree is a closed sum type: every node is a [`Node`] whose
//! [`NodeKind`] names its children by [`NodeId`] (or by [`NodeRange`] for
//! variable-length lists stored in the arena). Passes dispatch with an
//! exhaustive `match` over `NodeKind` rather than a visitor class
//! hierarchy.
//!
//! Three fields on [`Node`] are written after parsing by the scope pass:
//! `parent`, `owner_scope` and `scope`. Everything else is fixed once the
//! parser allocates the node.

mod operators;

use std::fmt;

pub use operators::{BinaryOp, UnaryOp};

use crate::{Name, NodeId, NodeRange, ScopeId, Span};

/// A syntax tree node plus the linkage the scope pass annotates it with.
#[derive(Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// Syntactic parent; `None` for the module root.
    pub parent: Option<NodeId>,
    /// Nearest enclosing scope. For a scope-introducing node this is the
    /// scope its own scope is nested in.
    pub owner_scope: Option<ScopeId>,
    /// The scope this node introduces, for scope-introducing kinds.
    pub scope: Option<ScopeId>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            parent: None,
            owner_scope: None,
            scope: None,
        }
    }

    /// Whether the scope pass has linked this node yet.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.owner_scope.is_some()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// All node kinds of the Soda syntax tree.
///
/// Floats are stored as their bit pattern so the enum stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    // Literals
    Nil,
    Bool(bool),
    Int(i64),
    Float(u64),
    Char(char),
    String(Name),

    // Expressions
    /// A plain or dotted (`N.S.v`) name reference.
    Identifier {
        name: Name,
    },
    /// A reference to a type by (possibly dotted) name.
    TypeRef {
        name: Name,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Cast {
        ty: NodeId,
        expr: NodeId,
    },
    IfExpr {
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    },
    /// Anonymous function; introduces a scope for its parameters.
    FuncExpr {
        params: NodeRange,
        ret: Option<NodeId>,
        body: NodeId,
    },
    CallExpr {
        callee: NodeId,
        args: NodeRange,
    },
    IndexExpr {
        target: NodeId,
        index: NodeId,
    },
    /// `target.member`; the member is resolved against the target's type
    /// later, never against lexical scope.
    MemberExpr {
        target: NodeId,
        member: Name,
    },

    // Statements
    EmptyStmt,
    CommentStmt {
        text: Name,
    },
    ExprStmt {
        expr: NodeId,
    },
    BlockStmt {
        stmts: NodeRange,
    },
    ReturnStmt {
        value: Option<NodeId>,
    },
    BreakStmt,
    ContinueStmt,
    GotoStmt {
        label: Name,
    },
    IfStmt {
        cond: NodeId,
        then_stmt: NodeId,
        else_stmt: Option<NodeId>,
    },
    /// `case expr:` or `default:` when `expr` is `None`.
    CaseStmt {
        expr: Option<NodeId>,
        stmts: NodeRange,
    },
    SwitchStmt {
        expr: NodeId,
        cases: NodeRange,
    },
    ForStmt {
        init: Option<NodeId>,
        cond: Option<NodeId>,
        step: Option<NodeId>,
        body: NodeId,
    },
    DoStmt {
        body: NodeId,
        cond: NodeId,
    },
    WhileStmt {
        cond: NodeId,
        body: NodeId,
    },
    CatchStmt {
        param: Option<NodeId>,
        body: NodeId,
    },
    FinallyStmt {
        body: NodeId,
    },
    TryStmt {
        body: NodeId,
        catches: NodeRange,
        finally: Option<NodeId>,
    },

    // Declarations
    EmptyDecl,
    CommentDecl {
        text: Name,
    },
    LabelDecl {
        name: Name,
    },
    /// `using N.M;` brings a namespace into view. Not a binding.
    UsingDecl {
        path: Name,
    },
    Typedef {
        name: Name,
        ty: NodeId,
    },
    NamespaceDecl {
        name: Name,
        decls: NodeRange,
    },
    VarDecl {
        name: Name,
        ty: Option<NodeId>,
        init: Option<NodeId>,
    },
    ParamDecl {
        name: Name,
        ty: Option<NodeId>,
        default: Option<NodeId>,
    },
    FuncDecl {
        name: Name,
        params: NodeRange,
        ret: Option<NodeId>,
        body: Option<NodeId>,
    },
    DelegateDecl {
        name: Name,
        params: NodeRange,
        ret: Option<NodeId>,
    },
    ConstructorDecl {
        name: Name,
        params: NodeRange,
        body: Option<NodeId>,
    },
    DestructorDecl {
        name: Name,
        body: Option<NodeId>,
    },
    StructDecl {
        name: Name,
        members: NodeRange,
    },
    EnumeratorDecl {
        name: Name,
        value: Option<NodeId>,
    },
    EnumDecl {
        name: Name,
        base: Option<NodeId>,
        enumerators: NodeRange,
    },

    /// Root of one compiled file.
    Module {
        name: Name,
        decls: NodeRange,
    },
}

impl NodeKind {
    /// Whether nodes of this kind own a scope for their descendants.
    pub const fn introduces_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::BlockStmt { .. }
                | NodeKind::FuncExpr { .. }
                | NodeKind::IfStmt { .. }
                | NodeKind::CaseStmt { .. }
                | NodeKind::SwitchStmt { .. }
                | NodeKind::ForStmt { .. }
                | NodeKind::CatchStmt { .. }
                | NodeKind::NamespaceDecl { .. }
                | NodeKind::FuncDecl { .. }
                | NodeKind::DelegateDecl { .. }
                | NodeKind::ConstructorDecl { .. }
                | NodeKind::DestructorDecl { .. }
                | NodeKind::StructDecl { .. }
                | NodeKind::EnumDecl { .. }
        )
    }

    /// The name a declaration binds in its enclosing scope.
    ///
    /// `None` for non-binding kinds, including `UsingDecl` and `Module`.
    pub const fn declared_name(&self) -> Option<Name> {
        match self {
            NodeKind::LabelDecl { name }
            | NodeKind::Typedef { name, .. }
            | NodeKind::NamespaceDecl { name, .. }
            | NodeKind::VarDecl { name, .. }
            | NodeKind::ParamDecl { name, .. }
            | NodeKind::FuncDecl { name, .. }
            | NodeKind::DelegateDecl { name, .. }
            | NodeKind::ConstructorDecl { name, .. }
            | NodeKind::DestructorDecl { name, .. }
            | NodeKind::StructDecl { name, .. }
            | NodeKind::EnumeratorDecl { name, .. }
            | NodeKind::EnumDecl { name, .. } => Some(*name),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_declaration(&self) -> bool {
        self.declared_name().is_some()
    }

    /// Short human-readable kind name, used in traces and assertion messages.
    pub const fn describe(&self) -> &'static str {
        match self {
            NodeKind::Nil => "nil literal",
            NodeKind::Bool(_) => "bool literal",
            NodeKind::Int(_) => "int literal",
            NodeKind::Float(_) => "float literal",
            NodeKind::Char(_) => "char literal",
            NodeKind::String(_) => "string literal",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::TypeRef { .. } => "type reference",
            NodeKind::Unary { .. } => "unary expression",
            NodeKind::Binary { .. } => "binary expression",
            NodeKind::Cast { .. } => "cast",
            NodeKind::IfExpr { .. } => "if expression",
            NodeKind::FuncExpr { .. } => "function expression",
            NodeKind::CallExpr { .. } => "call",
            NodeKind::IndexExpr { .. } => "index expression",
            NodeKind::MemberExpr { .. } => "member access",
            NodeKind::EmptyStmt => "empty statement",
            NodeKind::CommentStmt { .. } | NodeKind::CommentDecl { .. } => "comment",
            NodeKind::ExprStmt { .. } => "expression statement",
            NodeKind::BlockStmt { .. } => "block",
            NodeKind::ReturnStmt { .. } => "return",
            NodeKind::BreakStmt => "break",
            NodeKind::ContinueStmt => "continue",
            NodeKind::GotoStmt { .. } => "goto",
            NodeKind::IfStmt { .. } => "if statement",
            NodeKind::CaseStmt { .. } => "case",
            NodeKind::SwitchStmt { .. } => "switch",
            NodeKind::ForStmt { .. } => "for loop",
            NodeKind::DoStmt { .. } => "do loop",
            NodeKind::WhileStmt { .. } => "while loop",
            NodeKind::CatchStmt { .. } => "catch",
            NodeKind::FinallyStmt { .. } => "finally",
            NodeKind::TryStmt { .. } => "try",
            NodeKind::EmptyDecl => "empty declaration",
            NodeKind::LabelDecl { .. } => "label",
            NodeKind::UsingDecl { .. } => "using declaration",
            NodeKind::Typedef { .. } => "typedef",
            NodeKind::NamespaceDecl { .. } => "namespace",
            NodeKind::VarDecl { .. } => "variable",
            NodeKind::ParamDecl { .. } => "parameter",
            NodeKind::FuncDecl { .. } => "function",
            NodeKind::DelegateDecl { .. } => "delegate",
            NodeKind::ConstructorDecl { .. } => "constructor",
            NodeKind::DestructorDecl { .. } => "destructor",
            NodeKind::StructDecl { .. } => "struct",
            NodeKind::EnumeratorDecl { .. } => "enumerator",
            NodeKind::EnumDecl { .. } => "enum",
            NodeKind::Module { .. } => "module",
        }
    }
}
