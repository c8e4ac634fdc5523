//! The scope-building pass.
//!
//! One depth-first walk over a module that, for every node:
//! - records its syntactic parent and owning scope,
//! - gives scope-introducing nodes their own scope in the [`ScopeTree`],
//! - registers declarations in the scope that owns them.
//!
//! A declaration is registered before its children are walked, so a
//! variable's initializer or a function's body can refer to the name being
//! declared. Declarations that also introduce a scope are registered in
//! the enclosing scope, then open their own.
//!
//! A `case` selector is evaluated in the enclosing scope: it is walked
//! after the case node is linked but before the case opens its scope.

use soda_diagnostic::DiagnosticSink;
use soda_ir::visitor::{children, Children};
use soda_ir::{Ast, NodeId, NodeKind};
use soda_stack::ensure_sufficient_stack;

use crate::{Resolver, ScopeTree};

/// How the pass treats a node kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Shape {
    /// Link and recurse.
    Basic,
    /// Link, open a scope, recurse.
    Scoped,
    /// A `case`: selector outside the case scope, body inside.
    Case,
    /// Define in the current scope, link, recurse.
    Declares,
    /// Define in the enclosing scope, link, open a scope, recurse.
    DeclaresScoped,
}

fn shape(kind: &NodeKind) -> Shape {
    match kind {
        NodeKind::Nil
        | NodeKind::Bool(_)
        | NodeKind::Int(_)
        | NodeKind::Float(_)
        | NodeKind::Char(_)
        | NodeKind::String(_)
        | NodeKind::Identifier { .. }
        | NodeKind::TypeRef { .. }
        | NodeKind::Unary { .. }
        | NodeKind::Binary { .. }
        | NodeKind::Cast { .. }
        | NodeKind::IfExpr { .. }
        | NodeKind::CallExpr { .. }
        | NodeKind::IndexExpr { .. }
        | NodeKind::MemberExpr { .. }
        | NodeKind::EmptyStmt
        | NodeKind::CommentStmt { .. }
        | NodeKind::ExprStmt { .. }
        | NodeKind::ReturnStmt { .. }
        | NodeKind::BreakStmt
        | NodeKind::ContinueStmt
        | NodeKind::GotoStmt { .. }
        | NodeKind::DoStmt { .. }
        | NodeKind::WhileStmt { .. }
        | NodeKind::FinallyStmt { .. }
        | NodeKind::TryStmt { .. }
        | NodeKind::EmptyDecl
        | NodeKind::CommentDecl { .. }
        | NodeKind::UsingDecl { .. }
        | NodeKind::Module { .. } => Shape::Basic,

        NodeKind::BlockStmt { .. }
        | NodeKind::FuncExpr { .. }
        | NodeKind::IfStmt { .. }
        | NodeKind::SwitchStmt { .. }
        | NodeKind::ForStmt { .. }
        | NodeKind::CatchStmt { .. } => Shape::Scoped,

        NodeKind::CaseStmt { .. } => Shape::Case,

        NodeKind::LabelDecl { .. }
        | NodeKind::Typedef { .. }
        | NodeKind::VarDecl { .. }
        | NodeKind::ParamDecl { .. }
        | NodeKind::EnumeratorDecl { .. } => Shape::Declares,

        NodeKind::NamespaceDecl { .. }
        | NodeKind::FuncDecl { .. }
        | NodeKind::DelegateDecl { .. }
        | NodeKind::ConstructorDecl { .. }
        | NodeKind::DestructorDecl { .. }
        | NodeKind::StructDecl { .. }
        | NodeKind::EnumDecl { .. } => Shape::DeclaresScoped,
    }
}

/// Walk state of the scope-building pass: the resolver's scope stack plus
/// a stack of syntactic parents.
pub struct ScopeBuilder<'a> {
    resolver: Resolver<'a>,
    parents: Vec<Option<NodeId>>,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(scopes: &'a mut ScopeTree, sink: &'a mut dyn DiagnosticSink) -> Self {
        ScopeBuilder {
            resolver: Resolver::new(scopes, sink),
            parents: vec![None],
        }
    }

    #[inline]
    fn current_parent(&self) -> Option<NodeId> {
        self.parents.last().copied().flatten()
    }

    pub fn error_count(&self) -> usize {
        self.resolver.error_count()
    }

    /// Walk the subtree rooted at `node`.
    pub fn visit(&mut self, ast: &mut Ast, node: NodeId) {
        ensure_sufficient_stack(|| self.visit_node(ast, node));
    }

    fn visit_node(&mut self, ast: &mut Ast, node: NodeId) {
        match shape(ast.kind(node)) {
            Shape::Basic => {
                self.begin_parent(ast, node);
                self.visit_children(ast, node);
                self.end_parent(node);
            }
            Shape::Scoped => {
                self.open_parent_scope(ast, node);
                self.visit_children(ast, node);
                self.close_parent_scope(ast, node);
            }
            Shape::Case => self.visit_case(ast, node),
            Shape::Declares => {
                self.resolver.define(ast, node);
                self.begin_parent(ast, node);
                self.visit_children(ast, node);
                self.end_parent(node);
            }
            Shape::DeclaresScoped => {
                self.resolver.define(ast, node);
                self.open_parent_scope(ast, node);
                self.visit_children(ast, node);
                self.close_parent_scope(ast, node);
            }
        }
    }

    fn visit_case(&mut self, ast: &mut Ast, node: NodeId) {
        let NodeKind::CaseStmt { expr, stmts } = *ast.kind(node) else {
            return;
        };
        let stmts: Children = ast.list(stmts).iter().copied().collect();

        self.begin_parent(ast, node);
        if let Some(expr) = expr {
            self.visit(ast, expr);
        }
        self.resolver.open_scope(ast, node);
        for stmt in stmts {
            self.visit(ast, stmt);
        }
        self.close_parent_scope(ast, node);
    }

    fn visit_children(&mut self, ast: &mut Ast, node: NodeId) {
        for child in children(ast, node) {
            self.visit(ast, child);
        }
    }

    fn begin_parent(&mut self, ast: &mut Ast, node: NodeId) {
        let parent = self.current_parent();
        let owner = self.resolver.current_scope();
        let n = ast.get_mut(node);
        debug_assert!(!n.is_linked(), "{node:?} visited twice");
        n.parent = parent;
        n.owner_scope = Some(owner);
        self.parents.push(Some(node));
    }

    fn end_parent(&mut self, node: NodeId) {
        let top = self.parents.pop();
        debug_assert_eq!(top, Some(Some(node)), "parent stack out of order");
        debug_assert!(!self.parents.is_empty(), "popped the root sentinel");
    }

    fn open_parent_scope(&mut self, ast: &mut Ast, node: NodeId) {
        self.begin_parent(ast, node);
        self.resolver.open_scope(ast, node);
    }

    fn close_parent_scope(&mut self, ast: &Ast, node: NodeId) {
        self.resolver.close_scope(ast, node);
        self.end_parent(node);
    }

    /// End the walk and return the error count.
    pub fn finish(self) -> usize {
        debug_assert_eq!(self.parents, [None], "parent stack not restored");
        self.resolver.finish()
    }
}

/// Link and populate scopes for the tree rooted at `root`.
///
/// `scopes` is owned by the driver and normally holds only the global
/// scope (and its builtins). Returns the number of errors reported to
/// `sink`. The walk always completes.
#[tracing::instrument(level = "debug", skip_all, fields(root = ?root, nodes = ast.len()))]
pub fn build_scopes(
    ast: &mut Ast,
    root: NodeId,
    scopes: &mut ScopeTree,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let mut builder = ScopeBuilder::new(scopes, sink);
    builder.visit(ast, root);
    let errors = builder.finish();
    tracing::debug!(errors, scopes = scopes.len(), "scope building complete");
    errors
}
