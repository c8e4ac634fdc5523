//! Reference resolution over a linked tree.
//!
//! Runs after [`build_scopes`](crate::build_scopes). Walks the tree again,
//! re-entering the scope each node introduced, and binds every
//! identifier, type reference and `goto` label to the symbol it names.
//! Member names (`a.b` as an expression) are left to type checking.

use rustc_hash::FxHashMap;
use soda_diagnostic::DiagnosticSink;
use soda_ir::visitor::{walk_node, Visitor};
use soda_ir::{Ast, NodeId, NodeKind, ScopeId};
use soda_stack::ensure_sufficient_stack;

use crate::{Resolver, ScopeTree, Symbol};

/// The symbol each reference node resolved to.
#[derive(Clone, Debug, Default)]
pub struct Resolutions {
    symbols: FxHashMap<NodeId, Symbol>,
    error_count: usize,
}

impl Resolutions {
    /// The symbol `node` resolved to, if it is a reference that resolved.
    #[inline]
    pub fn get(&self, node: NodeId) -> Option<Symbol> {
        self.symbols.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Symbol)> + '_ {
        self.symbols.iter().map(|(&node, &sym)| (node, sym))
    }

    /// Errors reported while resolving.
    pub fn error_count(&self) -> usize {
        self.error_count
    }
}

struct ReferenceResolver<'a> {
    resolver: Resolver<'a>,
    symbols: FxHashMap<NodeId, Symbol>,
}

impl ReferenceResolver<'_> {
    fn resolve(&mut self, ast: &Ast, node: NodeId) {
        let name = match *ast.kind(node) {
            NodeKind::Identifier { name } | NodeKind::TypeRef { name } => name,
            NodeKind::GotoStmt { label } => label,
            _ => return,
        };
        if let Some(sym) = self.resolver.lookup(ast, node, ast.name(name), true) {
            self.symbols.insert(node, sym);
        }
    }

    fn visit_case(&mut self, ast: &Ast, node: NodeId, scope: ScopeId) {
        let NodeKind::CaseStmt { expr, stmts } = *ast.kind(node) else {
            return;
        };
        if let Some(expr) = expr {
            self.visit_node(ast, expr);
        }
        self.resolver.enter_scope(scope);
        for &stmt in ast.list(stmts) {
            self.visit_node(ast, stmt);
        }
        self.resolver.leave_scope(scope);
    }
}

impl Visitor for ReferenceResolver<'_> {
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {
        ensure_sufficient_stack(|| {
            let node = ast.get(id);
            debug_assert_eq!(
                node.owner_scope,
                Some(self.resolver.current_scope()),
                "{id:?} walked outside the scope it was linked in"
            );
            match node.scope {
                Some(scope) if matches!(node.kind, NodeKind::CaseStmt { .. }) => {
                    self.visit_case(ast, id, scope);
                }
                Some(scope) => {
                    self.resolver.enter_scope(scope);
                    walk_node(self, ast, id);
                    self.resolver.leave_scope(scope);
                }
                None => {
                    self.resolve(ast, id);
                    walk_node(self, ast, id);
                }
            }
        });
    }
}

/// Resolve every reference in the tree rooted at `root`.
///
/// The tree must already be linked by [`build_scopes`](crate::build_scopes)
/// against the same `scopes`. Nothing is relinked or defined.
#[tracing::instrument(level = "debug", skip_all, fields(root = ?root))]
pub fn resolve_references(
    ast: &Ast,
    root: NodeId,
    scopes: &mut ScopeTree,
    sink: &mut dyn DiagnosticSink,
) -> Resolutions {
    let mut pass = ReferenceResolver {
        resolver: Resolver::new(scopes, sink),
        symbols: FxHashMap::default(),
    };
    pass.visit_node(ast, root);
    let ReferenceResolver { resolver, symbols } = pass;
    let error_count = resolver.finish();
    tracing::debug!(resolved = symbols.len(), errors = error_count, "references resolved");
    Resolutions {
        symbols,
        error_count,
    }
}
