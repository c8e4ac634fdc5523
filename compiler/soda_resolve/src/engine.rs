//! The scope-resolution engine.
//!
//! [`Resolver`] owns the current-scope stack of a walk and implements the
//! two operations every resolution pass needs: registering a declaration
//! in the current scope and resolving a plain or dotted name. User errors
//! become diagnostics and bump the error count; they never stop the walk.
//! A scope pushed or popped out of order is a bug in the walk, caught by
//! debug assertions rather than reported.

use soda_diagnostic::{format_template, Diagnostic, DiagnosticSink, ErrorCode};
use soda_ir::{Ast, NodeId, ScopeId};

use crate::{QualifiedName, ScopeTree, Symbol, SymbolKind};

/// Current-scope stack plus error accounting over a [`ScopeTree`].
pub struct Resolver<'a> {
    scopes: &'a mut ScopeTree,
    stack: Vec<ScopeId>,
    sink: &'a mut dyn DiagnosticSink,
    error_count: usize,
}

impl<'a> Resolver<'a> {
    /// A resolver whose stack holds only the global scope.
    pub fn new(scopes: &'a mut ScopeTree, sink: &'a mut dyn DiagnosticSink) -> Self {
        Resolver {
            scopes,
            stack: vec![ScopeId::GLOBAL],
            sink,
            error_count: 0,
        }
    }

    #[inline]
    pub fn current_scope(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    /// Number of scopes on the stack, the global scope included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Give `node` its own scope nested in the current one and push it.
    ///
    /// Sets `owner_scope` to the current scope. Must be paired with
    /// [`close_scope`](Self::close_scope) on the same node.
    pub fn open_scope(&mut self, ast: &mut Ast, node: NodeId) -> ScopeId {
        let current = self.current_scope();
        let scope = self.scopes.alloc(current);
        let n = ast.get_mut(node);
        debug_assert!(n.scope.is_none(), "{node:?} opened a scope twice");
        n.owner_scope = Some(current);
        n.scope = Some(scope);
        self.stack.push(scope);
        tracing::trace!(?node, ?scope, parent = ?current, "open scope");
        scope
    }

    /// Pop the scope `node` opened.
    pub fn close_scope(&mut self, ast: &Ast, node: NodeId) {
        let top = self.stack.pop();
        debug_assert!(
            top.is_some() && top == ast.get(node).scope,
            "scope stack out of order: closing {node:?} but the current scope is {top:?}"
        );
        debug_assert!(!self.stack.is_empty(), "popped the global scope");
    }

    /// Push a scope a previous pass already linked.
    pub fn enter_scope(&mut self, scope: ScopeId) {
        self.stack.push(scope);
    }

    pub fn leave_scope(&mut self, scope: ScopeId) {
        let top = self.stack.pop();
        debug_assert_eq!(top, Some(scope), "scope stack out of order");
        debug_assert!(!self.stack.is_empty(), "popped the global scope");
    }

    /// Bind the declaration `decl` in the current scope.
    ///
    /// A name already bound in this scope is reported as a multiple
    /// definition; the first binding is kept. Returns the new symbol.
    pub fn define(&mut self, ast: &Ast, decl: NodeId) -> Option<Symbol> {
        let kind = ast.kind(decl);
        debug_assert!(kind.is_declaration(), "define called on {}", kind.describe());
        let (Some(name), Some(sym_kind)) = (kind.declared_name(), SymbolKind::of(kind)) else {
            return None;
        };
        let scope = self.current_scope();
        match self.scopes.define(scope, name, Symbol::new(sym_kind, decl)) {
            Ok(sym) => {
                tracing::trace!(
                    name = ast.name(name),
                    kind = %sym_kind,
                    decl = kind.describe(),
                    ?scope,
                    "define"
                );
                Some(sym)
            }
            Err(err) => {
                let text = ast.name(name);
                let mut diag = Diagnostic::error(ErrorCode::E3001)
                    .with_message(format_template("multiple definitions of '%'", &[&text]))
                    .with_label(ast.span(decl), "redefined here");
                if let Some(first) = err.existing.decl {
                    diag = diag.with_secondary_label(ast.span(first), "first defined here");
                }
                self.report(diag);
                None
            }
        }
    }

    /// Resolve `name` from the current scope.
    ///
    /// `name` may be dotted. `node` is the reference site errors are
    /// reported against. `recursive` only affects single-segment names;
    /// the head of a dotted name always searches the enclosing scopes.
    pub fn lookup(&mut self, ast: &Ast, node: NodeId, name: &str, recursive: bool) -> Option<Symbol> {
        let scope = self.current_scope();
        self.lookup_in(ast, node, scope, name, recursive)
    }

    /// Resolve `name` from the scope that owns `node`.
    pub fn lookup_from(&mut self, ast: &Ast, node: NodeId, name: &str) -> Option<Symbol> {
        let owner = ast.get(node).owner_scope;
        debug_assert!(owner.is_some(), "{node:?} has not been linked");
        self.lookup_in(ast, node, owner.unwrap_or(ScopeId::GLOBAL), name, true)
    }

    fn lookup_in(
        &mut self,
        ast: &Ast,
        node: NodeId,
        scope: ScopeId,
        name: &str,
        recursive: bool,
    ) -> Option<Symbol> {
        let qname = match QualifiedName::parse(name) {
            Ok(qname) => qname,
            Err(err) => {
                self.report(
                    Diagnostic::error(ErrorCode::E3003)
                        .with_message(err.to_string())
                        .with_label(ast.span(node), "empty name"),
                );
                return None;
            }
        };

        let interner = ast.interner();
        let head_recursive = recursive || qname.is_qualified();
        let head = interner
            .get(qname.first())
            .and_then(|n| self.scopes.lookup(scope, n, head_recursive));
        let Some(mut sym) = head else {
            self.undefined(ast, node, qname.first());
            return None;
        };

        for (i, segment) in qname.rest().iter().enumerate() {
            if !sym.is_container() {
                break;
            }
            let container = sym.decl.and_then(|d| ast.get(d).scope);
            let next = container.and_then(|s| {
                interner
                    .get(segment)
                    .and_then(|n| self.scopes.lookup(s, n, false))
            });
            match next {
                Some(found) => sym = found,
                None => {
                    self.undefined(ast, node, &qname.prefix(i + 2));
                    return None;
                }
            }
        }

        Some(sym)
    }

    fn undefined(&mut self, ast: &Ast, node: NodeId, name: &str) {
        self.report(
            Diagnostic::error(ErrorCode::E3002)
                .with_message(format_template("undefined symbol '%'", &[&name]))
                .with_label(ast.span(node), "not found in this scope"),
        );
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.error_count += 1;
        tracing::debug!(code = %diagnostic.code, "{}", diagnostic.message);
        self.sink.emit(diagnostic);
    }

    /// End the walk and return the error count.
    pub fn finish(self) -> usize {
        debug_assert_eq!(
            self.stack,
            [ScopeId::GLOBAL],
            "scope stack not restored at end of walk"
        );
        self.error_count
    }
}
