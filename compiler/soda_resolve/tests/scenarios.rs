//! End-to-end resolution scenarios through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use soda_diagnostic::{
    emitter, Diagnostic, DiagnosticConfig, DiagnosticQueue, DiagnosticSink, ErrorCode,
};
use soda_ir::{Ast, AstBuilder, NodeId, ScopeId};
use soda_resolve::{
    build_scopes, resolve_references, Resolver, ScopeTree, Symbol, SymbolKind, DEFAULT_BUILTINS,
};

fn messages(diags: &[Diagnostic]) -> Vec<&str> {
    diags.iter().map(|d| d.message.as_str()).collect()
}

#[test]
fn duplicate_top_level_variables() {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let first = b.var("x", None, None);
    let second = b.var("x", None, None);
    let root = b.module("main", [first, second]);

    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let errors = build_scopes(&mut ast, root, &mut scopes, &mut diags);

    assert_eq!(errors, 1);
    assert_eq!(messages(&diags), vec!["multiple definitions of 'x'"]);
    let x = ast.interner().get("x").unwrap();
    assert_eq!(
        scopes.lookup(ScopeId::GLOBAL, x, false),
        Some(Symbol::new(SymbolKind::Variable, first))
    );
}

/// `func f() { { var y; y; } y; }`
fn nested_block() -> (Ast, NodeId, NodeId, NodeId, NodeId) {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let y = b.var("y", None, None);
    let inner_use = b.ident("y");
    let inner_stmt = b.expr_stmt(inner_use);
    let inner = b.block([y, inner_stmt]);
    let outer_use = b.ident("y");
    let outer_stmt = b.expr_stmt(outer_use);
    let body = b.block([inner, outer_stmt]);
    let f = b.func("f", [], None, Some(body));
    let root = b.module("main", [f]);
    (ast, root, y, inner_use, outer_use)
}

#[test]
fn block_local_resolves_inside_block() {
    let (mut ast, root, y, inner_use, _) = nested_block();
    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    assert_eq!(build_scopes(&mut ast, root, &mut scopes, &mut diags), 0);

    let mut r = Resolver::new(&mut scopes, &mut diags);
    let found = r.lookup_from(&ast, inner_use, "y");
    assert_eq!(found, Some(Symbol::new(SymbolKind::Variable, y)));
    assert_eq!(r.finish(), 0);
}

#[test]
fn block_local_is_undefined_outside_block() {
    let (mut ast, root, _, inner_use, outer_use) = nested_block();
    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    assert_eq!(build_scopes(&mut ast, root, &mut scopes, &mut diags), 0);

    let res = resolve_references(&ast, root, &mut scopes, &mut diags);
    assert_eq!(res.error_count(), 1);
    assert!(res.get(inner_use).is_some());
    assert_eq!(res.get(outer_use), None);
    assert_eq!(messages(&diags), vec!["undefined symbol 'y'"]);
}

/// `namespace N { struct S { var v; } var k; }`, returning (ast, root, S, v, k).
fn namespace_fixture() -> (Ast, NodeId, NodeId, NodeId, NodeId) {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let v = b.var("v", None, None);
    let s = b.struct_decl("S", [v]);
    let k = b.var("k", None, None);
    let n = b.namespace("N", [s, k]);
    let root = b.module("main", [n]);
    (ast, root, s, v, k)
}

fn lookup_at_module_scope(name: &str) -> (Option<Symbol>, usize, Vec<Diagnostic>, Vec<NodeId>) {
    let (mut ast, root, s, v, k) = namespace_fixture();
    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    assert_eq!(build_scopes(&mut ast, root, &mut scopes, &mut diags), 0);

    let mut r = Resolver::new(&mut scopes, &mut diags);
    let found = r.lookup(&ast, root, name, true);
    let errors = r.finish();
    (found, errors, diags, vec![s, v, k])
}

#[test]
fn qualified_lookup_through_namespace_and_struct() {
    let (found, errors, diags, ids) = lookup_at_module_scope("N.S.v");
    assert_eq!(found, Some(Symbol::new(SymbolKind::Variable, ids[1])));
    assert_eq!(errors, 0);
    assert!(diags.is_empty());
}

#[test]
fn qualified_lookup_with_unknown_interior_segment() {
    let (found, errors, diags, _) = lookup_at_module_scope("N.Z.v");
    assert_eq!(found, None);
    assert_eq!(errors, 1);
    assert_eq!(messages(&diags), vec!["undefined symbol 'N.Z'"]);
    assert_eq!(diags[0].code, ErrorCode::E3002);
}

#[test]
fn empty_lookup() {
    let (found, errors, diags, _) = lookup_at_module_scope("");
    assert_eq!(found, None);
    assert_eq!(errors, 1);
    assert_eq!(messages(&diags), vec!["cannot lookup empty symbol"]);
    assert_eq!(diags[0].code, ErrorCode::E3003);
}

#[test]
fn qualified_lookup_short_circuits_at_non_container() {
    let (found, errors, diags, ids) = lookup_at_module_scope("N.k.C");
    assert_eq!(found, Some(Symbol::new(SymbolKind::Variable, ids[2])));
    assert_eq!(errors, 0);
    assert!(diags.is_empty());
}

#[test]
fn redefinition_leaves_first_binding_and_counts_once() {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let first = b.func("f", [], None, None);
    let second = b.struct_decl("f", []);
    let third = b.var("f", None, None);
    let root = b.module("main", [first, second, third]);

    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    assert_eq!(build_scopes(&mut ast, root, &mut scopes, &mut diags), 2);

    let f = ast.interner().get("f").unwrap();
    assert_eq!(
        scopes.lookup(ScopeId::GLOBAL, f, true),
        Some(Symbol::new(SymbolKind::Function, first))
    );
    // The rejected struct still got its own scope.
    assert!(ast.get(second).scope.is_some());
}

#[test]
fn queue_filtering_does_not_change_counts() {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let decls: Vec<_> = (0..5).map(|_| b.var("dup", None, None)).collect();
    let root = b.module("main", decls);

    let mut scopes = ScopeTree::new();
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    let errors = build_scopes(&mut ast, root, &mut scopes, &mut queue);
    assert_eq!(errors, 4);
    assert_eq!(queue.len(), 2);
    assert!(queue.limit_reached());
}

#[test]
fn diagnostics_render_in_source_order() {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let use_b = b.ident("b");
    let use_a = b.ident("a");
    let sb = b.expr_stmt(use_b);
    let sa = b.expr_stmt(use_a);
    let root = b.module("main", [sb, sa]);

    let mut scopes = ScopeTree::with_builtins(ast.interner_mut(), DEFAULT_BUILTINS);
    let mut queue = DiagnosticQueue::new();
    assert_eq!(build_scopes(&mut ast, root, &mut scopes, &mut queue), 0);
    let res = resolve_references(&ast, root, &mut scopes, &mut queue);
    assert_eq!(res.error_count(), 2);

    // Synthetic spans are one byte per node, at the node's index.
    let source = "ba";
    let rendered = emitter::render(&queue.flush(), source);
    assert_eq!(
        rendered,
        "error[E3002]: undefined symbol 'b'\n  --> 1:1: not found in this scope\n\
         error[E3002]: undefined symbol 'a'\n  --> 1:2: not found in this scope\n"
    );
}

#[test]
fn sink_sees_every_event() {
    struct Counting(usize);
    impl DiagnosticSink for Counting {
        fn emit(&mut self, _: Diagnostic) {
            self.0 += 1;
        }
    }

    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let x1 = b.var("x", None, None);
    let x2 = b.var("x", None, None);
    let missing = b.ident("nope");
    let empty = b.ident("");
    let s1 = b.expr_stmt(missing);
    let s2 = b.expr_stmt(empty);
    let root = b.module("main", [x1, x2, s1, s2]);

    let mut scopes = ScopeTree::new();
    let mut sink = Counting(0);
    let built = build_scopes(&mut ast, root, &mut scopes, &mut sink);
    let resolved = resolve_references(&ast, root, &mut scopes, &mut sink);
    assert_eq!(built, 1);
    assert_eq!(resolved.error_count(), 2);
    assert_eq!(sink.0, 3);
}
