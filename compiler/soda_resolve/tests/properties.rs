//! Property tests over generated trees.
//!
//! Trees draw declaration and reference names from a four-name pool so
//! that redefinitions, shadowing and misses all occur often.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::cast_possible_truncation,
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use soda_diagnostic::Diagnostic;
use soda_ir::visitor::children;
use soda_ir::{Ast, AstBuilder, NodeId, NodeKind, ScopeId};
use soda_resolve::{build_scopes, resolve_references, ScopeTree, Symbol};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Clone, Debug)]
enum Tree {
    Ident(u8),
    Qualified(u8, u8),
    Int(i8),
    Var(u8, Option<Box<Tree>>),
    Block(Vec<Tree>),
    Func(u8, Vec<u8>, Vec<Tree>),
    Namespace(u8, Vec<Tree>),
    Struct(u8, Vec<u8>),
    Switch(Box<Tree>, Vec<(Option<i8>, Vec<Tree>)>),
    If(Box<Tree>, Box<Tree>),
}

fn name() -> impl Strategy<Value = u8> {
    0..NAMES.len() as u8
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        name().prop_map(Tree::Ident),
        (name(), name()).prop_map(|(a, b)| Tree::Qualified(a, b)),
        any::<i8>().prop_map(Tree::Int),
        name().prop_map(|n| Tree::Var(n, None)),
    ];
    leaf.prop_recursive(5, 64, 5, |inner| {
        prop_oneof![
            (name(), inner.clone()).prop_map(|(n, t)| Tree::Var(n, Some(Box::new(t)))),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Tree::Block),
            (
                name(),
                prop::collection::vec(name(), 0..3),
                prop::collection::vec(inner.clone(), 0..4)
            )
                .prop_map(|(n, p, b)| Tree::Func(n, p, b)),
            (name(), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(n, d)| Tree::Namespace(n, d)),
            (name(), prop::collection::vec(name(), 0..4)).prop_map(|(n, m)| Tree::Struct(n, m)),
            (
                inner.clone(),
                prop::collection::vec(
                    (
                        prop::option::of(any::<i8>()),
                        prop::collection::vec(inner.clone(), 0..3)
                    ),
                    0..3
                )
            )
                .prop_map(|(s, c)| Tree::Switch(Box::new(s), c)),
            (inner.clone(), inner).prop_map(|(c, t)| Tree::If(Box::new(c), Box::new(t))),
        ]
    })
}

fn lower(b: &mut AstBuilder<'_>, t: &Tree) -> NodeId {
    let n = |i: &u8| NAMES[*i as usize];
    match t {
        Tree::Ident(i) => b.ident(n(i)),
        Tree::Qualified(x, y) => b.ident(&format!("{}.{}", n(x), n(y))),
        Tree::Int(v) => b.int(i64::from(*v)),
        Tree::Var(i, init) => {
            let init = init.as_deref().map(|t| lower(b, t));
            b.var(n(i), None, init)
        }
        Tree::Block(stmts) => {
            let stmts: Vec<_> = stmts.iter().map(|s| lower(b, s)).collect();
            b.block(stmts)
        }
        Tree::Func(i, params, body) => {
            let params: Vec<_> = params.iter().map(|p| b.param(n(p), None, None)).collect();
            let stmts: Vec<_> = body.iter().map(|s| lower(b, s)).collect();
            let body = b.block(stmts);
            b.func(n(i), params, None, Some(body))
        }
        Tree::Namespace(i, decls) => {
            let decls: Vec<_> = decls.iter().map(|d| lower(b, d)).collect();
            b.namespace(n(i), decls)
        }
        Tree::Struct(i, members) => {
            let members: Vec<_> = members.iter().map(|m| b.var(n(m), None, None)).collect();
            b.struct_decl(n(i), members)
        }
        Tree::Switch(subject, cases) => {
            let subject = lower(b, subject);
            let cases: Vec<_> = cases
                .iter()
                .map(|(sel, stmts)| {
                    let sel = sel.map(|v| b.int(i64::from(v)));
                    let stmts: Vec<_> = stmts.iter().map(|s| lower(b, s)).collect();
                    b.case(sel, stmts)
                })
                .collect();
            b.switch(subject, cases)
        }
        Tree::If(cond, then) => {
            let cond = lower(b, cond);
            let then = lower(b, then);
            b.if_stmt(cond, then, None)
        }
    }
}

fn module(items: &[Tree]) -> (Ast, NodeId) {
    let mut ast = Ast::new();
    let mut b = AstBuilder::new(&mut ast);
    let decls: Vec<_> = items.iter().map(|t| lower(&mut b, t)).collect();
    let root = b.module("main", decls);
    (ast, root)
}

fn syntactic_parents(ast: &Ast) -> FxHashMap<NodeId, NodeId> {
    let mut parents = FxHashMap::default();
    for id in ast.ids() {
        for child in children(ast, id) {
            parents.insert(child, id);
        }
    }
    parents
}

fn is_case_selector(ast: &Ast, parent: NodeId, child: NodeId) -> bool {
    matches!(*ast.kind(parent), NodeKind::CaseStmt { expr: Some(sel), .. } if sel == child)
}

fn linked(items: &[Tree]) -> (Ast, NodeId, ScopeTree, Vec<Diagnostic>, usize) {
    let (mut ast, root) = module(items);
    let mut scopes = ScopeTree::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let errors = build_scopes(&mut ast, root, &mut scopes, &mut diags);
    (ast, root, scopes, diags, errors)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    /// Every node is linked to its syntactic parent and nearest scope.
    #[test]
    fn prop_total_linkage(items in prop::collection::vec(tree(), 0..6)) {
        let (ast, root, _, _, _) = linked(&items);
        let parents = syntactic_parents(&ast);

        for id in ast.ids() {
            let node = ast.get(id);
            if id == root {
                prop_assert_eq!(node.parent, None);
                prop_assert_eq!(node.owner_scope, Some(ScopeId::GLOBAL));
                continue;
            }
            let parent = parents[&id];
            prop_assert_eq!(node.parent, Some(parent));

            let p = ast.get(parent);
            let expected = if is_case_selector(&ast, parent, id) {
                p.owner_scope
            } else {
                p.scope.or(p.owner_scope)
            };
            prop_assert_eq!(node.owner_scope, expected, "{:?}", node);
        }
    }

    /// Scopes nest exactly as their introducing nodes do.
    #[test]
    fn prop_scope_chain(items in prop::collection::vec(tree(), 0..6)) {
        let (ast, _, scopes, _, _) = linked(&items);

        let mut introduced = 0;
        for id in ast.ids() {
            let node = ast.get(id);
            prop_assert_eq!(node.kind.introduces_scope(), node.scope.is_some());
            let Some(scope) = node.scope else { continue };
            introduced += 1;

            prop_assert_eq!(scopes.parent(scope), node.owner_scope);

            let mut scoped_ancestors = 0;
            let mut cur = node.parent;
            while let Some(p) = cur {
                if ast.get(p).scope.is_some() {
                    scoped_ancestors += 1;
                }
                cur = ast.get(p).parent;
            }
            prop_assert_eq!(scopes.depth(scope), scoped_ancestors + 1);
        }
        prop_assert_eq!(scopes.len(), introduced + 1);
    }

    /// Recursive lookup finds the innermost binding on the chain, if any.
    #[test]
    fn prop_recursive_lookup(items in prop::collection::vec(tree(), 0..6)) {
        let (ast, _, scopes, _, _) = linked(&items);

        for index in 0..scopes.len() {
            let start = ScopeId::new(index as u32);
            for text in NAMES {
                let Some(name) = ast.interner().get(text) else { continue };

                let mut expected: Option<Symbol> = None;
                let mut cur = Some(start);
                while let Some(s) = cur {
                    if let Some(sym) = scopes.get(s).get(name) {
                        expected = Some(sym);
                        break;
                    }
                    cur = scopes.parent(s);
                }

                prop_assert_eq!(scopes.lookup(start, name, true), expected);
                prop_assert_eq!(scopes.is_defined(start, name, true), expected.is_some());
                prop_assert_eq!(
                    scopes.lookup(start, name, false),
                    scopes.get(start).get(name)
                );
            }
        }
    }

    /// Reported errors equal the events that caused them.
    #[test]
    fn prop_error_count_conservation(items in prop::collection::vec(tree(), 0..6)) {
        let (ast, root, mut scopes, mut diags, errors) = linked(&items);

        let mut declared: FxHashMap<(Option<ScopeId>, soda_ir::Name), usize> =
            FxHashMap::default();
        for id in ast.ids() {
            let node = ast.get(id);
            if let Some(name) = node.kind.declared_name() {
                *declared.entry((node.owner_scope, name)).or_default() += 1;
            }
        }
        let redefinitions: usize = declared.values().map(|n| n - 1).sum();
        prop_assert_eq!(errors, redefinitions);
        prop_assert_eq!(diags.len(), errors);

        diags.clear();
        let res = resolve_references(&ast, root, &mut scopes, &mut diags);
        let references = ast
            .ids()
            .filter(|&id| matches!(ast.kind(id), NodeKind::Identifier { .. }))
            .count();
        prop_assert_eq!(res.error_count(), references - res.len());
        prop_assert_eq!(diags.len(), res.error_count());
    }
}
