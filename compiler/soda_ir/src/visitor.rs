//! Child enumeration and read-only traversal.
//!
//! [`children`] is the single source of truth for child order. The order
//! is source order and it carries meaning: within one scope a declaration
//! is registered before anything visited after it, so a variable's type is
//! walked before its initializer and a function's parameters before its
//! body.
//!
//! Passes that rewrite node annotations collect a node's children with
//! [`children`] and recurse themselves. Passes that only read the tree can
//! implement [`Visitor`] and override the node kinds they care about.

use smallvec::SmallVec;

use crate::ast::NodeKind;
use crate::{Ast, NodeId, NodeRange};

/// Inline buffer for one node's children.
pub type Children = SmallVec<[NodeId; 8]>;

/// Children of `id` in source order.
pub fn children(ast: &Ast, id: NodeId) -> Children {
    let mut out = Children::new();
    let mut one = |child: NodeId| out.push(child);
    for_each_child(ast, id, &mut one);
    out
}

/// Call `f` on each child of `id` in source order.
pub fn for_each_child(ast: &Ast, id: NodeId, f: &mut impl FnMut(NodeId)) {
    match *ast.kind(id) {
        NodeKind::Nil
        | NodeKind::Bool(_)
        | NodeKind::Int(_)
        | NodeKind::Float(_)
        | NodeKind::Char(_)
        | NodeKind::String(_)
        | NodeKind::Identifier { .. }
        | NodeKind::TypeRef { .. }
        | NodeKind::EmptyStmt
        | NodeKind::CommentStmt { .. }
        | NodeKind::BreakStmt
        | NodeKind::ContinueStmt
        | NodeKind::GotoStmt { .. }
        | NodeKind::EmptyDecl
        | NodeKind::CommentDecl { .. }
        | NodeKind::LabelDecl { .. }
        | NodeKind::UsingDecl { .. } => {}

        NodeKind::Unary { operand, .. } => f(operand),
        NodeKind::Binary { left, right, .. } => {
            f(left);
            f(right);
        }
        NodeKind::Cast { ty, expr } => {
            f(ty);
            f(expr);
        }
        NodeKind::IfExpr {
            cond,
            then_expr,
            else_expr,
        } => {
            f(cond);
            f(then_expr);
            f(else_expr);
        }
        NodeKind::FuncExpr { params, ret, body } => {
            list(ast, params, f);
            opt(ret, f);
            f(body);
        }
        NodeKind::CallExpr { callee, args } => {
            f(callee);
            list(ast, args, f);
        }
        NodeKind::IndexExpr { target, index } => {
            f(target);
            f(index);
        }
        NodeKind::MemberExpr { target, .. } => f(target),

        NodeKind::ExprStmt { expr } => f(expr),
        NodeKind::BlockStmt { stmts } => list(ast, stmts, f),
        NodeKind::ReturnStmt { value } => opt(value, f),
        NodeKind::IfStmt {
            cond,
            then_stmt,
            else_stmt,
        } => {
            f(cond);
            f(then_stmt);
            opt(else_stmt, f);
        }
        NodeKind::CaseStmt { expr, stmts } => {
            opt(expr, f);
            list(ast, stmts, f);
        }
        NodeKind::SwitchStmt { expr, cases } => {
            f(expr);
            list(ast, cases, f);
        }
        NodeKind::ForStmt {
            init,
            cond,
            step,
            body,
        } => {
            opt(init, f);
            opt(cond, f);
            opt(step, f);
            f(body);
        }
        NodeKind::DoStmt { body, cond } => {
            f(body);
            f(cond);
        }
        NodeKind::WhileStmt { cond, body } => {
            f(cond);
            f(body);
        }
        NodeKind::CatchStmt { param, body } => {
            opt(param, f);
            f(body);
        }
        NodeKind::FinallyStmt { body } => f(body),
        NodeKind::TryStmt {
            body,
            catches,
            finally,
        } => {
            f(body);
            list(ast, catches, f);
            opt(finally, f);
        }

        NodeKind::Typedef { ty, .. } => f(ty),
        NodeKind::NamespaceDecl { decls, .. } | NodeKind::Module { decls, .. } => list(ast, decls, f),
        NodeKind::VarDecl { ty, init, .. } => {
            opt(ty, f);
            opt(init, f);
        }
        NodeKind::ParamDecl { ty, default, .. } => {
            opt(ty, f);
            opt(default, f);
        }
        NodeKind::FuncDecl {
            params, ret, body, ..
        } => {
            list(ast, params, f);
            opt(ret, f);
            opt(body, f);
        }
        NodeKind::DelegateDecl { params, ret, .. } => {
            list(ast, params, f);
            opt(ret, f);
        }
        NodeKind::ConstructorDecl { params, body, .. } => {
            list(ast, params, f);
            opt(body, f);
        }
        NodeKind::DestructorDecl { body, .. } => opt(body, f),
        NodeKind::StructDecl { members, .. } => list(ast, members, f),
        NodeKind::EnumeratorDecl { value, .. } => opt(value, f),
        NodeKind::EnumDecl {
            base, enumerators, ..
        } => {
            opt(base, f);
            list(ast, enumerators, f);
        }
    }
}

fn opt(child: Option<NodeId>, f: &mut impl FnMut(NodeId)) {
    if let Some(child) = child {
        f(child);
    }
}

fn list(ast: &Ast, range: NodeRange, f: &mut impl FnMut(NodeId)) {
    for &child in ast.list(range) {
        f(child);
    }
}

/// Read-only depth-first traversal.
///
/// Override `visit_node` to act on specific kinds; call [`walk_node`] to
/// continue into the children.
pub trait Visitor {
    fn visit_node(&mut self, ast: &Ast, id: NodeId) {
        walk_node(self, ast, id);
    }
}

/// Visit each child of `id` in source order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast, id: NodeId) {
    for child in children(ast, id) {
        visitor.visit_node(ast, child);
    }
}
