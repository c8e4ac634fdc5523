//! Construction helpers for syntax trees.
//!
//! The parser and the tests build trees bottom-up through [`AstBuilder`]:
//! children are allocated first and passed to their parent's constructor.
//! Each node gets a synthetic one-byte span at its allocation index so
//! diagnostics on different nodes never share a location; the parser
//! overwrites these with [`Ast::set_span`].

use crate::ast::{BinaryOp, NodeKind, UnaryOp};
use crate::{Ast, NodeId, Span};

/// Bottom-up tree construction over a borrowed arena.
pub struct AstBuilder<'a> {
    ast: &'a mut Ast,
}

impl<'a> AstBuilder<'a> {
    pub fn new(ast: &'a mut Ast) -> Self {
        AstBuilder { ast }
    }

    /// Allocate a node of any kind.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Ast::alloc panics before the node count exceeds u32"
    )]
    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        let offset = self.ast.len() as u32;
        self.ast.alloc(kind, Span::new(offset, offset + 1))
    }

    pub fn ast(&self) -> &Ast {
        self.ast
    }

    // Literals

    pub fn nil(&mut self) -> NodeId {
        self.node(NodeKind::Nil)
    }

    pub fn bool_lit(&mut self, value: bool) -> NodeId {
        self.node(NodeKind::Bool(value))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.node(NodeKind::Int(value))
    }

    pub fn float(&mut self, value: f64) -> NodeId {
        self.node(NodeKind::Float(value.to_bits()))
    }

    pub fn char_lit(&mut self, value: char) -> NodeId {
        self.node(NodeKind::Char(value))
    }

    pub fn string(&mut self, value: &str) -> NodeId {
        let value = self.ast.intern(value);
        self.node(NodeKind::String(value))
    }

    // Expressions

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::Identifier { name })
    }

    pub fn type_ref(&mut self, name: &str) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::TypeRef { name })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.node(NodeKind::Unary { op, operand })
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.node(NodeKind::Binary { op, left, right })
    }

    pub fn cast(&mut self, ty: NodeId, expr: NodeId) -> NodeId {
        self.node(NodeKind::Cast { ty, expr })
    }

    pub fn if_expr(&mut self, cond: NodeId, then_expr: NodeId, else_expr: NodeId) -> NodeId {
        self.node(NodeKind::IfExpr {
            cond,
            then_expr,
            else_expr,
        })
    }

    pub fn func_expr(
        &mut self,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        let params = self.ast.alloc_list(params);
        self.node(NodeKind::FuncExpr { params, ret, body })
    }

    pub fn call(&mut self, callee: NodeId, args: impl IntoIterator<Item = NodeId>) -> NodeId {
        let args = self.ast.alloc_list(args);
        self.node(NodeKind::CallExpr { callee, args })
    }

    pub fn index(&mut self, target: NodeId, index: NodeId) -> NodeId {
        self.node(NodeKind::IndexExpr { target, index })
    }

    pub fn member(&mut self, target: NodeId, member: &str) -> NodeId {
        let member = self.ast.intern(member);
        self.node(NodeKind::MemberExpr { target, member })
    }

    // Statements

    pub fn empty_stmt(&mut self) -> NodeId {
        self.node(NodeKind::EmptyStmt)
    }

    pub fn comment_stmt(&mut self, text: &str) -> NodeId {
        let text = self.ast.intern(text);
        self.node(NodeKind::CommentStmt { text })
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.node(NodeKind::ExprStmt { expr })
    }

    pub fn block(&mut self, stmts: impl IntoIterator<Item = NodeId>) -> NodeId {
        let stmts = self.ast.alloc_list(stmts);
        self.node(NodeKind::BlockStmt { stmts })
    }

    pub fn return_stmt(&mut self, value: Option<NodeId>) -> NodeId {
        self.node(NodeKind::ReturnStmt { value })
    }

    pub fn break_stmt(&mut self) -> NodeId {
        self.node(NodeKind::BreakStmt)
    }

    pub fn continue_stmt(&mut self) -> NodeId {
        self.node(NodeKind::ContinueStmt)
    }

    pub fn goto(&mut self, label: &str) -> NodeId {
        let label = self.ast.intern(label);
        self.node(NodeKind::GotoStmt { label })
    }

    pub fn if_stmt(&mut self, cond: NodeId, then_stmt: NodeId, else_stmt: Option<NodeId>) -> NodeId {
        self.node(NodeKind::IfStmt {
            cond,
            then_stmt,
            else_stmt,
        })
    }

    /// `case expr:`, or `default:` when `expr` is `None`.
    pub fn case(&mut self, expr: Option<NodeId>, stmts: impl IntoIterator<Item = NodeId>) -> NodeId {
        let stmts = self.ast.alloc_list(stmts);
        self.node(NodeKind::CaseStmt { expr, stmts })
    }

    pub fn switch(&mut self, expr: NodeId, cases: impl IntoIterator<Item = NodeId>) -> NodeId {
        let cases = self.ast.alloc_list(cases);
        self.node(NodeKind::SwitchStmt { expr, cases })
    }

    pub fn for_stmt(
        &mut self,
        init: Option<NodeId>,
        cond: Option<NodeId>,
        step: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.node(NodeKind::ForStmt {
            init,
            cond,
            step,
            body,
        })
    }

    pub fn do_stmt(&mut self, body: NodeId, cond: NodeId) -> NodeId {
        self.node(NodeKind::DoStmt { body, cond })
    }

    pub fn while_stmt(&mut self, cond: NodeId, body: NodeId) -> NodeId {
        self.node(NodeKind::WhileStmt { cond, body })
    }

    pub fn catch(&mut self, param: Option<NodeId>, body: NodeId) -> NodeId {
        self.node(NodeKind::CatchStmt { param, body })
    }

    pub fn finally(&mut self, body: NodeId) -> NodeId {
        self.node(NodeKind::FinallyStmt { body })
    }

    pub fn try_stmt(
        &mut self,
        body: NodeId,
        catches: impl IntoIterator<Item = NodeId>,
        finally: Option<NodeId>,
    ) -> NodeId {
        let catches = self.ast.alloc_list(catches);
        self.node(NodeKind::TryStmt {
            body,
            catches,
            finally,
        })
    }

    // Declarations

    pub fn empty_decl(&mut self) -> NodeId {
        self.node(NodeKind::EmptyDecl)
    }

    pub fn comment_decl(&mut self, text: &str) -> NodeId {
        let text = self.ast.intern(text);
        self.node(NodeKind::CommentDecl { text })
    }

    pub fn label(&mut self, name: &str) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::LabelDecl { name })
    }

    pub fn using(&mut self, path: &str) -> NodeId {
        let path = self.ast.intern(path);
        self.node(NodeKind::UsingDecl { path })
    }

    pub fn typedef(&mut self, name: &str, ty: NodeId) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::Typedef { name, ty })
    }

    pub fn namespace(&mut self, name: &str, decls: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        let decls = self.ast.alloc_list(decls);
        self.node(NodeKind::NamespaceDecl { name, decls })
    }

    pub fn var(&mut self, name: &str, ty: Option<NodeId>, init: Option<NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::VarDecl { name, ty, init })
    }

    pub fn param(&mut self, name: &str, ty: Option<NodeId>, default: Option<NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::ParamDecl { name, ty, default })
    }

    pub fn func(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let name = self.ast.intern(name);
        let params = self.ast.alloc_list(params);
        self.node(NodeKind::FuncDecl {
            name,
            params,
            ret,
            body,
        })
    }

    pub fn delegate(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = NodeId>,
        ret: Option<NodeId>,
    ) -> NodeId {
        let name = self.ast.intern(name);
        let params = self.ast.alloc_list(params);
        self.node(NodeKind::DelegateDecl { name, params, ret })
    }

    pub fn constructor(
        &mut self,
        name: &str,
        params: impl IntoIterator<Item = NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let name = self.ast.intern(name);
        let params = self.ast.alloc_list(params);
        self.node(NodeKind::ConstructorDecl { name, params, body })
    }

    pub fn destructor(&mut self, name: &str, body: Option<NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::DestructorDecl { name, body })
    }

    pub fn struct_decl(&mut self, name: &str, members: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        let members = self.ast.alloc_list(members);
        self.node(NodeKind::StructDecl { name, members })
    }

    pub fn enumerator(&mut self, name: &str, value: Option<NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        self.node(NodeKind::EnumeratorDecl { name, value })
    }

    pub fn enum_decl(
        &mut self,
        name: &str,
        base: Option<NodeId>,
        enumerators: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let name = self.ast.intern(name);
        let enumerators = self.ast.alloc_list(enumerators);
        self.node(NodeKind::EnumDecl {
            name,
            base,
            enumerators,
        })
    }

    pub fn module(&mut self, name: &str, decls: impl IntoIterator<Item = NodeId>) -> NodeId {
        let name = self.ast.intern(name);
        let decls = self.ast.alloc_list(decls);
        self.node(NodeKind::Module { name, decls })
    }
}
