//! Soda IR - syntax tree types
//!
//! This crate contains the data structures shared by the Soda compiler
//! passes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The arena-allocated syntax tree (`Ast`, `Node`, `NodeKind`)
//! - Child enumeration and a read-only `Visitor`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Node>, children are `NodeId(u32)`
//!   indices and lists are `NodeRange`s into one shared buffer
//! - **Index Back-References**: parent and scope links are ids, never
//!   pointers, so the tree has a single owner

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod build;
mod ids;
mod interner;
mod name;
mod span;
pub mod visitor;

pub use arena::Ast;
pub use ast::{BinaryOp, Node, NodeKind, UnaryOp};
pub use build::AstBuilder;
pub use ids::{NodeId, NodeRange, ScopeId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
