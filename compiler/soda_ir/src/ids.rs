//! Arena indices for nodes and scopes.
//!
//! Back-references in the tree (a node's parent, its owning scope, a
//! scope's parent, a symbol's declaration) are all plain indices. They are
//! lookup aids into arenas that outlive every pass; none of them owns
//! anything.

use std::fmt;

/// Index of a node in an [`Ast`](crate::Ast).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Index of a scope in a scope arena.
///
/// Index 0 is reserved for the global scope, which the compilation driver
/// creates before any module is processed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The global scope.
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ScopeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::GLOBAL {
            write!(f, "ScopeId::GLOBAL")
        } else {
            write!(f, "ScopeId({})", self.0)
        }
    }
}

/// Run of child ids in the arena's flat list storage.
///
/// Uses (start: u32, len: u16) so variable-length child lists (block
/// statements, parameters, members) don't each need their own `Vec`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.start as usize + self.len as usize
    }
}

impl fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRange({}..{})", self.start, self.start + u32::from(self.len))
    }
}

impl Default for NodeRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, NodeRange, ScopeId};
    crate::static_assert_size!(NodeId, 4);
    crate::static_assert_size!(ScopeId, 4);
    crate::static_assert_size!(NodeRange, 8);
}
