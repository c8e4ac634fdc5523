//! Node arena.
//!
//! The arena exclusively owns every node of a module together with the
//! flat child-list storage and the module's string interner. It outlives
//! the scope pass and every later pass that reads the annotations.

use std::fmt;

use crate::ast::{Node, NodeKind};
use crate::{Name, NodeId, NodeRange, Span, StringInterner};

/// Arena of syntax tree nodes.
#[derive(Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    lists: Vec<NodeId>,
    interner: StringInterner,
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: Vec::new(),
            lists: Vec::new(),
            interner: StringInterner::new(),
        }
    }

    /// Create an arena that reuses an existing interner.
    pub fn with_interner(interner: StringInterner) -> Self {
        Ast {
            nodes: Vec::new(),
            lists: Vec::new(),
            interner,
        }
    }

    /// Allocate a node.
    ///
    /// # Panics
    /// Panics if the arena holds more than `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("node arena exceeded u32::MAX nodes"));
        self.nodes.push(Node::new(kind, span));
        NodeId::new(index)
    }

    /// Store a list of child ids and return its range.
    ///
    /// # Panics
    /// Panics if the list has more than `u16::MAX` entries.
    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = u32::try_from(self.lists.len())
            .unwrap_or_else(|_| panic!("child list storage exceeded u32::MAX entries"));
        self.lists.extend(ids);
        let len = self.lists.len() - start as usize;
        let len = u16::try_from(len)
            .unwrap_or_else(|_| panic!("child list of {len} entries exceeds u16::MAX"));
        NodeRange::new(start, len)
    }

    /// Ids stored under `range`.
    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        &self.lists[range.to_range()]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in allocation order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "alloc() guarantees the node count fits in u32"
    )]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(i as u32))
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// The string a name was interned from.
    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }
}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ast")
            .field("nodes", &self.nodes.len())
            .field("lists", &self.lists.len())
            .finish_non_exhaustive()
    }
}
