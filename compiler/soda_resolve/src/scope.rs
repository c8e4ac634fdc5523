//! Symbol tables and the scope tree.
//!
//! Scopes live in one flat arena, [`ScopeTree`], indexed by [`ScopeId`].
//! [`ScopeId::GLOBAL`] is always index 0 and is the only scope without a
//! parent. A scope's parent is fixed when it is allocated, so the chain
//! from any scope to the global scope is finite and acyclic.

use rustc_hash::FxHashMap;
use soda_ir::{Name, ScopeId, StringInterner};
use thiserror::Error;

use crate::{Symbol, SymbolKind};

/// Names the driver seeds into the global scope as builtins.
pub const DEFAULT_BUILTINS: &[&str] = &[
    "void", "bool", "char", "int", "uint", "float", "double", "string",
];

/// A second definition of a name in one scope.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("name is already bound to a {} in this scope", .existing.kind)]
pub struct AlreadyDefined {
    /// The binding that stays in place.
    pub existing: Symbol,
}

/// One scope's bindings plus its link to the enclosing scope.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    parent: Option<ScopeId>,
    bindings: FxHashMap<Name, Symbol>,
}

impl SymbolTable {
    fn with_parent(parent: Option<ScopeId>) -> Self {
        SymbolTable {
            parent,
            bindings: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Bind `name` in this scope only.
    ///
    /// Fails without touching the table if `name` is already bound here;
    /// enclosing scopes are not consulted.
    pub fn define(&mut self, name: Name, symbol: Symbol) -> Result<Symbol, AlreadyDefined> {
        match self.bindings.entry(name) {
            std::collections::hash_map::Entry::Occupied(entry) => Err(AlreadyDefined {
                existing: *entry.get(),
            }),
            std::collections::hash_map::Entry::Vacant(entry) => Ok(*entry.insert(symbol)),
        }
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<Symbol> {
        self.bindings.get(&name).copied()
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, Symbol)> + '_ {
        self.bindings.iter().map(|(&name, &sym)| (name, sym))
    }
}

/// Arena of every scope of a compilation.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<SymbolTable>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// A tree holding only an empty global scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![SymbolTable::with_parent(None)],
        }
    }

    /// A tree whose global scope binds each of `names` as a builtin.
    ///
    /// Names are interned in the module's interner so that identifiers
    /// parsed into the same arena resolve to them.
    pub fn with_builtins(interner: &mut StringInterner, names: &[&str]) -> Self {
        let mut tree = Self::new();
        for name in names {
            let name = interner.intern(name);
            // Duplicates in `names` keep the first entry.
            let _ = tree.define(ScopeId::GLOBAL, name, Symbol::builtin());
        }
        tree
    }

    /// Allocate a new, empty scope nested in `parent`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` scopes are allocated.
    pub fn alloc(&mut self, parent: ScopeId) -> ScopeId {
        let index = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("scope arena exceeded u32::MAX scopes"));
        self.scopes.push(SymbolTable::with_parent(Some(parent)));
        ScopeId::new(index)
    }

    #[inline]
    pub fn get(&self, scope: ScopeId) -> &SymbolTable {
        &self.scopes[scope.index()]
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.get(scope).parent
    }

    pub fn define(
        &mut self,
        scope: ScopeId,
        name: Name,
        symbol: Symbol,
    ) -> Result<Symbol, AlreadyDefined> {
        self.scopes[scope.index()].define(name, symbol)
    }

    /// Look `name` up in `scope`, then, if `recursive`, in each enclosing
    /// scope in turn. Returns the innermost binding.
    pub fn lookup(&self, scope: ScopeId, name: Name, recursive: bool) -> Option<Symbol> {
        if !recursive {
            return self.get(scope).get(name);
        }
        self.ancestors(scope).find_map(|s| self.get(s).get(name))
    }

    #[inline]
    pub fn is_defined(&self, scope: ScopeId, name: Name, recursive: bool) -> bool {
        self.lookup(scope, name, recursive).is_some()
    }

    /// `scope` followed by each enclosing scope up to and including the
    /// global scope.
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(scope),
        }
    }

    /// Number of scopes between `scope` and the global scope.
    pub fn depth(&self, scope: ScopeId) -> usize {
        self.ancestors(scope).count() - 1
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false: the global scope exists from construction.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Count of symbols of `kind` bound anywhere in the tree.
    pub fn count_kind(&self, kind: SymbolKind) -> usize {
        self.scopes
            .iter()
            .flat_map(SymbolTable::iter)
            .filter(|(_, sym)| sym.kind == kind)
            .count()
    }
}

/// Iterator over a scope chain, innermost first.
pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
