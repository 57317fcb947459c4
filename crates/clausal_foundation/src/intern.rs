//! Structural interning of atoms.
//!
//! Atoms built through an [`AtomTable`] are deduplicated: building a node or
//! link that is structurally equal to one already in the table returns the
//! existing [`Handle`]. Shared subtrees therefore share one allocation and
//! identity checks via [`Handle::ptr_eq`] agree with structural equality.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::sync::Arc;

use crate::atom::{Atom, AtomType, Handle};
use crate::error::{Error, Result};

impl Borrow<Atom> for Handle {
    fn borrow(&self) -> &Atom {
        self.atom()
    }
}

/// Interner for atoms and node names.
///
/// Not thread-safe; build a query's atoms on one thread, then share the
/// resulting handles freely.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    /// Node name storage.
    names: HashSet<Arc<str>>,
    /// Every interned atom.
    atoms: HashSet<Handle>,
}

impl AtomTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn intern_name(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(name) {
            return existing.clone();
        }
        let arc: Arc<str> = name.into();
        self.names.insert(arc.clone());
        arc
    }

    fn insert(&mut self, atom: Atom) -> Handle {
        if let Some(existing) = self.atoms.get(&atom) {
            return existing.clone();
        }
        let handle = Handle::from_atom(atom);
        self.atoms.insert(handle.clone());
        handle
    }

    /// Interns a node.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotANode`](crate::ErrorKind::NotANode) if `kind`
    /// is not a node type.
    pub fn node(&mut self, kind: AtomType, name: &str) -> Result<Handle> {
        if !kind.is_node() {
            return Err(Error::not_a_node(kind));
        }
        let name = self.intern_name(name);
        Ok(self.insert(Atom::Node { kind, name }))
    }

    /// Interns a link. Children are interned first.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotALink`](crate::ErrorKind::NotALink) if `kind`
    /// is not a link type.
    pub fn link(&mut self, kind: AtomType, outgoing: Vec<Handle>) -> Result<Handle> {
        if !kind.is_link() {
            return Err(Error::not_a_link(kind));
        }
        let outgoing = outgoing.iter().map(|h| self.intern(h)).collect();
        Ok(self.insert(Atom::Link { kind, outgoing }))
    }

    /// Interns a quote around `inner`.
    pub fn quote(&mut self, inner: &Handle) -> Handle {
        let inner = self.intern(inner);
        self.insert(Atom::Quote(inner))
    }

    /// Interns a variable node.
    pub fn variable(&mut self, name: &str) -> Handle {
        let name = self.intern_name(name);
        self.insert(Atom::Node {
            kind: AtomType::Variable,
            name,
        })
    }

    /// Returns the canonical handle for an arbitrary atom tree, interning
    /// any part of it not yet in the table.
    pub fn intern(&mut self, handle: &Handle) -> Handle {
        if let Some(existing) = self.atoms.get(handle) {
            return existing.clone();
        }
        let atom = match handle.atom() {
            Atom::Node { kind, name } => Atom::Node {
                kind: *kind,
                name: self.intern_name(name),
            },
            Atom::Link { kind, outgoing } => Atom::Link {
                kind: *kind,
                outgoing: outgoing.iter().map(|h| self.intern(h)).collect(),
            },
            Atom::Quote(inner) => Atom::Quote(self.intern(inner)),
        };
        self.insert(atom)
    }

    /// Returns true if a structurally equal atom is already interned.
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.atoms.contains(handle)
    }

    /// Returns the number of interned atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns true if the table holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the number of distinct node names.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}
