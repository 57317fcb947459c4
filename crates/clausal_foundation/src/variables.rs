//! Declared query variables and index-keyed variable sets.
//!
//! A query declares its variables once, up front, in a [`Variables`] table.
//! Each variable gets a dense [`VarIndex`] in declaration order, and every
//! per-clause or per-component variable set is a [`VarSet`] bitset over those
//! indices. Iterating a set therefore always yields declaration order.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::atom::Handle;
use crate::error::{Error, ErrorKind, Result};

const WORD_BITS: usize = u64::BITS as usize;

/// Index of a declared variable within its [`Variables`] table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarIndex(pub(crate) u32);

impl VarIndex {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    const fn slot(self) -> (usize, u64) {
        let i = self.0 as usize;
        (i / WORD_BITS, 1 << (i % WORD_BITS))
    }
}

impl fmt::Debug for VarIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarIndex({})", self.0)
    }
}

// =============================================================================
// Declared Variables
// =============================================================================

/// Order-preserving set of the variables a query declares.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    /// Variables in declaration order; position is the [`VarIndex`].
    handles: Vec<Handle>,
    /// Map from variable to its index.
    index: HashMap<Handle, VarIndex>,
}

impl Variables {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares every handle in order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotAVariable`] if any handle is not a variable.
    pub fn from_handles<I>(handles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Handle>,
    {
        let mut vars = Self::new();
        for handle in handles {
            vars.declare(handle)?;
        }
        Ok(vars)
    }

    /// Declares a variable, returning its index.
    ///
    /// Declaring an already-declared variable returns the existing index.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotAVariable`] if `handle` is not a variable.
    pub fn declare(&mut self, handle: Handle) -> Result<VarIndex> {
        if !handle.is_variable() {
            return Err(Error::not_a_variable(handle.to_string()));
        }
        if let Some(&idx) = self.index.get(&handle) {
            return Ok(idx);
        }

        let raw = u32::try_from(self.handles.len())
            .map_err(|_| Error::new(ErrorKind::Internal("too many variables".to_string())))?;
        let idx = VarIndex(raw);
        self.handles.push(handle.clone());
        self.index.insert(handle, idx);
        Ok(idx)
    }

    /// Returns the index of a declared variable.
    #[must_use]
    pub fn index_of(&self, handle: &Handle) -> Option<VarIndex> {
        self.index.get(handle).copied()
    }

    /// Returns the variable at `idx`.
    #[must_use]
    pub fn get(&self, idx: VarIndex) -> Option<&Handle> {
        self.handles.get(idx.0 as usize)
    }

    /// Returns true if `handle` is declared.
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.index.contains_key(handle)
    }

    /// Returns the number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates the declared variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }

    /// Returns the set of every declared variable.
    #[must_use]
    pub fn all(&self) -> VarSet {
        (0..self.handles.len())
            .filter_map(|i| u32::try_from(i).ok().map(VarIndex))
            .collect()
    }

    /// Resolves a set back to handles, in declaration order.
    ///
    /// The handles borrow from the declaration only, so `set` may be a
    /// temporary.
    pub fn resolve<'a, 's>(
        &'a self,
        set: &'s VarSet,
    ) -> impl Iterator<Item = &'a Handle> + use<'a, 's> {
        set.iter().filter_map(|idx| self.get(idx))
    }
}

// =============================================================================
// Variable Sets
// =============================================================================

/// Bitset of [`VarIndex`] values.
///
/// Membership and insertion are O(1); union and intersection tests are
/// linear in the number of 64-bit words, which for query-sized variable
/// counts is one or two.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarSet {
    words: Vec<u64>,
}

impl VarSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set sized for `vars` variables.
    #[must_use]
    pub fn with_capacity(vars: usize) -> Self {
        Self {
            words: Vec::with_capacity(vars.div_ceil(WORD_BITS)),
        }
    }

    /// Inserts `idx`, returning true if it was not already present.
    pub fn insert(&mut self, idx: VarIndex) -> bool {
        let (word, bit) = idx.slot();
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        fresh
    }

    /// Returns true if `idx` is present.
    #[must_use]
    pub fn contains(&self, idx: VarIndex) -> bool {
        let (word, bit) = idx.slot();
        self.words.get(word).is_some_and(|w| w & bit != 0)
    }

    /// Adds every member of `other` to this set.
    pub fn union_with(&mut self, other: &VarSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            *mine |= theirs;
        }
    }

    /// Returns true if the sets share at least one member.
    #[must_use]
    pub fn intersects(&self, other: &VarSet) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(a, b)| a & b != 0)
    }

    /// Returns true if the sets share no member.
    #[must_use]
    pub fn is_disjoint(&self, other: &VarSet) -> bool {
        !self.intersects(other)
    }

    /// Returns true if every member of this set is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &VarSet) -> bool {
        self.words.iter().enumerate().all(|(i, w)| {
            let theirs = other.words.get(i).copied().unwrap_or(0);
            w & !theirs == 0
        })
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Iterates members in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = VarIndex> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let base = i * WORD_BITS;
            (0..WORD_BITS)
                .filter(move |bit| word & (1 << bit) != 0)
                .filter_map(move |bit| u32::try_from(base + bit).ok().map(VarIndex))
        })
    }
}

impl PartialEq for VarSet {
    fn eq(&self, other: &Self) -> bool {
        let len = self.words.len().max(other.words.len());
        (0..len).all(|i| {
            self.words.get(i).copied().unwrap_or(0) == other.words.get(i).copied().unwrap_or(0)
        })
    }
}

impl Eq for VarSet {}

impl FromIterator<VarIndex> for VarSet {
    fn from_iter<I: IntoIterator<Item = VarIndex>>(iter: I) -> Self {
        let mut set = Self::new();
        for idx in iter {
            set.insert(idx);
        }
        set
    }
}

impl Extend<VarIndex> for VarSet {
    fn extend<I: IntoIterator<Item = VarIndex>>(&mut self, iter: I) {
        for idx in iter {
            self.insert(idx);
        }
    }
}

impl fmt::Debug for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(VarIndex::index)).finish()
    }
}
