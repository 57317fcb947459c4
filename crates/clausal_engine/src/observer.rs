//! Observation hooks for decomposition.
//!
//! The classifier, partitioner, and decomposer report what they do to a
//! [`DecompositionObserver`]. Every method has an empty default, so an
//! observer only overrides the events it cares about, and [`NoopObserver`]
//! costs nothing.

use std::fmt;

use clausal_foundation::{AtomType, Handle};

/// Why the classifier kept a clause in the active pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetainReason {
    /// The clause has at least one unquoted declared variable.
    Variables,
    /// The clause is variable-free but contains this opaque marker.
    Opaque(AtomType),
}

impl fmt::Display for RetainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variables => write!(f, "variables"),
            Self::Opaque(ty) => write!(f, "opaque {ty}"),
        }
    }
}

/// Receives decomposition events.
pub trait DecompositionObserver {
    /// A decomposition of `clauses` clauses over `variables` declared
    /// variables is starting.
    fn decomposition_started(&mut self, _clauses: usize, _variables: usize) {}

    /// The classifier removed a constant clause.
    fn constant_removed(&mut self, _clause: &Handle) {}

    /// The classifier kept a clause.
    fn clause_retained(&mut self, _clause: &Handle, _reason: RetainReason) {}

    /// A partitioning pass over `pending` clauses is starting. Passes are
    /// numbered from 1.
    fn pass_started(&mut self, _pass: usize, _pending: usize) {}

    /// A clause joined an existing component.
    fn clause_attached(&mut self, _component: usize, _clause: &Handle) {}

    /// A clause seeded a new component.
    fn component_seeded(&mut self, _component: usize, _clause: &Handle) {}

    /// A decomposition finished.
    fn decomposition_finished(&mut self, _constants: usize, _components: usize) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl DecompositionObserver for NoopObserver {}
