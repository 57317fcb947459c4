//! Trace event and record types.
//!
//! This module defines the events that can be traced during decomposition.

use clausal_engine::RetainReason;
use clausal_foundation::Handle;

// =============================================================================
// Trace Event
// =============================================================================

/// Events that can be traced during decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A decomposition has started.
    DecompositionStart {
        /// Number of input clauses.
        clauses: usize,
        /// Number of declared variables.
        variables: usize,
    },

    /// A decomposition has finished.
    DecompositionEnd {
        /// Number of constant clauses removed.
        constants: usize,
        /// Number of components produced.
        components: usize,
    },

    /// A clause was classified constant and removed.
    ConstantRemoved {
        /// The removed clause.
        clause: Handle,
    },

    /// A clause was kept in the active pattern.
    ClauseRetained {
        /// The kept clause.
        clause: Handle,
        /// Why it was kept.
        reason: RetainReason,
    },

    /// A partitioning pass has started.
    PassStart {
        /// Pass number, from 1.
        pass: usize,
        /// Clauses not yet placed.
        pending: usize,
    },

    /// A clause joined an existing component.
    ClauseAttached {
        /// Component index.
        component: usize,
        /// The attached clause.
        clause: Handle,
    },

    /// A clause seeded a new component.
    ComponentSeeded {
        /// Index of the new component.
        component: usize,
        /// The seeding clause.
        clause: Handle,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DecompositionStart { .. } => "decomposition-start",
            Self::DecompositionEnd { .. } => "decomposition-end",
            Self::ConstantRemoved { .. } => "constant-removed",
            Self::ClauseRetained { .. } => "clause-retained",
            Self::PassStart { .. } => "pass-start",
            Self::ClauseAttached { .. } => "clause-attached",
            Self::ComponentSeeded { .. } => "component-seeded",
        }
    }

    /// Returns true if this is a query boundary event.
    #[must_use]
    pub fn is_query_boundary(&self) -> bool {
        matches!(
            self,
            Self::DecompositionStart { .. } | Self::DecompositionEnd { .. }
        )
    }

    /// Returns true if this is a classification event.
    #[must_use]
    pub fn is_classification_event(&self) -> bool {
        matches!(
            self,
            Self::ConstantRemoved { .. } | Self::ClauseRetained { .. }
        )
    }

    /// Returns true if this is a partitioning event.
    #[must_use]
    pub fn is_partition_event(&self) -> bool {
        matches!(
            self,
            Self::PassStart { .. } | Self::ClauseAttached { .. } | Self::ComponentSeeded { .. }
        )
    }

    /// Returns the clause this event concerns, if any.
    #[must_use]
    pub fn clause(&self) -> Option<&Handle> {
        match self {
            Self::ConstantRemoved { clause }
            | Self::ClauseRetained { clause, .. }
            | Self::ClauseAttached { clause, .. }
            | Self::ComponentSeeded { clause, .. } => Some(clause),
            _ => None,
        }
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The query (decomposition) this event belongs to, from 1.
    pub query: u64,
    /// Timestamp in nanoseconds since session start.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, query: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            query,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
