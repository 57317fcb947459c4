//! Ring buffer for trace records.
//!
//! Keeps the most recent trace records, indexed by the query (decomposition
//! call) they belong to.

use std::collections::{HashMap, VecDeque};

use clausal_engine::RetainReason;
use clausal_foundation::Handle;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Buffer
// =============================================================================

/// A ring buffer for storing trace records.
///
/// Maintains a fixed maximum size, discarding oldest records when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    /// The records, oldest first.
    records: VecDeque<TraceRecord>,
    /// Maximum number of records to store.
    max_size: usize,
    /// Next record ID to assign.
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a new trace buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Creates a buffer with default size (10000 records).
    #[must_use]
    pub fn default_size() -> Self {
        Self::new(10000)
    }

    /// Pushes a new event to the buffer.
    ///
    /// Returns the assigned record ID.
    pub fn push(&mut self, query: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records
            .push_back(TraceRecord::new(id, query, timestamp_ns, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
        }

        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records from the buffer.
    ///
    /// Record IDs keep increasing across clears.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns the most recently pushed record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Returns records for a specific query.
    #[must_use]
    pub fn records_for_query(&self, query: u64) -> Vec<&TraceRecord> {
        self.filter(|r| r.query == query)
    }

    /// Replays the partition events of `query` and returns the clauses of
    /// `component` in the order they joined it.
    ///
    /// Matches the component's clause list as long as none of the query's
    /// records were evicted or filtered out.
    #[must_use]
    pub fn component_clauses(&self, query: u64, component: usize) -> Vec<&Handle> {
        self.records
            .iter()
            .filter(|r| r.query == query)
            .filter_map(|r| match &r.event {
                TraceEvent::ComponentSeeded {
                    component: c,
                    clause,
                }
                | TraceEvent::ClauseAttached {
                    component: c,
                    clause,
                } if *c == component => Some(clause),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of components seeded during `query`.
    #[must_use]
    pub fn component_count(&self, query: u64) -> usize {
        self.records
            .iter()
            .filter(|r| r.query == query && r.event_type() == "component-seeded")
            .count()
    }

    /// Returns the constant clauses removed during `query`, in input order.
    #[must_use]
    pub fn removed_constants(&self, query: u64) -> Vec<&Handle> {
        self.records
            .iter()
            .filter(|r| r.query == query)
            .filter_map(|r| match &r.event {
                TraceEvent::ConstantRemoved { clause } => Some(clause),
                _ => None,
            })
            .collect()
    }

    /// Returns the clauses kept during `query` with the reason for each.
    #[must_use]
    pub fn retained_clauses(&self, query: u64) -> Vec<(&Handle, RetainReason)> {
        self.records
            .iter()
            .filter(|r| r.query == query)
            .filter_map(|r| match &r.event {
                TraceEvent::ClauseRetained { clause, reason } => Some((clause, *reason)),
                _ => None,
            })
            .collect()
    }

    /// Returns true if the buffer holds the end record of `query`.
    ///
    /// A query that failed part way stays open.
    #[must_use]
    pub fn is_finished(&self, query: u64) -> bool {
        self.records.iter().any(|r| {
            r.query == query && matches!(r.event, TraceEvent::DecompositionEnd { .. })
        })
    }

    /// Returns the most recent N records.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&TraceRecord>
    where
        F: Fn(&TraceRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the oldest query number in the buffer.
    #[must_use]
    pub fn oldest_query(&self) -> Option<u64> {
        self.records.front().map(|r| r.query)
    }

    /// Returns the newest query number in the buffer.
    #[must_use]
    pub fn newest_query(&self) -> Option<u64> {
        self.records.back().map(|r| r.query)
    }

    /// Returns all distinct query numbers in the buffer, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<u64> {
        let mut queries: Vec<u64> = self.records.iter().map(|r| r.query).collect();
        queries.dedup();
        queries
    }

    /// Returns statistics about the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts = HashMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }

        let queries = self.queries();
        let open_queries = queries.iter().filter(|q| !self.is_finished(**q)).count();

        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            oldest_query: self.oldest_query(),
            newest_query: self.newest_query(),
            query_count: queries.len(),
            open_queries,
            event_counts,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::default_size()
    }
}

// =============================================================================
// Buffer Statistics
// =============================================================================

/// Statistics about a trace buffer.
#[derive(Clone, Debug)]
pub struct TraceBufferStats {
    /// Number of records currently in buffer.
    pub record_count: usize,
    /// Maximum buffer size.
    pub max_size: usize,
    /// Oldest query in buffer.
    pub oldest_query: Option<u64>,
    /// Newest query in buffer.
    pub newest_query: Option<u64>,
    /// Number of distinct queries.
    pub query_count: usize,
    /// Queries with no end record, either failed or still running.
    pub open_queries: usize,
    /// Count of each event type.
    pub event_counts: HashMap<&'static str, usize>,
}

// =============================================================================
// Tests
// =============================================================================
