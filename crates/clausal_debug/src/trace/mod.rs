//! Tracing of clause decomposition.
//!
//! A [`Tracer`] is a [`DecompositionObserver`]: hand it to
//! [`Decomposer::decompose_observed`](clausal_engine::Decomposer::decompose_observed)
//! and every classification and partitioning step lands in its
//! [`TraceBuffer`], grouped by query. Recording costs one branch when the
//! tracer is disabled.
//!
//! # Example
//!
//! ```
//! use clausal_debug::{Tracer, TracerConfig};
//! use clausal_engine::Decomposer;
//! use clausal_foundation::{Handle, Variables};
//!
//! let x = Handle::variable("$x");
//! let vars = Variables::from_handles([x.clone()]).unwrap();
//! let clauses = [Handle::evaluation(Handle::predicate("P"), vec![x])];
//!
//! let mut tracer = Tracer::new(TracerConfig::new().enabled());
//! Decomposer::default()
//!     .decompose_observed(&vars, &clauses, &mut tracer)
//!     .unwrap();
//!
//! assert_eq!(tracer.current_query(), 1);
//! assert_eq!(tracer.buffer().by_event_type("component-seeded").len(), 1);
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use clausal_engine::{DecompositionObserver, RetainReason};
use clausal_foundation::Handle;

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Whether to echo each kept record to stderr as it is recorded.
    pub echo_stderr: bool,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10000,
            echo_stderr: false,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to echo records to stderr.
    ///
    /// Has no effect unless tracing is enabled.
    #[must_use]
    pub fn echo_to_stderr(mut self) -> Self {
        self.echo_stderr = true;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to filter event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records decomposition events.
///
/// Each `decomposition_started` event opens a new query number; every
/// following record carries it until the next one.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_query: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_query: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new().with_timestamps(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Returns the number of the current query, 0 before the first one.
    #[must_use]
    pub fn current_query(&self) -> u64 {
        self.current_query
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Records a trace event under the current query.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|t| t == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_query, timestamp_ns, event);

        if self.config.echo_stderr {
            if let Some(record) = self.buffer.last() {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Returns the buffered records of the current query.
    #[must_use]
    pub fn current_records(&self) -> Vec<&TraceRecord> {
        self.buffer.records_for_query(self.current_query)
    }

    /// Returns the clauses of `component` in the current query, in the order
    /// they joined it.
    #[must_use]
    pub fn current_component(&self, component: usize) -> Vec<&Handle> {
        self.buffer.component_clauses(self.current_query, component)
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DecompositionObserver for Tracer {
    fn decomposition_started(&mut self, clauses: usize, variables: usize) {
        self.current_query += 1;
        self.record(TraceEvent::DecompositionStart { clauses, variables });
    }

    fn constant_removed(&mut self, clause: &Handle) {
        self.record(TraceEvent::ConstantRemoved {
            clause: clause.clone(),
        });
    }

    fn clause_retained(&mut self, clause: &Handle, reason: RetainReason) {
        self.record(TraceEvent::ClauseRetained {
            clause: clause.clone(),
            reason,
        });
    }

    fn pass_started(&mut self, pass: usize, pending: usize) {
        self.record(TraceEvent::PassStart { pass, pending });
    }

    fn clause_attached(&mut self, component: usize, clause: &Handle) {
        self.record(TraceEvent::ClauseAttached {
            component,
            clause: clause.clone(),
        });
    }

    fn component_seeded(&mut self, component: usize, clause: &Handle) {
        self.record(TraceEvent::ComponentSeeded {
            component,
            clause: clause.clone(),
        });
    }

    fn decomposition_finished(&mut self, constants: usize, components: usize) {
        self.record(TraceEvent::DecompositionEnd {
            constants,
            components,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
