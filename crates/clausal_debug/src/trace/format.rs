//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;

use clausal_foundation::Handle;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "Q{:04} ", record.query);

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        let event_str = match &record.event {
            TraceEvent::DecompositionStart { clauses, variables } => {
                format!("=== DECOMPOSE {clauses} clauses, {variables} variables ===")
            }
            TraceEvent::DecompositionEnd {
                constants,
                components,
            } => {
                format!("=== DONE {constants} constants, {components} components ===")
            }
            TraceEvent::ConstantRemoved { clause } => {
                format!("  CONSTANT {clause}")
            }
            TraceEvent::ClauseRetained { clause, reason } => {
                format!("  RETAIN ({reason}) {clause}")
            }
            TraceEvent::PassStart { pass, pending } => {
                format!("  >> pass {pass} ({pending} pending)")
            }
            TraceEvent::ClauseAttached { component, clause } => {
                format!("    ATTACH #{component} {clause}")
            }
            TraceEvent::ComponentSeeded { component, clause } => {
                format!("    SEED #{component} {clause}")
            }
        };

        format!("{prefix}{event_str}")
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to put each record of a batch on its own line.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if u32::from(c) < 0x20 => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }

    /// Formats a clause as a JSON string holding its s-expression.
    fn format_clause(clause: &Handle) -> String {
        format!("\"{}\"", Self::escape_string(&clause.to_string()))
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let event_data = match &record.event {
            TraceEvent::DecompositionStart { clauses, variables } => {
                format!("\"clauses\":{clauses},\"variables\":{variables}")
            }
            TraceEvent::DecompositionEnd {
                constants,
                components,
            } => {
                format!("\"constants\":{constants},\"components\":{components}")
            }
            TraceEvent::ConstantRemoved { clause } => {
                format!("\"clause\":{}", Self::format_clause(clause))
            }
            TraceEvent::ClauseRetained { clause, reason } => {
                format!(
                    "\"clause\":{},\"reason\":\"{reason}\"",
                    Self::format_clause(clause)
                )
            }
            TraceEvent::PassStart { pass, pending } => {
                format!("\"pass\":{pass},\"pending\":{pending}")
            }
            TraceEvent::ClauseAttached { component, clause }
            | TraceEvent::ComponentSeeded { component, clause } => {
                format!(
                    "\"component\":{component},\"clause\":{}",
                    Self::format_clause(clause)
                )
            }
        };

        format!(
            "{{\"id\":{},\"query\":{},\"timestamp_ns\":{},\"type\":\"{}\",{}}}",
            record.id,
            record.query,
            record.timestamp_ns,
            record.event_type(),
            event_data
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
