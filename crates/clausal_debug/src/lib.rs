//! Tracing for Clausal.
//!
//! This crate provides:
//! - [`Tracer`] - A [`DecompositionObserver`](clausal_engine::DecompositionObserver)
//!   that records every decomposition step
//! - [`TraceBuffer`] - Ring buffer of trace records indexed by query
//! - [`HumanFormatter`] / [`JsonFormatter`] - Trace output formats

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter,
    TraceRecord, Tracer, TracerConfig,
};
