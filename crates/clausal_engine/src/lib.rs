//! Query-clause decomposition for Clausal.
//!
//! This crate provides:
//! - [`ClauseClassifier`] - Separates constant clauses from the active pattern
//! - [`ComponentPartitioner`] - Groups clauses into connected components
//! - [`Decomposer`] - Runs both under a [`DecomposeConfig`]
//! - [`DecompositionObserver`] - Hooks for tracing each step

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod config;
pub mod decompose;
pub mod observer;
pub mod partition;

pub use classify::{Classification, ClauseClassifier, remove_constants};
pub use config::{DecomposeConfig, SeedChoice};
pub use decompose::{Decomposer, Decomposition};
pub use observer::{DecompositionObserver, NoopObserver, RetainReason};
pub use partition::{Component, ComponentPartitioner, components_are_separated};
