//! Integration tests for Layer 1: Engine
//!
//! Tests for constant removal, component partitioning, and full
//! decomposition, including property tests of the partition invariants.

mod decomposition;
mod properties;
