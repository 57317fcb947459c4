//! Integration tests for Layer 2: Debug
//!
//! Tests for tracing real decompositions.

mod tracing;
