//! Integration tests for Layer 0: Foundation
//!
//! Tests for atoms, the reader and printer, interning, variables, and errors.

mod atoms;
mod reader;
mod variables;
