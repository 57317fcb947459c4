//! Clausal - query clause decomposition
//!
//! This crate re-exports all layers of the Clausal system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: clausal_debug       - Tracing of decomposition steps
//! Layer 1: clausal_engine      - Constant removal, component partitioning
//! Layer 0: clausal_foundation  - Atoms, variables, reader, errors
//! ```

pub use clausal_debug as debug;
pub use clausal_engine as engine;
pub use clausal_foundation as foundation;
