//! Atoms, variables, and structure queries for Clausal.
//!
//! This crate provides:
//! - [`Handle`] / [`Atom`] - Immutable, shared hypergraph atoms
//! - [`AtomType`] - Type tags, including the opaque marker set
//! - [`AtomTable`] - Structural interning of atoms
//! - [`Variables`] / [`VarSet`] - Declared query variables and bitsets over them
//! - Structure queries ([`any_unquoted_in_tree`], [`contains_atomtype`], [`free_variables`])
//! - An s-expression reader ([`parse_atom`]) and printer
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod atom;
pub mod error;
pub mod find;
pub mod intern;
pub mod pretty;
pub mod reader;
pub mod variables;

pub use atom::{Atom, AtomType, Handle};
pub use error::{Error, ErrorContext, ErrorKind, Result, SemanticLimit};
pub use find::{any_unquoted_in_tree, contains_atomtype, contains_opaque, first_opaque, free_variables};
pub use intern::AtomTable;
pub use pretty::{PrettyConfig, print_all};
pub use reader::{parse_atom, parse_atoms};
pub use variables::{VarIndex, VarSet, Variables};
