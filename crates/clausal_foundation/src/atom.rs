//! Atoms, type tags, and shared handles.
//!
//! An [`Atom`] is an immutable hypergraph node: a named leaf, a link over an
//! ordered outgoing set, or a quoting wrapper. Atoms are always held through
//! a [`Handle`], which shares the underlying allocation.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

// =============================================================================
// Atom Types
// =============================================================================

/// Type tag of an atom.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AtomType {
    /// A plain named concept.
    Concept,
    /// A named predicate.
    Predicate,
    /// A named schema (function).
    Schema,
    /// A numeric literal, stored by its textual form.
    Number,
    /// A free query variable.
    Variable,
    /// Reference to a predicate defined elsewhere; resolved at runtime.
    DefinedPredicate,
    /// Reference to a schema defined elsewhere; resolved at runtime.
    DefinedSchema,
    /// Externally executable predicate.
    GroundedPredicate,
    /// Externally executable schema.
    GroundedSchema,
    /// Ordered argument list.
    List,
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Negation.
    Not,
    /// Predicate applied to arguments.
    Evaluation,
    /// Schema applied to arguments.
    Execution,
    /// Inheritance relation.
    Inheritance,
    /// Set membership relation.
    Member,
    /// Identity comparison.
    Identical,
    /// Equality comparison.
    Equal,
    /// Quoting wrapper.
    Quote,
}

impl AtomType {
    /// Every atom type, in declaration order.
    pub const ALL: [AtomType; 20] = [
        Self::Concept,
        Self::Predicate,
        Self::Schema,
        Self::Number,
        Self::Variable,
        Self::DefinedPredicate,
        Self::DefinedSchema,
        Self::GroundedPredicate,
        Self::GroundedSchema,
        Self::List,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Evaluation,
        Self::Execution,
        Self::Inheritance,
        Self::Member,
        Self::Identical,
        Self::Equal,
        Self::Quote,
    ];

    /// Types whose presence makes a clause opaque to structural matching.
    ///
    /// A clause containing any of these must stay in the active pattern even
    /// when it has no variables: its truth depends on runtime evaluation.
    pub const OPAQUE: [AtomType; 6] = [
        Self::DefinedPredicate,
        Self::DefinedSchema,
        Self::GroundedPredicate,
        Self::GroundedSchema,
        Self::Identical,
        Self::Equal,
    ];

    /// Returns true for node (leaf) types.
    #[must_use]
    pub const fn is_node(self) -> bool {
        matches!(
            self,
            Self::Concept
                | Self::Predicate
                | Self::Schema
                | Self::Number
                | Self::Variable
                | Self::DefinedPredicate
                | Self::DefinedSchema
                | Self::GroundedPredicate
                | Self::GroundedSchema
        )
    }

    /// Returns true for link (compound) types.
    #[must_use]
    pub const fn is_link(self) -> bool {
        !self.is_node() && !matches!(self, Self::Quote)
    }

    /// Returns true if this type is one of the [`OPAQUE`](Self::OPAQUE) markers.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        matches!(
            self,
            Self::DefinedPredicate
                | Self::DefinedSchema
                | Self::GroundedPredicate
                | Self::GroundedSchema
                | Self::Identical
                | Self::Equal
        )
    }

    /// Returns the canonical name, e.g. `ConceptNode` or `EqualLink`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Concept => "ConceptNode",
            Self::Predicate => "PredicateNode",
            Self::Schema => "SchemaNode",
            Self::Number => "NumberNode",
            Self::Variable => "VariableNode",
            Self::DefinedPredicate => "DefinedPredicateNode",
            Self::DefinedSchema => "DefinedSchemaNode",
            Self::GroundedPredicate => "GroundedPredicateNode",
            Self::GroundedSchema => "GroundedSchemaNode",
            Self::List => "ListLink",
            Self::And => "AndLink",
            Self::Or => "OrLink",
            Self::Not => "NotLink",
            Self::Evaluation => "EvaluationLink",
            Self::Execution => "ExecutionLink",
            Self::Inheritance => "InheritanceLink",
            Self::Member => "MemberLink",
            Self::Identical => "IdenticalLink",
            Self::Equal => "EqualLink",
            Self::Quote => "QuoteLink",
        }
    }

    /// Looks up a type by name.
    ///
    /// Accepts the canonical name (`ConceptNode`) and the short form without
    /// the `Node`/`Link` suffix (`Concept`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| {
            let canonical = ty.name();
            canonical == name
                || canonical
                    .strip_suffix("Node")
                    .or_else(|| canonical.strip_suffix("Link"))
                    == Some(name)
        })
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Atoms
// =============================================================================

/// An immutable hypergraph node.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Atom {
    /// A named leaf.
    Node {
        /// Node type; always satisfies [`AtomType::is_node`].
        kind: AtomType,
        /// Node name.
        name: Arc<str>,
    },
    /// A compound atom over an ordered outgoing set.
    Link {
        /// Link type; always satisfies [`AtomType::is_link`].
        kind: AtomType,
        /// Ordered children.
        outgoing: Vec<Handle>,
    },
    /// Quoting wrapper: variables below it are literal.
    Quote(Handle),
}

impl Atom {
    /// Returns the type tag of this atom.
    #[must_use]
    pub fn atom_type(&self) -> AtomType {
        match self {
            Self::Node { kind, .. } | Self::Link { kind, .. } => *kind,
            Self::Quote(_) => AtomType::Quote,
        }
    }

    /// Structural hash. Children contribute their cached hashes, so this is
    /// linear in the number of direct children.
    fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self {
            Self::Node { kind, name } => {
                0u8.hash(&mut hasher);
                kind.hash(&mut hasher);
                name.hash(&mut hasher);
            }
            Self::Link { kind, outgoing } => {
                1u8.hash(&mut hasher);
                kind.hash(&mut hasher);
                outgoing.len().hash(&mut hasher);
                for child in outgoing {
                    hasher.write_u64(child.0.hash);
                }
            }
            Self::Quote(inner) => {
                2u8.hash(&mut hasher);
                hasher.write_u64(inner.0.hash);
            }
        }
        hasher.finish()
    }
}

// Must agree with `Hash for Handle`: interning looks handles up by atom.
impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

// =============================================================================
// Handles
// =============================================================================

/// Shared reference to an [`Atom`].
///
/// Cloning is O(1). Equality and hashing are structural; use
/// [`Handle::ptr_eq`] for identity. The structural hash is computed once,
/// when the handle is built.
#[derive(Clone)]
pub struct Handle(Arc<Shared>);

struct Shared {
    atom: Atom,
    hash: u64,
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.hash == other.0.hash && self.0.atom == other.0.atom)
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

#[cfg(feature = "serde")]
impl Serialize for Handle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.atom.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Atom::deserialize(deserializer).map(Self::from_atom)
    }
}

impl Handle {
    /// Wraps an atom in a fresh handle.
    ///
    /// Prefer the checked constructors; this one trusts the caller to have
    /// paired node types with `Node` and link types with `Link`.
    #[must_use]
    pub(crate) fn from_atom(atom: Atom) -> Self {
        let hash = atom.structural_hash();
        Self(Arc::new(Shared { atom, hash }))
    }

    /// Creates a node.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotANode`](crate::ErrorKind::NotANode) if `kind`
    /// is a link or wrapper type.
    pub fn node(kind: AtomType, name: impl Into<Arc<str>>) -> Result<Self> {
        if !kind.is_node() {
            return Err(Error::not_a_node(kind));
        }
        Ok(Self::from_atom(Atom::Node {
            kind,
            name: name.into(),
        }))
    }

    /// Creates a link.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotALink`](crate::ErrorKind::NotALink) if `kind`
    /// is a node or wrapper type.
    pub fn link(kind: AtomType, outgoing: Vec<Handle>) -> Result<Self> {
        if !kind.is_link() {
            return Err(Error::not_a_link(kind));
        }
        Ok(Self::from_atom(Atom::Link { kind, outgoing }))
    }

    /// Wraps `inner` in a quote.
    #[must_use]
    pub fn quote(inner: Handle) -> Self {
        Self::from_atom(Atom::Quote(inner))
    }

    // -------------------------------------------------------------------------
    // Shorthand constructors
    // -------------------------------------------------------------------------

    fn leaf(kind: AtomType, name: &str) -> Self {
        Self::from_atom(Atom::Node {
            kind,
            name: name.into(),
        })
    }

    fn compound(kind: AtomType, outgoing: Vec<Handle>) -> Self {
        Self::from_atom(Atom::Link { kind, outgoing })
    }

    /// `(VariableNode name)`
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self::leaf(AtomType::Variable, name)
    }

    /// `(ConceptNode name)`
    #[must_use]
    pub fn concept(name: &str) -> Self {
        Self::leaf(AtomType::Concept, name)
    }

    /// `(PredicateNode name)`
    #[must_use]
    pub fn predicate(name: &str) -> Self {
        Self::leaf(AtomType::Predicate, name)
    }

    /// `(NumberNode n)`
    #[must_use]
    pub fn number(n: i64) -> Self {
        Self::leaf(AtomType::Number, &n.to_string())
    }

    /// `(ListLink items...)`
    #[must_use]
    pub fn list(items: Vec<Handle>) -> Self {
        Self::compound(AtomType::List, items)
    }

    /// `(AndLink clauses...)`
    #[must_use]
    pub fn and(clauses: Vec<Handle>) -> Self {
        Self::compound(AtomType::And, clauses)
    }

    /// `(EvaluationLink predicate (ListLink args...))`
    #[must_use]
    pub fn evaluation(predicate: Handle, args: Vec<Handle>) -> Self {
        Self::compound(AtomType::Evaluation, vec![predicate, Self::list(args)])
    }

    /// `(EqualLink left right)`
    #[must_use]
    pub fn equal(left: Handle, right: Handle) -> Self {
        Self::compound(AtomType::Equal, vec![left, right])
    }

    /// `(IdenticalLink left right)`
    #[must_use]
    pub fn identical(left: Handle, right: Handle) -> Self {
        Self::compound(AtomType::Identical, vec![left, right])
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the underlying atom.
    #[must_use]
    pub fn atom(&self) -> &Atom {
        &self.0.atom
    }

    /// Returns the type tag.
    #[must_use]
    pub fn atom_type(&self) -> AtomType {
        self.0.atom.atom_type()
    }

    /// Returns true if this is a variable.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.atom_type() == AtomType::Variable
    }

    /// Returns the node name, or `None` for links and quotes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.0.atom {
            Atom::Node { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the children: the outgoing set of a link, the wrapped atom of
    /// a quote, or nothing for a node.
    #[must_use]
    pub fn children(&self) -> &[Handle] {
        match &self.0.atom {
            Atom::Node { .. } => &[],
            Atom::Link { outgoing, .. } => outgoing,
            Atom::Quote(inner) => std::slice::from_ref(inner),
        }
    }

    /// Returns true if both handles share one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
