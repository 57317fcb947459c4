//! Error types for the Clausal system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::atom::AtomType;

/// Result alias used throughout Clausal.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Clausal operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a "declared atom is not a variable" error.
    #[must_use]
    pub fn not_a_variable(atom: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAVariable(atom.into()))
    }

    /// Creates a "node constructed with a non-node type" error.
    #[must_use]
    pub fn not_a_node(kind: AtomType) -> Self {
        Self::new(ErrorKind::NotANode(kind))
    }

    /// Creates a "link constructed with a non-link type" error.
    #[must_use]
    pub fn not_a_link(kind: AtomType) -> Self {
        Self::new(ErrorKind::NotALink(kind))
    }

    /// Creates a wrong-arity error.
    #[must_use]
    pub fn wrong_arity(kind: AtomType, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::WrongArity {
            kind,
            expected,
            actual,
        })
    }

    /// Creates a disjunction precondition violation.
    #[must_use]
    pub fn disjunction_in_clauses(clause: impl Into<String>) -> Self {
        Self::new(ErrorKind::DisjunctionInClauses {
            clause: clause.into(),
        })
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }
}

/// Categorized error kinds.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A non-variable atom was declared as a query variable.
    #[error("not a variable: {0}")]
    NotAVariable(String),

    /// A node was constructed with a link or wrapper type.
    #[error("not a node type: {0}")]
    NotANode(AtomType),

    /// A link was constructed with a node or wrapper type.
    #[error("not a link type: {0}")]
    NotALink(AtomType),

    /// An atom was given the wrong number of children.
    #[error("{kind} takes {expected} children, got {actual}")]
    WrongArity {
        /// The atom type being built.
        kind: AtomType,
        /// Required child count.
        expected: usize,
        /// Child count supplied.
        actual: usize,
    },

    /// A disjunction reached the partitioner; callers must flatten first.
    #[error("disjunction in conjunctive clause list: {clause}")]
    DisjunctionInClauses {
        /// The offending clause, printed.
        clause: String,
    },

    /// Parse error in atom source text.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// Semantic limit exceeded (kill switch triggered).
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic limits (kill switches) that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Too many clauses handed to a single decomposition.
    MaxClauses {
        /// The configured limit.
        limit: usize,
        /// The number of clauses supplied.
        actual: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxClauses { limit, actual } => {
                write!(f, "max clauses ({limit}) exceeded: got {actual}")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Query or source name.
    pub source: Option<String>,
    /// Index of the clause being processed, if any.
    pub clause_index: Option<usize>,
    /// Line number in source text.
    pub line: Option<u32>,
    /// Column number in source text.
    pub column: Option<u32>,
    /// Enclosing operations, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the clause index.
    #[must_use]
    pub fn with_clause_index(mut self, index: usize) -> Self {
        self.clause_index = Some(index);
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(index) = self.clause_index {
                write!(f, " at clause {index}")?;
            }
        }
        if let (Some(line), Some(column)) = (self.line, self.column) {
            if self.source.is_some() {
                f.write_str(" ")?;
            }
            write!(f, "at {line}:{column}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
