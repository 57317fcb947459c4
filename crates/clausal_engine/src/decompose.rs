//! Full decomposition: constant removal followed by partitioning.
//!
//! This is the entry point a pattern compiler calls once per query:
//!
//! ```
//! use clausal_engine::{DecomposeConfig, Decomposer};
//! use clausal_foundation::{AtomTable, Variables, parse_atoms};
//!
//! let mut table = AtomTable::new();
//! let vars = Variables::from_handles([table.variable("$x")]).unwrap();
//! let clauses = parse_atoms(
//!     &mut table,
//!     r#"(List (Variable "$x")) (Concept "always")"#,
//! )
//! .unwrap();
//!
//! let result = Decomposer::new(DecomposeConfig::default())
//!     .decompose(&vars, &clauses)
//!     .unwrap();
//! assert_eq!(result.constants().len(), 1);
//! assert!(result.is_connected());
//! ```

use clausal_foundation::{Error, Handle, Result, SemanticLimit, Variables};

use crate::classify::{Classification, ClauseClassifier};
use crate::config::DecomposeConfig;
use crate::observer::{DecompositionObserver, NoopObserver};
use crate::partition::{Component, ComponentPartitioner};

/// Constants and connected components of one clause list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decomposition {
    constants: Vec<Handle>,
    components: Vec<Component>,
    modified: bool,
}

impl Decomposition {
    /// Returns the removed constant clauses, in input order.
    #[must_use]
    pub fn constants(&self) -> &[Handle] {
        &self.constants
    }

    /// Returns the components, in creation order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns true if constant removal changed the clause list.
    #[must_use]
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Returns true if the non-constant clauses form exactly one component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.components.len() == 1
    }

    /// Returns the index of the component containing `clause`.
    #[must_use]
    pub fn component_of(&self, clause: &Handle) -> Option<usize> {
        self.components.iter().position(|c| c.contains(clause))
    }

    /// Returns the indices of components with no declared variables.
    ///
    /// These hold variable-free clauses that reached the partitioner: opaque
    /// clauses, or anything at all when constant stripping is disabled.
    pub fn variable_free_components(&self) -> impl Iterator<Item = usize> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.variables().is_empty())
            .map(|(i, _)| i)
    }

    /// Returns the total number of clauses across constants and components.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.constants.len() + self.components.iter().map(Component::len).sum::<usize>()
    }

    /// Splits into constants and components.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Handle>, Vec<Component>) {
        (self.constants, self.components)
    }
}

/// Runs the classifier and partitioner under one configuration.
#[derive(Clone, Debug, Default)]
pub struct Decomposer {
    config: DecomposeConfig,
}

impl Decomposer {
    /// Creates a decomposer.
    #[must_use]
    pub fn new(config: DecomposeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DecomposeConfig {
        &self.config
    }

    /// Decomposes `clauses` over the declared `vars`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clause count exceeds
    /// [`DecomposeConfig::max_clauses`] or a clause is a disjunction.
    pub fn decompose(&self, vars: &Variables, clauses: &[Handle]) -> Result<Decomposition> {
        self.decompose_observed(vars, clauses, &mut NoopObserver)
    }

    /// Decomposes `clauses`, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// See [`decompose`](Self::decompose).
    pub fn decompose_observed(
        &self,
        vars: &Variables,
        clauses: &[Handle],
        observer: &mut dyn DecompositionObserver,
    ) -> Result<Decomposition> {
        if let Some(limit) = self.config.max_clauses {
            if clauses.len() > limit {
                return Err(Error::limit_exceeded(SemanticLimit::MaxClauses {
                    limit,
                    actual: clauses.len(),
                }));
            }
        }

        observer.decomposition_started(clauses.len(), vars.len());

        let Classification {
            remaining,
            constants,
            modified,
        } = if self.config.strip_constants {
            ClauseClassifier::new(vars).classify_with(clauses, Vec::new(), observer)
        } else {
            Classification {
                remaining: clauses.to_vec(),
                ..Classification::default()
            }
        };

        let components = ComponentPartitioner::new(vars)
            .with_seed_choice(self.config.seed)
            .partition_observed(&remaining, observer)?;

        observer.decomposition_finished(constants.len(), components.len());

        Ok(Decomposition {
            constants,
            components,
            modified,
        })
    }
}
