//! Connected-component partitioning of clauses.
//!
//! Two clauses are connected when they share an unquoted declared variable.
//! The partitioner groups clauses into maximal connected components and, as
//! a side effect, orders each component so that every clause after the
//! first shares a variable with the clauses before it. A search that grounds
//! clauses in list order therefore always finds the next clause reachable
//! from variables it has already bound.
//!
//! The algorithm is an iterative fixed-point merge:
//!
//! 1. Each pass offers every pending clause to the existing components in
//!    creation order; the first component sharing a variable takes it.
//! 2. If a pass attached anything, run another pass: grown components may
//!    now reach clauses that missed earlier.
//! 3. If a pass attached nothing, one unmatched clause seeds a new
//!    component (see [`SeedChoice`]).
//!
//! A clause with no declared variables can never attach, so it ends up in a
//! singleton component with an empty variable set. Strip constants first
//! (see [`ClauseClassifier`](crate::ClauseClassifier)) if that is unwanted.

use clausal_foundation::{
    AtomType, Error, ErrorContext, Handle, Result, VarSet, Variables, free_variables,
};

use crate::config::SeedChoice;
use crate::observer::{DecompositionObserver, NoopObserver};

// =============================================================================
// Component
// =============================================================================

/// A connected group of clauses and the variables they mention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Clauses in connectivity order.
    clauses: im::Vector<Handle>,
    /// Union of the clauses' free variables.
    variables: VarSet,
}

impl Component {
    fn seed(clause: Handle, variables: VarSet) -> Self {
        Self {
            clauses: im::Vector::unit(clause),
            variables,
        }
    }

    fn attach(&mut self, clause: Handle, free: &VarSet) {
        self.clauses.push_back(clause);
        self.variables.union_with(free);
    }

    /// Returns the clauses in connectivity order.
    #[must_use]
    pub fn clauses(&self) -> &im::Vector<Handle> {
        &self.clauses
    }

    /// Returns the component's variable set.
    #[must_use]
    pub fn variables(&self) -> &VarSet {
        &self.variables
    }

    /// Returns the number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if the component has no clauses. Partitioning never
    /// produces such a component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if `clause` belongs to this component.
    #[must_use]
    pub fn contains(&self, clause: &Handle) -> bool {
        self.clauses.contains(clause)
    }

    /// Checks that every clause after the first shares a variable with the
    /// clauses before it, and that the variable set is exactly the union of
    /// the clauses' free variables.
    #[must_use]
    pub fn is_connectivity_ordered(&self, vars: &Variables) -> bool {
        let mut clauses = self.clauses.iter();
        let Some(first) = clauses.next() else {
            return self.variables.is_empty();
        };

        let mut seen = free_variables(first, vars);
        for clause in clauses {
            let free = free_variables(clause, vars);
            if !free.intersects(&seen) {
                return false;
            }
            seen.union_with(&free);
        }
        seen == self.variables
    }

    /// Splits the component into its clause list and variable set.
    #[must_use]
    pub fn into_parts(self) -> (im::Vector<Handle>, VarSet) {
        (self.clauses, self.variables)
    }
}

/// Returns true if no two components share a variable.
#[must_use]
pub fn components_are_separated(components: &[Component]) -> bool {
    components.iter().enumerate().all(|(i, a)| {
        components[i + 1..]
            .iter()
            .all(|b| a.variables.is_disjoint(&b.variables))
    })
}

// =============================================================================
// Partitioner
// =============================================================================

/// Groups clauses into connected components.
#[derive(Clone, Debug)]
pub struct ComponentPartitioner<'v> {
    vars: &'v Variables,
    seed: SeedChoice,
}

impl<'v> ComponentPartitioner<'v> {
    /// Creates a partitioner for the given declared variables.
    #[must_use]
    pub fn new(vars: &'v Variables) -> Self {
        Self {
            vars,
            seed: SeedChoice::default(),
        }
    }

    /// Builder method to set the seeding tie-break.
    #[must_use]
    pub fn with_seed_choice(mut self, seed: SeedChoice) -> Self {
        self.seed = seed;
        self
    }

    /// Partitions `clauses` into connected components.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DisjunctionInClauses`] if a clause is an `Or`
    /// link; disjunctive bodies must be flattened by the caller.
    ///
    /// [`ErrorKind::DisjunctionInClauses`]: clausal_foundation::ErrorKind::DisjunctionInClauses
    pub fn partition(&self, clauses: &[Handle]) -> Result<Vec<Component>> {
        self.partition_observed(clauses, &mut NoopObserver)
    }

    /// Partitions `clauses`, reporting passes, attachments, and seeds to
    /// `observer`.
    ///
    /// # Errors
    ///
    /// See [`partition`](Self::partition).
    pub fn partition_observed(
        &self,
        clauses: &[Handle],
        observer: &mut dyn DecompositionObserver,
    ) -> Result<Vec<Component>> {
        if let Some(index) = clauses.iter().position(|c| c.atom_type() == AtomType::Or) {
            return Err(
                Error::disjunction_in_clauses(clauses[index].to_string()).with_context(
                    ErrorContext::new()
                        .with_clause_index(index)
                        .with_frame("partition"),
                ),
            );
        }

        let mut pending: Vec<(Handle, VarSet)> = clauses
            .iter()
            .map(|clause| (clause.clone(), free_variables(clause, self.vars)))
            .collect();
        let mut components: Vec<Component> = Vec::new();
        let mut pass = 0;

        while !pending.is_empty() {
            pass += 1;
            observer.pass_started(pass, pending.len());

            let mut unmatched = Vec::with_capacity(pending.len());
            let mut attached_any = false;

            for (clause, free) in pending {
                match components
                    .iter()
                    .position(|component| component.variables.intersects(&free))
                {
                    Some(index) => {
                        observer.clause_attached(index, &clause);
                        components[index].attach(clause, &free);
                        attached_any = true;
                    }
                    None => unmatched.push((clause, free)),
                }
            }

            if !attached_any {
                let seed = match self.seed {
                    SeedChoice::Last => unmatched.pop(),
                    SeedChoice::First => (!unmatched.is_empty()).then(|| unmatched.remove(0)),
                };
                if let Some((clause, free)) = seed {
                    observer.component_seeded(components.len(), &clause);
                    components.push(Component::seed(clause, free));
                }
            }

            pending = unmatched;
        }

        debug_assert!(
            components
                .iter()
                .all(|c| c.is_connectivity_ordered(self.vars))
        );
        debug_assert!(components_are_separated(&components));
        Ok(components)
    }
}
