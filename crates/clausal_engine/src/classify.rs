//! Constant-clause removal.
//!
//! A clause is *constant* when it has no unquoted occurrence of a declared
//! variable and contains no opaque marker ([`AtomType::OPAQUE`]). Constant
//! clauses can only ever match themselves, so structural search can skip
//! them. Opaque markers name things decided at runtime (defined or grounded
//! predicates and schemas, identity and equality tests), so clauses holding
//! them stay in the pattern even when they have no variables.
//!
//! [`AtomType::OPAQUE`]: clausal_foundation::AtomType::OPAQUE

use clausal_foundation::{Handle, VarSet, Variables, any_unquoted_in_tree, first_opaque};

use crate::observer::{DecompositionObserver, NoopObserver, RetainReason};

/// Result of classifying a clause list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// Non-constant clauses, in input order.
    pub remaining: Vec<Handle>,
    /// Constant clauses, after any constants supplied by the caller, in
    /// input order.
    pub constants: Vec<Handle>,
    /// True if at least one clause was removed.
    pub modified: bool,
}

/// Splits clauses into constants and the rest.
#[derive(Clone, Debug)]
pub struct ClauseClassifier<'v> {
    vars: &'v Variables,
    all: VarSet,
}

impl<'v> ClauseClassifier<'v> {
    /// Creates a classifier for the given declared variables.
    #[must_use]
    pub fn new(vars: &'v Variables) -> Self {
        Self {
            vars,
            all: vars.all(),
        }
    }

    /// Returns why `clause` must stay in the pattern, or `None` if it is
    /// constant.
    #[must_use]
    pub fn retain_reason(&self, clause: &Handle) -> Option<RetainReason> {
        if any_unquoted_in_tree(clause, self.vars, &self.all) {
            return Some(RetainReason::Variables);
        }
        first_opaque(clause).map(RetainReason::Opaque)
    }

    /// Returns true if `clause` is constant.
    #[must_use]
    pub fn is_constant(&self, clause: &Handle) -> bool {
        self.retain_reason(clause).is_none()
    }

    /// Classifies `clauses`.
    #[must_use]
    pub fn classify(&self, clauses: &[Handle]) -> Classification {
        self.classify_with(clauses, Vec::new(), &mut NoopObserver)
    }

    /// Classifies `clauses`, appending removed clauses after `constants`
    /// and reporting each decision to `observer`.
    pub fn classify_with(
        &self,
        clauses: &[Handle],
        mut constants: Vec<Handle>,
        observer: &mut dyn DecompositionObserver,
    ) -> Classification {
        let mut remaining = Vec::with_capacity(clauses.len());
        let mut modified = false;

        for clause in clauses {
            if let Some(reason) = self.retain_reason(clause) {
                observer.clause_retained(clause, reason);
                remaining.push(clause.clone());
            } else {
                observer.constant_removed(clause);
                constants.push(clause.clone());
                modified = true;
            }
        }

        Classification {
            remaining,
            constants,
            modified,
        }
    }
}

/// Moves constant clauses from `clauses` to the end of `constants`.
///
/// Returns true if `clauses` was modified.
pub fn remove_constants(
    vars: &Variables,
    clauses: &mut Vec<Handle>,
    constants: &mut Vec<Handle>,
) -> bool {
    let classification = ClauseClassifier::new(vars).classify_with(
        clauses,
        std::mem::take(constants),
        &mut NoopObserver,
    );
    *clauses = classification.remaining;
    *constants = classification.constants;
    classification.modified
}
