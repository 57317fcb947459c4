//! Structure queries over atom trees.
//!
//! Two kinds of traversal:
//! - *unquoted* walks stop at [`Atom::Quote`](crate::Atom::Quote): a
//!   variable below a quote is a literal, not an occurrence;
//! - *type containment* walks see through quotes, since a quoted grounded
//!   predicate still names something evaluated at runtime.

use crate::atom::{AtomType, Handle};
use crate::variables::{VarSet, Variables};

/// Visits every unquoted variable in `atom`, stopping early when `visit`
/// returns true. Returns whether it stopped early.
fn any_unquoted_variable(atom: &Handle, visit: &mut impl FnMut(&Handle) -> bool) -> bool {
    match atom.atom_type() {
        AtomType::Quote => false,
        AtomType::Variable => visit(atom),
        _ => atom
            .children()
            .iter()
            .any(|child| any_unquoted_variable(child, visit)),
    }
}

/// Returns true if some variable in `set` occurs unquoted within `atom`.
///
/// `set` is interpreted relative to `vars`; variables in the tree that are
/// not declared in `vars` never match.
#[must_use]
pub fn any_unquoted_in_tree(atom: &Handle, vars: &Variables, set: &VarSet) -> bool {
    if set.is_empty() {
        return false;
    }
    any_unquoted_variable(atom, &mut |var| {
        vars.index_of(var).is_some_and(|idx| set.contains(idx))
    })
}

/// Returns true if `atom` or any descendant has type `ty`.
#[must_use]
pub fn contains_atomtype(atom: &Handle, ty: AtomType) -> bool {
    any_node(atom, &|a| a.atom_type() == ty)
}

/// Returns true if `atom` contains any [`AtomType::OPAQUE`] marker.
#[must_use]
pub fn contains_opaque(atom: &Handle) -> bool {
    any_node(atom, &|a| a.atom_type().is_opaque())
}

/// Returns the first opaque marker found in a pre-order walk, if any.
#[must_use]
pub fn first_opaque(atom: &Handle) -> Option<AtomType> {
    let ty = atom.atom_type();
    if ty.is_opaque() {
        return Some(ty);
    }
    atom.children().iter().find_map(first_opaque)
}

fn any_node(atom: &Handle, pred: &impl Fn(&Handle) -> bool) -> bool {
    pred(atom) || atom.children().iter().any(|child| any_node(child, pred))
}

/// Returns the declared variables occurring unquoted within `atom`.
#[must_use]
pub fn free_variables(atom: &Handle, vars: &Variables) -> VarSet {
    let mut found = VarSet::with_capacity(vars.len());
    if vars.is_empty() {
        return found;
    }
    any_unquoted_variable(atom, &mut |var| {
        if let Some(idx) = vars.index_of(var) {
            found.insert(idx);
        }
        false
    });
    found
}
