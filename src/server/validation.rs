//! Submission validation with hidden fields

use crate::declaration::{Action, DependencyDeclaration, FieldId};
use crate::value::Value;
use std::collections::HashMap;

/// Validation errors keyed by field id
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Drop the errors of every field a `SHOW` dependency hides for `data`.
///
/// A hidden field is disabled on the page and never submitted, so its
/// "required" and similar errors do not apply. Returns the fields whose
/// errors were removed.
pub fn prune_hidden_errors(
    declarations: &[DependencyDeclaration],
    data: &HashMap<String, Value>,
    errors: &mut FieldErrors,
) -> Vec<FieldId> {
    let mut pruned = Vec::new();

    for declaration in declarations.iter().filter(|d| d.action == Action::Show) {
        let value = data
            .get(declaration.master.as_str())
            .cloned()
            .unwrap_or_default();
        if declaration.condition.met(&value) {
            continue;
        }
        if errors.remove(declaration.slave.as_str()).is_some() {
            tracing::debug!(
                "Ignoring errors of hidden field {} ({} is {:?})",
                declaration.slave,
                declaration.master,
                value
            );
            pruned.push(declaration.slave.clone());
        }
    }
    pruned
}
