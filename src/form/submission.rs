//! Submission view of a form

use super::field::{FieldKind, FormHandle};
use crate::value::Value;

/// `(name, value)` pairs a submission would carry.
///
/// Disabled fields are left out, which is how a hidden SHOW slave drops
/// out of the submitted data. Unnamed fields and unchecked checkboxes do
/// not serialize either.
pub fn serialize_submission(form: &dyn FormHandle) -> Vec<(String, String)> {
    form.field_ids()
        .iter()
        .filter_map(|dom_id| form.field_by_id(dom_id))
        .filter(|field| field.is_enabled())
        .filter_map(|field| {
            let name = field.name()?;
            let value = field.value();
            if field.kind() == FieldKind::Checkbox {
                return (value == Value::Bool(true)).then(|| (name, "on".to_string()));
            }
            Some((name, value.to_form_string()))
        })
        .collect()
}
