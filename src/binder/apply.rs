//! Writing lookup values into fields

use crate::form::{FieldKind, FieldRef, SelectOption};
use serde_json::Value as Json;

/// Set a field from a lookup response value.
///
/// - `null` leaves the field untouched
/// - checkboxes take the value's truthiness
/// - selects given `[selected, [[value, label], ...]]` get their options
///   replaced, then the selection set
/// - anything else is a plain value assignment
///
/// A hidden input's read-only display is refreshed afterwards.
pub fn apply_field_value(field: &dyn FieldRef, value: &Json) {
    if value.is_null() {
        return;
    }

    match (field.kind(), select_payload(value)) {
        (FieldKind::Checkbox, _) => field.set_checked(is_truthy(value)),
        (FieldKind::Select, Some((selected, options))) => {
            field.replace_options(&options);
            field.set_value(&selected);
        }
        _ => field.set_value(&json_text(value)),
    }

    if field.kind() == FieldKind::Hidden {
        field.set_companion_text(&field.value().to_form_string());
    }
}

/// `[selected, [[value, label], ...]]`
fn select_payload(value: &Json) -> Option<(String, Vec<SelectOption>)> {
    let [selected, Json::Array(pairs)] = value.as_array()?.as_slice() else {
        return None;
    };
    let options = pairs
        .iter()
        .map(|pair| match pair.as_array()?.as_slice() {
            [value, label] => Some(SelectOption::new(json_text(value), json_text(label))),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some((json_text(selected), options))
}

fn json_text(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}
