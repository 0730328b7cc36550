//! Field and form capability traits

use crate::value::Value;
use std::sync::Arc;

/// Kind of control behind a field; drives how lookup values are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Checkbox,
    Select,
    /// Hidden input, possibly followed by a read-only display element
    Hidden,
    Other,
}

/// One `<option>` of a select
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Handle to a single form control.
///
/// Methods take `&self` the way DOM handles do; implementations keep
/// their own interior state.
pub trait FieldRef: Send + Sync {
    /// DOM id of the control
    fn dom_id(&self) -> String;

    /// Form `name` attribute, if any
    fn name(&self) -> Option<String>;

    fn kind(&self) -> FieldKind;

    /// Current value
    fn value(&self) -> Value;

    /// Plain value assignment
    fn set_value(&self, value: &str);

    /// Checked state of a checkbox
    fn set_checked(&self, checked: bool);

    /// Replace every option of a select, in order
    fn replace_options(&self, options: &[SelectOption]);

    /// Enabled controls take part in submission, disabled ones do not
    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Show or hide the group containing the control
    fn set_visible(&self, visible: bool);

    /// Toggle the required marker on the control's label
    fn set_required(&self, required: bool);

    /// Toggle the loading affordance while a lookup is in flight
    fn set_loading(&self, loading: bool);

    /// Refresh the read-only display element following a hidden input
    fn set_companion_text(&self, _text: &str) {}
}

/// Lookup of fields within one form
pub trait FormHandle: Send + Sync {
    fn field_by_id(&self, dom_id: &str) -> Option<Arc<dyn FieldRef>>;

    fn field_by_name(&self, name: &str) -> Option<Arc<dyn FieldRef>>;

    /// Every field DOM id, in document order
    fn field_ids(&self) -> Vec<String>;
}
