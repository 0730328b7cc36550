//! In-process form adapter
//!
//! Keeps field state in memory. Used by headless hosts and throughout
//! the test suite in place of a real document.

use super::field::{FieldKind, FieldRef, FormHandle, SelectOption};
use crate::value::Value;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct FieldState {
    value: Value,
    checked: bool,
    options: Vec<SelectOption>,
    enabled: bool,
    visible: bool,
    required: bool,
    loading: bool,
    companion_text: Option<String>,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            value: Value::from(""),
            checked: false,
            options: Vec::new(),
            enabled: true,
            visible: true,
            required: false,
            loading: false,
            companion_text: None,
        }
    }
}

/// A form control held in memory
#[derive(Debug)]
pub struct MemoryField {
    dom_id: String,
    name: Option<String>,
    kind: FieldKind,
    state: Mutex<FieldState>,
}

impl MemoryField {
    pub fn new(dom_id: &str, name: Option<&str>, kind: FieldKind) -> Arc<Self> {
        Arc::new(Self {
            dom_id: dom_id.to_string(),
            name: name.map(str::to_string),
            kind,
            state: Mutex::new(FieldState::default()),
        })
    }

    /// Text input named `name`
    pub fn text(dom_id: &str, name: &str) -> Arc<Self> {
        Self::new(dom_id, Some(name), FieldKind::Text)
    }

    pub fn checkbox(dom_id: &str, name: &str) -> Arc<Self> {
        Self::new(dom_id, Some(name), FieldKind::Checkbox)
    }

    pub fn select(dom_id: &str, name: &str) -> Arc<Self> {
        Self::new(dom_id, Some(name), FieldKind::Select)
    }

    /// Hidden input followed by a read-only display element
    pub fn hidden_with_display(dom_id: &str, name: &str) -> Arc<Self> {
        let field = Self::new(dom_id, Some(name), FieldKind::Hidden);
        field.state.lock().companion_text = Some(String::new());
        field
    }

    /// Set the raw value, as a user typing or picking would
    pub fn set(&self, value: impl Into<Value>) {
        self.state.lock().value = value.into();
    }

    /// Current value as text; non-string values are rendered in form string
    pub fn text_value(&self) -> String {
        self.state.lock().value.to_form_string()
    }

    pub fn is_checked(&self) -> bool {
        self.state.lock().checked
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.state.lock().options.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    pub fn is_required(&self) -> bool {
        self.state.lock().required
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn companion_text(&self) -> Option<String> {
        self.state.lock().companion_text.clone()
    }
}

impl FieldRef for MemoryField {
    fn dom_id(&self) -> String {
        self.dom_id.clone()
    }

    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn value(&self) -> Value {
        let state = self.state.lock();
        match self.kind {
            FieldKind::Checkbox => Value::Bool(state.checked),
            _ => state.value.clone(),
        }
    }

    fn set_value(&self, value: &str) {
        self.state.lock().value = Value::from(value);
    }

    fn set_checked(&self, checked: bool) {
        self.state.lock().checked = checked;
    }

    fn replace_options(&self, options: &[SelectOption]) {
        self.state.lock().options = options.to_vec();
    }

    fn set_enabled(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    fn set_required(&self, required: bool) {
        self.state.lock().required = required;
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().loading = loading;
    }

    fn set_companion_text(&self, text: &str) {
        let mut state = self.state.lock();
        if let Some(companion) = state.companion_text.as_mut() {
            *companion = text.to_string();
        }
    }
}

/// A form made of [`MemoryField`]s, in insertion order
#[derive(Debug, Default)]
pub struct MemoryForm {
    fields: RwLock<Vec<Arc<MemoryField>>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field and hand it back for later inspection
    pub fn add(&self, field: Arc<MemoryField>) -> Arc<MemoryField> {
        self.fields.write().push(Arc::clone(&field));
        field
    }

    /// Concrete field by DOM id
    pub fn get(&self, dom_id: &str) -> Option<Arc<MemoryField>> {
        self.fields
            .read()
            .iter()
            .find(|f| f.dom_id == dom_id)
            .cloned()
    }
}

impl FormHandle for MemoryForm {
    fn field_by_id(&self, dom_id: &str) -> Option<Arc<dyn FieldRef>> {
        self.get(dom_id).map(|f| f as Arc<dyn FieldRef>)
    }

    fn field_by_name(&self, name: &str) -> Option<Arc<dyn FieldRef>> {
        self.fields
            .read()
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
            .cloned()
            .map(|f| f as Arc<dyn FieldRef>)
    }

    fn field_ids(&self) -> Vec<String> {
        self.fields.read().iter().map(|f| f.dom_id.clone()).collect()
    }
}
