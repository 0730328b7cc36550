//! Dependency declarations as produced by the server-side form layer

use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Declared identifier of a form field, before DOM id resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Effect applied to the slave field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Toggle the required marker on the slave's label
    Require,
    /// Enable and reveal the slave, or disable and hide it
    Show,
    /// Copy the master's value into the slave
    Clone,
    /// Ask the server for the slave's new value
    AjaxUpdate,
}

impl Action {
    /// Name used in declarations
    pub fn wire_name(self) -> &'static str {
        match self {
            Action::Require => "REQUIRE",
            Action::Show => "SHOW",
            Action::Clone => "CLONE",
            Action::AjaxUpdate => "AJAX_UPDATE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Per-declaration action options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionOptions {
    /// Lookup endpoint for `AJAX_UPDATE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Also run the action on the synthetic page-load event
    #[serde(default)]
    pub page_load_update: bool,
    /// Options this engine does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single dependency: when `master` meets `condition`, apply `action` to `slave`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    pub master: FieldId,
    pub slave: FieldId,
    pub action: Action,
    pub condition: Condition,
    #[serde(default)]
    pub options: ActionOptions,
}

/// Errors raised while reading declarations
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("Declarations are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Declarations must be a JSON array")]
    NotAnArray,

    #[error("{action} dependency of {slave} on {master} needs a url")]
    MissingUrl {
        master: FieldId,
        slave: FieldId,
        action: Action,
    },
}

impl DependencyDeclaration {
    pub fn new(
        master: impl Into<String>,
        slave: impl Into<String>,
        action: Action,
        condition: Condition,
    ) -> Self {
        Self {
            master: FieldId::new(master),
            slave: FieldId::new(slave),
            action,
            condition,
            options: ActionOptions::default(),
        }
    }

    /// Set the lookup url
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.options.url = Some(url.into());
        self
    }

    /// Run the action on the page-load event too
    pub fn with_page_load_update(mut self, enabled: bool) -> Self {
        self.options.page_load_update = enabled;
        self
    }

    /// Check the options the action needs
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if self.action == Action::AjaxUpdate && self.options.url.is_none() {
            return Err(DeclarationError::MissingUrl {
                master: self.master.clone(),
                slave: self.slave.clone(),
                action: self.action,
            });
        }
        Ok(())
    }
}

/// Parse a declaration list.
///
/// Entries are read one by one; a malformed entry is logged and skipped
/// so it cannot take the rest of the form down with it.
pub fn parse_declarations(json: &str) -> Result<Vec<DependencyDeclaration>, DeclarationError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = raw else {
        return Err(DeclarationError::NotAnArray);
    };

    let mut declarations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let declaration = match serde_json::from_value::<DependencyDeclaration>(entry) {
            Ok(declaration) => declaration,
            Err(e) => {
                tracing::warn!("Skipping dependency #{index}: {e}");
                continue;
            }
        };
        if let Err(e) = declaration.validate() {
            tracing::warn!("Skipping dependency #{index}: {e}");
            continue;
        }
        declarations.push(declaration);
    }
    Ok(declarations)
}
