//! Declared field ids to live fields
//!
//! A field's DOM id is the configured prefix followed by its declared id.
//! Declared ids inside repeated form blocks carry a placeholder where the
//! block index goes (`items-__prefix__-price`); the master side matches
//! every rendered block and the slave is looked up in the same block.

use super::field::{FieldRef, FormHandle};
use crate::declaration::FieldId;
use std::sync::Arc;

/// Naming convention linking declared ids to DOM ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub id_prefix: String,
    pub block_placeholder: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            id_prefix: "id_".to_string(),
            block_placeholder: "__prefix__".to_string(),
        }
    }
}

impl Naming {
    /// DOM id for a declared id
    pub fn dom_id(&self, declared: &str) -> String {
        format!("{}{}", self.id_prefix, declared)
    }

    /// Response key fallback: the DOM id without the prefix
    pub fn strip_prefix<'a>(&self, dom_id: &'a str) -> &'a str {
        dom_id.strip_prefix(self.id_prefix.as_str()).unwrap_or(dom_id)
    }

    fn is_pattern(&self, declared: &str) -> bool {
        !self.block_placeholder.is_empty() && declared.contains(&self.block_placeholder)
    }
}

/// A master field found for a declaration
#[derive(Clone)]
pub struct ResolvedMaster {
    pub field: Arc<dyn FieldRef>,
    /// Block token the field was matched with, for repeated blocks
    pub block: Option<String>,
}

/// Every master field a declared id stands for.
///
/// Empty when nothing matches; that is not an error.
pub fn resolve_masters(form: &dyn FormHandle, master: &FieldId, naming: &Naming) -> Vec<ResolvedMaster> {
    let declared = master.as_str();

    if !naming.is_pattern(declared) {
        return match form.field_by_id(&naming.dom_id(declared)) {
            Some(field) => vec![ResolvedMaster { field, block: None }],
            None => {
                tracing::debug!("No master field for {declared}");
                Vec::new()
            }
        };
    }

    let pattern = naming.dom_id(declared);
    let Some((head, tail)) = pattern.split_once(naming.block_placeholder.as_str()) else {
        return Vec::new();
    };

    let matched: Vec<ResolvedMaster> = form
        .field_ids()
        .into_iter()
        .filter_map(|dom_id| {
            let token = dom_id.strip_prefix(head)?.strip_suffix(tail)?;
            // The template block keeps the placeholder itself
            if token.is_empty() || token.contains(naming.block_placeholder.as_str()) {
                return None;
            }
            let token = token.to_string();
            form.field_by_id(&dom_id).map(|field| ResolvedMaster {
                field,
                block: Some(token),
            })
        })
        .collect();

    if matched.is_empty() {
        tracing::debug!("No master fields match {declared}");
    }
    matched
}

/// The slave field for a declaration, in the master's block if any.
///
/// Looks up by DOM id first, then by `name`.
pub fn resolve_slave(
    form: &dyn FormHandle,
    slave: &FieldId,
    block: Option<&str>,
    naming: &Naming,
) -> Option<Arc<dyn FieldRef>> {
    let declared = match block {
        Some(token) if naming.is_pattern(slave.as_str()) => {
            slave.as_str().replace(naming.block_placeholder.as_str(), token)
        }
        _ => slave.as_str().to_string(),
    };

    let field = form
        .field_by_id(&naming.dom_id(&declared))
        .or_else(|| form.field_by_name(&declared));
    if field.is_none() {
        tracing::debug!("No slave field for {declared}");
    }
    field
}
