//! form-deps - declarative field dependencies for forms
//!
//! A form description says "field B is shown / required / copied / looked
//! up based on field A" and this crate keeps that true while the form is
//! edited:
//!
//! - [`condition`] decides whether a master value meets a condition
//! - [`binder`] wires masters to slaves and reacts to changes, batching
//!   server lookups per master
//! - [`form`] is the narrow interface to the host's fields
//! - [`transport`] carries lookup requests
//! - [`server`] answers lookups and validates submissions
//!
//! ```no_run
//! use form_deps::{parse_declarations, DependencyBinder, EngineConfig, HttpTransport, MemoryForm};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let form = Arc::new(MemoryForm::new());
//! let declarations = parse_declarations(
//!     r#"[{"master": "country", "slave": "city", "action": "AJAX_UPDATE",
//!          "condition": ["any"], "options": {"url": "http://localhost:8000/cities"}}]"#,
//! )?;
//! let transport = Arc::new(HttpTransport::new()?);
//! let mut binder = DependencyBinder::new(form, transport, &EngineConfig::load()?);
//! for task in binder.bind(&declarations) {
//!     task.run().await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod condition;
pub mod config;
pub mod declaration;
pub mod form;
pub mod logging;
pub mod server;
pub mod transport;
pub mod value;

pub use binder::{ChangeEvent, ChangeOrigin, DependencyBinder, LookupOutcome, LookupTask};
pub use condition::{evaluate, Condition};
pub use config::EngineConfig;
pub use declaration::{parse_declarations, Action, ActionOptions, DeclarationError, DependencyDeclaration, FieldId};
pub use form::{FieldKind, FieldRef, FormHandle, MemoryField, MemoryForm};
pub use transport::{HttpTransport, LookupError, LookupRequest, LookupTransport};
pub use value::{format_value, Value};
