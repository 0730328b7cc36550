//! Form abstraction consumed by the binder
//!
//! The engine never touches a document directly. Hosts hand it a
//! [`FormHandle`] that finds fields and [`FieldRef`]s that read and
//! mutate them.

mod field;
mod memory;
mod resolve;
mod submission;

pub use field::{FieldKind, FieldRef, FormHandle, SelectOption};
pub use memory::{MemoryField, MemoryForm};
pub use resolve::{resolve_masters, resolve_slave, Naming, ResolvedMaster};
pub use submission::serialize_submission;
