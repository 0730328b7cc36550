//! Server side of the dependency mechanism
//!
//! The form layer that emits declarations also answers their lookups and
//! validates submissions where some fields may have been hidden.

mod endpoint;
mod validation;

pub use endpoint::{handle_lookup, EndpointResponse, LookupProvider, Rejection};
pub use validation::{prune_hidden_errors, FieldErrors};
