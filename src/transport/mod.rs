//! Transport for lookup requests

mod error;
mod http;
mod traits;

pub use error::LookupError;
pub use http::HttpTransport;
pub use traits::{LookupRequest, LookupResponse, LookupTransport};

#[cfg(test)]
pub use traits::MockLookupTransport;
