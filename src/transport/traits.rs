//! Trait abstraction for lookup transport to enable mocking in tests

use super::error::LookupError;
use async_trait::async_trait;

/// Flat mapping from slave key to its new value
pub type LookupResponse = serde_json::Map<String, serde_json::Value>;

/// One lookup: the master's value posted to an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub url: String,
    /// Master value in string form, sent as the `value` form field
    pub value: String,
}

impl LookupRequest {
    /// Form-encoded fields of the request body
    pub fn form_fields(&self) -> [(&str, &str); 1] {
        [("value", self.value.as_str())]
    }
}

/// Sends lookup requests for `AJAX_UPDATE` dependencies
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupTransport: Send + Sync {
    /// Post the master value and return the slave values
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError>;
}
