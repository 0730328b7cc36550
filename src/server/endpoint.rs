//! Lookup endpoint
//!
//! Request body (form-encoded): `value=Andrzej`
//!
//! Response body (JSON): `{"sex": "man", "country": "Poland"}`

use crate::transport::LookupResponse;
use async_trait::async_trait;
use url::form_urlencoded;

/// Status and body an endpoint sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl EndpointResponse {
    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body,
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

/// A provider's refusal to answer, sent back as is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub message: String,
}

impl Rejection {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Computes dependent field values from a master value
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Values keyed by dependent field name
    async fn values(&self, value: &str) -> Result<LookupResponse, Rejection>;
}

/// Answer one lookup request.
///
/// A body without `value` gets `400`; when `value` repeats, the last one
/// wins.
pub async fn handle_lookup(provider: &dyn LookupProvider, form_body: &str) -> EndpointResponse {
    let value = form_urlencoded::parse(form_body.as_bytes())
        .filter(|(key, _)| key == "value")
        .map(|(_, value)| value.into_owned())
        .last();
    let Some(value) = value else {
        tracing::debug!("Lookup request without a value");
        return EndpointResponse::text(400, "Value is not provided.");
    };

    let values = match provider.values(&value).await {
        Ok(values) => values,
        Err(rejection) => return EndpointResponse::text(rejection.status, rejection.message),
    };

    match serde_json::to_string(&values) {
        Ok(body) => EndpointResponse::json(body),
        Err(e) => {
            tracing::error!("Lookup values are not serializable: {e}");
            EndpointResponse::text(500, "")
        }
    }
}
