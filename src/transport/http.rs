//! HTTP lookup transport
//!
//! Posts `value=<master value>` form-encoded and expects a flat JSON
//! object back.

use super::error::LookupError;
use super::traits::{LookupRequest, LookupResponse, LookupTransport};
use crate::config::EngineConfig;
use async_trait::async_trait;
use url::Url;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("form-deps/", env!("CARGO_PKG_VERSION"));

/// Lookup transport over HTTP
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    /// Base that relative endpoint urls are joined onto
    base_url: Option<Url>,
}

impl HttpTransport {
    /// Create a transport with the default user agent
    pub fn new() -> Result<Self, LookupError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a transport using the configured user agent, if any
    pub fn from_config(config: &EngineConfig) -> Result<Self, LookupError> {
        Self::with_user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| LookupError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: None,
        })
    }

    /// Resolve relative endpoint urls such as `/cities` against `base`
    pub fn with_base_url(mut self, base: &str) -> Result<Self, LookupError> {
        let base = Url::parse(base).map_err(|e| LookupError::Network(format!("Bad base url {base}: {e}")))?;
        self.base_url = Some(base);
        Ok(self)
    }

    /// Absolute url for an endpoint
    pub fn endpoint(&self, url: &str) -> Result<Url, LookupError> {
        let parsed = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        parsed.map_err(|e| LookupError::Network(format!("Bad lookup url {url}: {e}")))
    }
}

#[async_trait]
impl LookupTransport for HttpTransport {
    async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse, LookupError> {
        let endpoint = self.endpoint(&request.url)?;
        tracing::debug!("Lookup POST {endpoint} value={}", request.value);

        let response = self
            .http
            .post(endpoint)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Object(values) => Ok(values),
            other => Err(LookupError::Parse(other.to_string())),
        }
    }
}
