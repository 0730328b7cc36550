//! Lookup failures

use thiserror::Error;

/// Why a lookup request produced no values
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup request failed: {0}")]
    Network(String),

    #[error("Lookup endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Lookup response is not a JSON object: {0}")]
    Parse(String),

    #[error("Lookup timed out after {0}ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            LookupError::Status(status.as_u16())
        } else if e.is_decode() {
            LookupError::Parse(e.to_string())
        } else {
            LookupError::Network(e.to_string())
        }
    }
}
