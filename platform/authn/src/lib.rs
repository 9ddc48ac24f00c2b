//! Platform authentication helpers.
//!
//! Only a static API-key check lives here for now. It is off unless a key is
//! configured, in which case callers must present it in the `x-api-key`
//! header.

use thiserror::Error;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthnError {
    #[error("missing x-api-key header")]
    MissingKey,
    #[error("api key rejected")]
    InvalidKey,
}

#[derive(Clone, Default)]
pub struct ApiKeyValidator {
    expected: Option<String>,
}

impl std::fmt::Debug for ApiKeyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyValidator")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl ApiKeyValidator {
    /// A blank key disables the check.
    pub fn new(expected: Option<String>) -> Self {
        let expected = expected
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Self { expected }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    pub fn validate(&self, presented: Option<&str>) -> Result<(), AuthnError> {
        let Some(expected) = self.expected.as_deref() else {
            return Ok(());
        };
        match presented {
            None => Err(AuthnError::MissingKey),
            Some(key) if keys_match(key.as_bytes(), expected.as_bytes()) => Ok(()),
            Some(_) => {
                tracing::warn!("api key mismatch");
                Err(AuthnError::InvalidKey)
            }
        }
    }
}

/// Compares every byte regardless of where the first mismatch sits.
fn keys_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
