//! Portal client error types.
//!
//! Typed so callers can distinguish a missing test from an auth problem
//! or a transient network failure without string matching.

use mockexam_core::error::DefinitionError;
use thiserror::Error;

/// Errors that can occur when talking to the portal.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The requested test slug does not exist (HTTP 404).
    #[error("test not found: {0}")]
    TestNotFound(String),

    /// Authentication failed (HTTP 401).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The portal returned an error response.
    #[error("portal error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The portal served a payload that violates the definition
    /// invariants.
    #[error("invalid test definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),
}
