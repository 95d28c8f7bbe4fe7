//! Error types shared by the enhancement engine, server, and client

use thiserror::Error;

/// Failure classes for an enhancement attempt.
///
/// `Validation` is the only class a caller can fix by changing input; all
/// other classes are surfaced to end users as a single generic message while
/// the detail goes to the logs.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// The input was rejected before any work happened.
    #[error("{0}")]
    Validation(String),

    /// Network-level failure while talking to the service.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error payload.
    #[error("service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response arrived but could not be interpreted.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Anything else that should never reach the user verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EnhanceError {
    /// HTTP status the server should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            EnhanceError::Validation(_) => 400,
            EnhanceError::Api { status, .. } => *status,
            _ => 500,
        }
    }

    /// Text safe to show an end user. Validation messages are actionable and
    /// pass through; everything else collapses to a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            EnhanceError::Validation(message) => message.clone(),
            _ => "Failed to enhance prompt. Please try again.".to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EnhanceError::Validation(_))
    }
}
