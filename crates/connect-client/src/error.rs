//! Error types for the dashboard client.

use std::path::PathBuf;

use connect_concepts::ConceptError;
use thiserror::Error;

/// Errors raised while talking to the backend or preparing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The configuration is incomplete or unreadable.
    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The configured base URL does not form a valid endpoint URL.
    #[error("invalid endpoint URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// An edit or lookup used a symbolic field name the concept map lacks.
    #[error(transparent)]
    Concept(#[from] ConceptError),

    /// The participant snapshot has no backend token to submit edits with.
    #[error("participant record has no token")]
    MissingToken,

    /// There are no staged changes to submit.
    #[error("no staged changes to submit")]
    NothingToSubmit,

    /// A lookup query had no filter.
    #[error("participant query has no filters")]
    EmptyQuery,
}

impl ClientError {
    /// Short message suitable for operator-facing output.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) | Self::Timeout => {
                "Could not reach the backend. Check the network connection and API URL."
            }
            Self::Api { status: 401 | 403, .. } => "The backend rejected the access token.",
            Self::Api { status: 404, .. } => "Participant not found.",
            Self::Api { .. } | Self::Decode(_) => "The backend could not process the request.",
            Self::Config { .. } | Self::InvalidUrl { .. } => {
                "The dashboard configuration is incomplete."
            }
            Self::Concept(_) => "The concept map does not define a requested field.",
            Self::MissingToken => "The participant record cannot be edited.",
            Self::NothingToSubmit => "There are no changes to save.",
            Self::EmptyQuery => "Provide at least one search filter.",
        }
    }

    /// Whether a caller may reasonably retry. The client itself never does.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        assert!(ClientError::Timeout.is_retryable());
        assert!(
            ClientError::Api {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Api {
                status: 400,
                message: "bad request".to_string()
            }
            .is_retryable()
        );
        assert!(!ClientError::MissingToken.is_retryable());
    }

    #[test]
    fn user_messages() {
        let err = ClientError::Api {
            status: 404,
            message: "No participant".to_string(),
        };
        assert_eq!(err.user_message(), "Participant not found.");
        assert!(ClientError::Network("refused".to_string())
            .user_message()
            .contains("network"));
    }
}
