//! Accessor error types.

use thiserror::Error;

/// Errors surfaced by write accessors (reads degrade to placeholders instead).
#[derive(Debug, Error)]
pub enum AccessError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The operation needs a backend and none is configured.
    #[error("{0}")]
    BackendUnavailable(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request could not be sent or the response not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something we could not use.
    #[error("{0}")]
    InvalidResponse(String),

    /// A URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AccessError {
    /// Text to show next to the form that triggered the request.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) | Self::Url(_) => "Request failed. Check your connection and try again.".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = AccessError::Upstream {
            status: 409,
            message: "Business already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Business already exists");

        let err = AccessError::Validation("Business name required".to_string());
        assert_eq!(err.user_message(), "Business name required");

        let err = AccessError::Url(url::ParseError::EmptyHost);
        assert_eq!(
            err.user_message(),
            "Request failed. Check your connection and try again."
        );
    }
}
