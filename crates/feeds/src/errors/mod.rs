//! Error types for the feeds crate.

use thiserror::Error;

/// Errors that can occur while talking to a remote feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The provider has no credentials configured.
    #[error("Missing API key for {provider}")]
    MissingApiKey {
        /// The provider that needs a key
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success status or an error body.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FeedError {
    /// Whether trying again later could succeed.
    ///
    /// Credentials and response-shape problems are terminal until the
    /// configuration or the upstream changes.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => true,
            Self::ProviderError { .. } => true,
            Self::MissingApiKey { .. } | Self::InvalidResponse { .. } => false,
        }
    }

    pub(crate) fn from_status(provider: &str, status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            429 => Self::RateLimited {
                provider: provider.to_string(),
            },
            408 | 504 => Self::Timeout {
                provider: provider.to_string(),
            },
            _ => Self::ProviderError {
                provider: provider.to_string(),
                message: format!("HTTP {}", status),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        let error = FeedError::RateLimited {
            provider: "EXTENDED".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_missing_key_is_terminal() {
        let error = FeedError::MissingApiKey {
            provider: "OCTAV".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_invalid_response_is_terminal() {
        let error = FeedError::InvalidResponse {
            provider: "EXTENDED".to_string(),
            message: "no points field".to_string(),
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_from_status_maps_429() {
        let error = FeedError::from_status("OCTAV", reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert!(matches!(error, FeedError::RateLimited { .. }));
    }

    #[test]
    fn test_from_status_maps_server_error() {
        let error = FeedError::from_status("OCTAV", reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        match error {
            FeedError::ProviderError { provider, message } => {
                assert_eq!(provider, "OCTAV");
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
