// ABOUTME: Structured error taxonomy for food provider operations
// ABOUTME: All failures are scoped to a single adapter call, never retried here
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Result alias for provider adapter calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure taxonomy for a single provider call.
///
/// Production paths degrade these to empty result sets; the diagnostic
/// comparison path surfaces the raw display string per provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The call exceeded its per-call timeout
    #[error("{provider} request timed out")]
    Timeout {
        /// Provider that timed out
        provider: &'static str,
    },

    /// Network failure or non-auth, non-rate-limit upstream error
    #[error("{provider} unreachable: {message}")]
    Unreachable {
        /// Provider that could not be reached
        provider: &'static str,
        /// Transport or upstream status context
        message: String,
    },

    /// Bad or missing credentials, defended per-call even though readiness
    /// should have excluded the provider at startup
    #[error("{provider} rejected credentials: {message}")]
    AuthFailure {
        /// Provider that rejected the credentials
        provider: &'static str,
        /// Upstream rejection context
        message: String,
    },

    /// Upstream rate limit hit
    #[error("{provider} rate limited the request")]
    RateLimited {
        /// Provider that rate limited the call
        provider: &'static str,
    },

    /// Unparseable vendor payload; logged with context, treated as an empty
    /// successful result by production callers
    #[error("{provider} returned a malformed {context} payload: {source}")]
    MalformedResponse {
        /// Provider whose payload failed to parse
        provider: &'static str,
        /// Which payload failed (e.g., "search_response")
        context: &'static str,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// Barcode call against a text-only provider (or similar capability gap)
    #[error("{provider} does not support {operation}")]
    UnsupportedOperation {
        /// Provider missing the capability
        provider: &'static str,
        /// Operation that was attempted
        operation: &'static str,
    },
}

impl ProviderError {
    /// Map a transport-level `reqwest` failure to the taxonomy.
    #[must_use]
    pub fn from_transport(provider: &'static str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::Unreachable {
                provider,
                message: err.to_string(),
            }
        }
    }

    /// Map a non-success HTTP status to the taxonomy.
    #[must_use]
    pub fn from_status(provider: &'static str, status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthFailure {
                provider,
                message: format!("HTTP {status}: {body}"),
            },
            429 => Self::RateLimited { provider },
            _ => Self::Unreachable {
                provider,
                message: format!("HTTP {status}: {body}"),
            },
        }
    }

    /// Provider this error is scoped to.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Timeout { provider }
            | Self::Unreachable { provider, .. }
            | Self::AuthFailure { provider, .. }
            | Self::RateLimited { provider }
            | Self::MalformedResponse { provider, .. }
            | Self::UnsupportedOperation { provider, .. } => provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_distinguishes_auth_and_rate_limit() {
        let auth = ProviderError::from_status("usda", reqwest::StatusCode::UNAUTHORIZED, "denied");
        assert!(matches!(auth, ProviderError::AuthFailure { .. }));

        let limited =
            ProviderError::from_status("usda", reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(limited, ProviderError::RateLimited { .. }));

        let gone = ProviderError::from_status("usda", reqwest::StatusCode::BAD_GATEWAY, "oops");
        assert!(matches!(gone, ProviderError::Unreachable { .. }));
    }

    #[test]
    fn error_reports_owning_provider() {
        let err = ProviderError::UnsupportedOperation {
            provider: "usda",
            operation: "barcode_lookup",
        };
        assert_eq!(err.provider(), "usda");
        assert_eq!(err.to_string(), "usda does not support barcode_lookup");
    }
}
