//! Error types for the release-notes host domain.
//!
//! [`ChangelogError`] covers conditions that abort changelog creation.
//! [`LookupError`] is returned by [`crate::GraphQlClient`] implementations;
//! plugins are expected to degrade on it rather than propagate it.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Changelog-level errors
// ---------------------------------------------------------------------------

/// Errors that abort creation of a changelog.
///
/// Returned from `on_create_changelog` taps and surfaced to whoever drives the
/// host. A plugin returns one of these only when it cannot be set up at all.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The changelog base URL could not be parsed.
    #[error("Invalid changelog base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The URL as supplied by the host.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Remote lookup errors
// ---------------------------------------------------------------------------

/// Failure of a single GraphQL request against the code host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("GraphQL transport failure: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("GraphQL endpoint returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The endpoint answered, but reported GraphQL errors.
    #[error("GraphQL query rejected: {}", messages.join("; "))]
    Rejected {
        /// Messages from the response's `errors` array.
        messages: Vec<String>,
    },

    /// The response carried no data.
    #[error("GraphQL response was empty")]
    EmptyResponse,

    /// The response data did not have the expected shape.
    #[error("Malformed GraphQL response: {message}")]
    MalformedResponse {
        /// Description of the mismatch.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_joins_messages() {
        let err = LookupError::Rejected {
            messages: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "GraphQL query rejected: a; b");
    }
}
