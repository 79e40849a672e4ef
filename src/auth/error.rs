//! Authorization error types.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::auth::AuthError;
//!
//! let error = AuthError::NoSession;
//! assert!(error.to_string().contains("No Salesforce session"));
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced when an authorization header cannot be supplied.
///
/// # Thread Safety
///
/// `AuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The session carries an empty access token.
    #[error("Session has no access token. Complete the OAuth flow before calling Salesforce.")]
    MissingAccessToken,

    /// The session's access token has expired.
    #[error("Salesforce session expired at {expired_at}. Refresh the access token.")]
    SessionExpired {
        /// When the session expired.
        expired_at: DateTime<Utc>,
    },

    /// No session has been installed in the session store.
    #[error("No Salesforce session is available. Complete the OAuth flow before calling Salesforce.")]
    NoSession,

    /// The token response signature did not match.
    #[error("Token response signature validation failed")]
    InvalidSignature,

    /// The token response could not be used.
    #[error("Malformed token response: {reason}")]
    MalformedTokenResponse {
        /// Why the token response was rejected.
        reason: String,
    },
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_message_includes_timestamp() {
        let expired_at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let error = AuthError::SessionExpired { expired_at };
        assert!(error.to_string().contains("2024-01-01"));
    }

    #[test]
    fn test_malformed_token_response_message() {
        let error = AuthError::MalformedTokenResponse {
            reason: "issued_at is not a number".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed token response: issued_at is not a number"
        );
    }
}
