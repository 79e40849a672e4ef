//! HTTP-specific error types for the Salesforce model SDK.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_model::clients::{HttpClient, HttpError, Transport};
//!
//! match client.request(url, None, &headers).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Retries exhausted after {} tries", e.tries);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => {
//!         println!("Invalid request: {}", e);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// Salesforce reports failures as an array of `{"message", "errorCode"}`
/// objects. The `message` field joins them as `ERROR_CODE: message` pairs,
/// and `error_code` holds the first error code.
///
/// # Example
///
/// ```rust
/// use salesforce_model::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "NOT_FOUND: The requested resource does not exist".to_string(),
///     error_code: Some("NOT_FOUND".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "NOT_FOUND: The requested resource does not exist");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message assembled from the response body.
    pub message: String,
    /// The first Salesforce `errorCode`, if the body carried one.
    pub error_code: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// This error is raised when a request continues to fail with 429 or 503
/// responses after all configured retry attempts have been made.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use salesforce_model::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "patch".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use patch without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request URL is not absolute.
    #[error("Invalid request URL '{url}'. Requests require an absolute http(s) URL.")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The retry count was zero.
    #[error("Requests must be attempted at least once.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 400,
            message: "MALFORMED_QUERY: unexpected token".to_string(),
            error_code: Some("MALFORMED_QUERY".to_string()),
        };
        assert_eq!(error.to_string(), "MALFORMED_QUERY: unexpected token");
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 503,
            tries: 3,
            message: "Service Unavailable".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_invalid_request_error_invalid_url() {
        let error = InvalidHttpRequestError::InvalidUrl {
            url: "/sobjects/Account".to_string(),
        };
        assert!(error.to_string().contains("/sobjects/Account"));
    }

    #[test]
    fn test_http_error_status() {
        let error = HttpError::Response(HttpResponseError {
            code: 404,
            message: "not found".to_string(),
            error_code: None,
        });
        assert_eq!(error.status(), Some(404));

        let error = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType);
        assert_eq!(error.status(), None);
    }
}
