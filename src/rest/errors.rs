//! Error types for Salesforce record operations.
//!
//! Every record operation returns `Result<T, ResourceError>`. Failures from
//! the transport and the authorization provider are wrapped rather than
//! swallowed, so callers always receive a typed error instead of a
//! diagnostic string.
//!
//! # Example
//!
//! ```rust,ignore
//! use salesforce_model::rest::{ResourceError, SObjectResource};
//! use salesforce_model::rest::resources::Account;
//!
//! match Account::find(&client, "001xx000003DGb2AAG").await {
//!     Ok(record) => println!("Found: {record}"),
//!     Err(ResourceError::Auth(e)) => println!("Sign in again: {e}"),
//!     Err(e) if e.status() == Some(404) => println!("No such account"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::auth::AuthError;
use crate::clients::{HttpClient, HttpError, HttpResponse, HttpResponseError};
use thiserror::Error;

/// Error type for Salesforce record operations.
///
/// # Example
///
/// ```rust
/// use salesforce_model::rest::ResourceError;
///
/// let error = ResourceError::ActiveRecordNotSet {
///     object: "Account".to_string(),
/// };
/// assert!(error.to_string().contains("Active record is not set"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The descriptor is missing its base URL or object path.
    ///
    /// Raised before any network call is attempted.
    #[error("The connection for object path '{object_path}' is not configured. Both the base URL and the object path must be set.")]
    ConnectionNotConfigured {
        /// The object path of the descriptor (may be empty).
        object_path: String,
    },

    /// An update was attempted on a record without a primary-key value.
    #[error("Active record is not set: the {object} record has no primary key value.")]
    ActiveRecordNotSet {
        /// The object name of the record.
        object: String,
    },

    /// An operation that requires an id was given an empty one.
    #[error("Cannot {operation} a record with an empty id.")]
    EmptyId {
        /// The operation being attempted (e.g. "find").
        operation: &'static str,
    },

    /// A field name is not a valid SOQL identifier.
    #[error("Invalid field name '{field}'. Field names must start with a letter and contain only letters, digits and underscores.")]
    InvalidFieldName {
        /// The rejected field name.
        field: String,
    },

    /// A response or input payload could not be used as record data.
    #[error("Invalid payload: {reason}")]
    InvalidPayload {
        /// Why the payload was rejected.
        reason: String,
    },

    /// The HTTP transport failed or Salesforce returned a non-2xx status.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// No valid authorization header could be produced.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResourceError {
    /// Creates a `Transport` error from a non-2xx response.
    #[must_use]
    pub fn from_http_response(response: &HttpResponse) -> Self {
        let (message, error_code) = HttpClient::serialize_error(response);
        Self::Transport(HttpError::Response(HttpResponseError {
            code: response.code,
            message,
            error_code,
        }))
    }

    /// Returns the HTTP status code, if the error came from a Salesforce response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidPayload {
            reason: error.to_string(),
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
