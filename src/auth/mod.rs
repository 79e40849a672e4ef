//! Authorization types for the Salesforce model SDK.
//!
//! Record operations never acquire or refresh tokens themselves. Instead they
//! ask an [`AuthorizationProvider`] for a fresh `Authorization` header value
//! on every request, leaving the token lifecycle to the provider.
//!
//! # Overview
//!
//! - [`AuthorizationProvider`]: Supplies the `Authorization` header value
//! - [`Session`]: A bearer session obtained from a Salesforce OAuth flow
//! - [`SessionStore`]: A shared, replaceable slot holding the current session
//! - [`TokenResponse`]: The OAuth token payload, with signature verification
//! - [`AuthError`]: Failures producing an authorization header
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::auth::{AuthorizationProvider, Session};
//!
//! let session = Session::new("00Dxx!token", "https://na1.salesforce.com");
//! assert_eq!(session.authorization_header().unwrap(), "Bearer 00Dxx!token");
//! ```

mod error;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use session::{Session, SessionStore};
pub use token::TokenResponse;

use std::sync::Arc;

/// Supplies the `Authorization` header attached to every Salesforce call.
///
/// Implementations must be safe to share across tasks. The header is
/// requested once per outbound request and is never cached by callers.
pub trait AuthorizationProvider: Send + Sync {
    /// Returns the header value, for example `"Bearer 00D..."`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when no valid session is available.
    fn authorization_header(&self) -> Result<String, AuthError>;
}

impl<P: AuthorizationProvider + ?Sized> AuthorizationProvider for Arc<P> {
    fn authorization_header(&self) -> Result<String, AuthError> {
        (**self).authorization_header()
    }
}

impl<P: AuthorizationProvider + ?Sized> AuthorizationProvider for &P {
    fn authorization_header(&self) -> Result<String, AuthError> {
        (**self).authorization_header()
    }
}
