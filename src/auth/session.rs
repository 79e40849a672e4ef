//! Session management for Salesforce API authorization.
//!
//! This module provides the [`Session`] type holding an access token, and the
//! [`SessionStore`] through which an application's OAuth flow hands the
//! current session to the SDK.

use crate::auth::{AuthError, AuthorizationProvider};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// The token type Salesforce issues for OAuth web server and password flows.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// An authenticated Salesforce session.
///
/// The `Debug` implementation masks the access token.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use salesforce_model::auth::Session;
///
/// let session = Session::new("token", "https://na1.salesforce.com");
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Clone)]
pub struct Session {
    /// The access token for API authorization.
    pub access_token: String,

    /// The instance URL the token was issued for.
    pub instance_url: String,

    /// The token type used as the header scheme.
    pub token_type: String,

    /// The identity URL of the authenticated user, if known.
    pub id: Option<String>,

    /// When the token was issued, if known.
    pub issued_at: Option<DateTime<Utc>>,

    /// When this session expires, if applicable.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a bearer session with no expiration.
    #[must_use]
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            id: None,
            issued_at: None,
            expires: None,
        }
    }

    /// Sets the expiration time.
    #[must_use]
    pub const fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Sets the token type used as the header scheme.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session is active (not expired and has access token).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"*****")
            .field("instance_url", &self.instance_url)
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .field("expires", &self.expires)
            .finish()
    }
}

impl AuthorizationProvider for Session {
    fn authorization_header(&self) -> Result<String, AuthError> {
        if self.access_token.is_empty() {
            return Err(AuthError::MissingAccessToken);
        }
        if let Some(expired_at) = self.expires.filter(|_| self.expired()) {
            return Err(AuthError::SessionExpired { expired_at });
        }
        let scheme = if self.token_type.is_empty() {
            DEFAULT_TOKEN_TYPE
        } else {
            &self.token_type
        };
        Ok(format!("{scheme} {}", self.access_token))
    }
}

/// A shared slot holding the current session.
///
/// Cloning a `SessionStore` yields a handle to the same slot, so an OAuth
/// callback handler can install a new session while clients keep reading
/// from their own handle.
///
/// # Example
///
/// ```rust
/// use salesforce_model::auth::{AuthorizationProvider, AuthError, Session, SessionStore};
///
/// let store = SessionStore::new();
/// assert!(matches!(store.authorization_header(), Err(AuthError::NoSession)));
///
/// store.set(Session::new("token", "https://na1.salesforce.com"));
/// assert_eq!(store.authorization_header().unwrap(), "Bearer token");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    /// Installs or replaces the current session.
    pub fn set(&self, session: Session) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(session);
    }

    /// Removes and returns the current session.
    pub fn clear(&self) -> Option<Session> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuthorizationProvider for SessionStore {
    fn authorization_header(&self) -> Result<String, AuthError> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .ok_or(AuthError::NoSession)?
            .authorization_header()
    }
}

// Verify Session and SessionStore are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
    assert_send_sync::<SessionStore>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expired() {
        let expired = Session::new("token", "https://na1.salesforce.com")
            .with_expires(Utc::now() - Duration::hours(1));
        assert!(expired.expired());

        let valid = Session::new("token", "https://na1.salesforce.com")
            .with_expires(Utc::now() + Duration::hours(1));
        assert!(!valid.expired());

        let no_expiry = Session::new("token", "https://na1.salesforce.com");
        assert!(!no_expiry.expired());
    }

    #[test]
    fn test_session_is_active() {
        assert!(Session::new("token", "https://na1.salesforce.com").is_active());
        assert!(!Session::new("", "https://na1.salesforce.com").is_active());
    }

    #[test]
    fn test_authorization_header_uses_token_type() {
        let session = Session::new("abc", "https://na1.salesforce.com").with_token_type("OAuth");
        assert_eq!(session.authorization_header().unwrap(), "OAuth abc");
    }

    #[test]
    fn test_authorization_header_rejects_empty_token() {
        let session = Session::new("", "https://na1.salesforce.com");
        assert_eq!(
            session.authorization_header(),
            Err(AuthError::MissingAccessToken)
        );
    }

    #[test]
    fn test_authorization_header_rejects_expired_session() {
        let expires = Utc::now() - Duration::minutes(5);
        let session = Session::new("abc", "https://na1.salesforce.com").with_expires(expires);
        assert_eq!(
            session.authorization_header(),
            Err(AuthError::SessionExpired {
                expired_at: expires
            })
        );
    }

    #[test]
    fn test_debug_masks_access_token() {
        let session = Session::new("super-secret-token", "https://na1.salesforce.com");
        let debug_str = format!("{session:?}");
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("na1.salesforce.com"));
    }

    #[test]
    fn test_store_handles_share_session() {
        let store = SessionStore::new();
        let handle = store.clone();

        store.set(Session::new("first", "https://na1.salesforce.com"));
        assert_eq!(handle.authorization_header().unwrap(), "Bearer first");

        store.set(Session::new("second", "https://na1.salesforce.com"));
        assert_eq!(handle.authorization_header().unwrap(), "Bearer second");

        assert!(handle.clear().is_some());
        assert_eq!(store.authorization_header(), Err(AuthError::NoSession));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_store_with_session() {
        let store = SessionStore::with_session(Session::new("abc", "https://na1.salesforce.com"));
        assert_eq!(store.current().unwrap().access_token, "abc");
    }
}
