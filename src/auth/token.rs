//! OAuth token responses and their signature verification.
//!
//! Salesforce signs every token response: the `signature` field is the
//! base64-encoded HMAC-SHA256 of the concatenated `id` and `issued_at`
//! values, keyed with the connected app's consumer secret. Verifying it
//! before trusting the token guards against forged callback payloads.
//!
//! # Security
//!
//! Signatures are compared in constant time.
//!
//! # Example
//!
//! ```rust
//! use salesforce_model::auth::token::compute_signature;
//! use salesforce_model::auth::TokenResponse;
//! use salesforce_model::ConsumerSecret;
//!
//! let secret = ConsumerSecret::new("consumer-secret").unwrap();
//! let id = "https://login.salesforce.com/id/00Dx/005x";
//! let issued_at = "1700000000000";
//!
//! let token = TokenResponse {
//!     access_token: "00Dx!token".to_string(),
//!     instance_url: "https://na1.salesforce.com".to_string(),
//!     id: id.to_string(),
//!     token_type: Some("Bearer".to_string()),
//!     issued_at: issued_at.to_string(),
//!     signature: compute_signature(&format!("{id}{issued_at}"), secret.as_ref()).unwrap(),
//!     refresh_token: None,
//!     scope: None,
//! };
//!
//! let session = token.into_session(&secret).unwrap();
//! assert_eq!(session.instance_url, "https://na1.salesforce.com");
//! ```

use crate::auth::{AuthError, Session};
use crate::config::ConsumerSecret;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 of `message` keyed with `secret`.
///
/// # Errors
///
/// Returns [`AuthError::MalformedTokenResponse`] if the key is rejected by
/// the HMAC implementation.
pub fn compute_signature(message: &str, secret: &str) -> Result<String, AuthError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
        AuthError::MalformedTokenResponse {
            reason: e.to_string(),
        }
    })?;
    mac.update(message.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// A token payload returned by the Salesforce OAuth token endpoint.
///
/// The `Debug` implementation redacts the access and refresh tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token.
    pub access_token: String,

    /// The org instance the token is valid for.
    pub instance_url: String,

    /// The identity URL of the authenticated user.
    pub id: String,

    /// The token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,

    /// Issue time in milliseconds since the Unix epoch, as a string.
    pub issued_at: String,

    /// Base64 HMAC-SHA256 of `id + issued_at`.
    pub signature: String,

    /// The refresh token, if the connected app grants one.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Checks the response signature against the consumer secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidSignature`] when the signature does not match.
    pub fn verify_signature(&self, secret: &ConsumerSecret) -> Result<(), AuthError> {
        let signable = format!("{}{}", self.id, self.issued_at);
        let computed = compute_signature(&signable, secret.as_ref())?;
        if constant_time_compare(&computed, &self.signature) {
            Ok(())
        } else {
            Err(AuthError::InvalidSignature)
        }
    }

    /// Returns the issue time.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedTokenResponse`] if `issued_at` is not a
    /// millisecond timestamp.
    pub fn issued_at(&self) -> Result<DateTime<Utc>, AuthError> {
        let millis: i64 =
            self.issued_at
                .parse()
                .map_err(|_| AuthError::MalformedTokenResponse {
                    reason: format!("issued_at '{}' is not a timestamp", self.issued_at),
                })?;
        DateTime::from_timestamp_millis(millis).ok_or_else(|| AuthError::MalformedTokenResponse {
            reason: format!("issued_at '{}' is out of range", self.issued_at),
        })
    }

    /// Verifies the signature and converts the payload into a [`Session`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidSignature`] or
    /// [`AuthError::MalformedTokenResponse`] if the payload cannot be trusted.
    pub fn into_session(self, secret: &ConsumerSecret) -> Result<Session, AuthError> {
        self.verify_signature(secret)?;
        if self.access_token.is_empty() {
            return Err(AuthError::MissingAccessToken);
        }
        let issued_at = self.issued_at()?;

        let mut session = Session::new(self.access_token, self.instance_url);
        if let Some(token_type) = self.token_type.filter(|t| !t.is_empty()) {
            session.token_type = token_type;
        }
        session.id = Some(self.id);
        session.issued_at = Some(issued_at);
        Ok(session)
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
