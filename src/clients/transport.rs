//! The transport seam between record operations and the network.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_response::HttpResponse;

/// Performs HTTP calls on behalf of record operations.
///
/// Record operations only ever need three verbs: `GET` (no body), `POST`
/// (with body) and `PATCH`. [`HttpClient`](crate::clients::HttpClient) is
/// the reqwest-backed implementation; tests or applications with their own
/// HTTP stack can provide another.
///
/// Implementations may return non-2xx responses as `Ok`; callers check
/// [`HttpResponse::is_ok`] before decoding.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends a `GET` when `body` is `None`, otherwise a `POST` carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call cannot be completed.
    async fn request(
        &self,
        url: &str,
        body: Option<&serde_json::Value>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError>;

    /// Sends a `PATCH` carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call cannot be completed.
    async fn patch(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError>;
}
