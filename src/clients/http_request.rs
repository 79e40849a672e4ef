//! HTTP request types for the Salesforce model SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against Salesforce REST endpoints.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by Salesforce record operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving records and running queries.
    Get,
    /// HTTP POST method for creating records.
    Post,
    /// HTTP PATCH method for updating records.
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    Json,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// An HTTP request to be sent to Salesforce.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use salesforce_model::clients::{HttpRequest, HttpMethod, DataType};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(
///     HttpMethod::Get,
///     "https://na1.salesforce.com/services/data/v20.0/sobjects/Account/001xx",
/// )
/// .build()
/// .unwrap();
///
/// let post_request = HttpRequest::builder(
///     HttpMethod::Post,
///     "https://na1.salesforce.com/services/data/v20.0/sobjects/Account",
/// )
/// .body(json!({"Name": "Acme"}))
/// .body_type(DataType::Json)
/// .build()
/// .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is not an absolute `http`/`https` URL
    /// - `body` is `Some` but `body_type` is `None`
    /// - `http_method` is `Post` or `Patch` but `body` is `None`
    /// - `tries` is zero
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Patch) && self.body.is_none()
        {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.tries == 0 {
            return Err(InvalidHttpRequestError::ZeroTries);
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<serde_json::Value>,
    body_type: Option<DataType>,
    extra_headers: Option<HashMap<String, String>>,
    tries: u32,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            body_type: None,
            extra_headers: None,
            tries: 1,
        }
    }

    /// Sets the request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all extra headers at once.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries). Set to a higher value to enable
    /// automatic retries for 429 and 503 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            body_type: self.body_type,
            extra_headers: self.extra_headers,
            tries: self.tries,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://na1.salesforce.com/services/data/v20.0/sobjects/Account";

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
    }

    #[test]
    fn test_builder_defaults() {
        let request = HttpRequest::builder(HttpMethod::Get, URL).build().unwrap();
        assert_eq!(request.tries, 1);
        assert!(request.body.is_none());
        assert!(request.extra_headers.is_none());
    }

    #[test]
    fn test_post_requires_body() {
        let result = HttpRequest::builder(HttpMethod::Post, URL).build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));
    }

    #[test]
    fn test_patch_requires_body() {
        let result = HttpRequest::builder(HttpMethod::Patch, URL).build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "patch"
        ));
    }

    #[test]
    fn test_body_requires_body_type() {
        let result = HttpRequest::builder(HttpMethod::Post, URL)
            .body(json!({"Name": "Acme"}))
            .build();
        assert_eq!(result.unwrap_err(), InvalidHttpRequestError::MissingBodyType);
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "/sobjects/Account").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_zero_tries_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, URL).tries(0).build();
        assert_eq!(result.unwrap_err(), InvalidHttpRequestError::ZeroTries);
    }

    #[test]
    fn test_headers_accumulate() {
        let request = HttpRequest::builder(HttpMethod::Get, URL)
            .header("Authorization", "Bearer abc")
            .header("Sforce-Query-Options", "batchSize=200")
            .build()
            .unwrap();
        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer abc");
    }
}
