//! HTTP client for Salesforce REST communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::SalesforceConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Percentage of the daily API allocation at which a warning is logged.
pub const API_USAGE_WARNING_PERCENT: u32 = 90;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to Salesforce.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - Automatic retry logic for 429 and 503 responses
/// - Salesforce error body formatting
/// - API usage monitoring through the `Sforce-Limit-Info` header
///
/// Authorization is not handled here; callers pass the `Authorization`
/// header with each request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use salesforce_model::clients::HttpClient;
///
/// let client = HttpClient::new(None).unwrap().with_tries(3);
/// assert_eq!(client.tries(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Attempts made for requests sent through [`Transport`].
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// The configuration, when given, supplies the `user_agent_prefix` and
    /// the `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: Option<&SalesforceConfig>) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .and_then(SalesforceConfig::user_agent_prefix)
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Salesforce Model Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.and_then(SalesforceConfig::request_timeout) {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            default_headers,
            tries: 1,
        })
    }

    /// Sets how many times requests sent through [`Transport`] are attempted.
    #[must_use]
    pub const fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Returns the number of attempts made for each request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to Salesforce.
    ///
    /// This method handles request validation, header merging, retries for
    /// 429 and 503 responses, and API usage warnings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                method = %request.http_method,
                url = %request.url,
                attempt = tries,
                "Sending Salesforce request"
            );

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
                HttpMethod::Patch => self.client.patch(&request.url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let response = HttpResponse::new(code, res_headers, body_text);

            if let Some(usage) = response.api_usage {
                if usage.is_near_limit(API_USAGE_WARNING_PERCENT) {
                    tracing::warn!(
                        used = usage.used,
                        limit = usage.limit,
                        "Salesforce API usage is close to the org's daily limit"
                    );
                }
            }

            if response.is_ok() {
                return Ok(response);
            }

            let (error_message, error_code) = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 503;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_code,
                }));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_code,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::debug!(
                status = code,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying Salesforce request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Uses `Retry-After` when present and representable, otherwise a fixed delay.
    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        response
            .retry_request_after
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(Duration::from_secs(RETRY_WAIT_TIME))
    }

    /// Builds an error message and error code from a failed response.
    ///
    /// Salesforce REST failures carry `[{"message": .., "errorCode": ..}]`;
    /// OAuth failures carry `{"error": .., "error_description": ..}`.
    pub(crate) fn serialize_error(response: &HttpResponse) -> (String, Option<String>) {
        let body = response.json().unwrap_or(serde_json::Value::Null);

        let entries: Vec<&serde_json::Value> = match &body {
            serde_json::Value::Array(items) => items.iter().collect(),
            serde_json::Value::Object(_) => vec![&body],
            _ => Vec::new(),
        };

        let mut messages = Vec::new();
        let mut first_code = None;
        for entry in entries {
            let code = entry
                .get("errorCode")
                .or_else(|| entry.get("error"))
                .and_then(serde_json::Value::as_str);
            let message = entry
                .get("message")
                .or_else(|| entry.get("error_description"))
                .and_then(serde_json::Value::as_str);

            if first_code.is_none() {
                first_code = code.map(String::from);
            }
            match (code, message) {
                (Some(code), Some(message)) => messages.push(format!("{code}: {message}")),
                (Some(only), None) | (None, Some(only)) => messages.push(only.to_string()),
                (None, None) => {}
            }
        }

        let message = if messages.is_empty() {
            let raw = response.body.trim();
            if raw.is_empty() {
                format!("HTTP {}", response.code)
            } else {
                raw.to_string()
            }
        } else {
            messages.join("; ")
        };

        (message, first_code)
    }
}

impl Transport for HttpClient {
    async fn request(
        &self,
        url: &str,
        body: Option<&serde_json::Value>,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let builder = match body {
            Some(body) => HttpRequest::builder(HttpMethod::Post, url)
                .body(body.clone())
                .body_type(DataType::Json),
            None => HttpRequest::builder(HttpMethod::Get, url),
        };
        let request = builder
            .extra_headers(headers.clone())
            .tries(self.tries)
            .build()?;
        self.send(request).await
    }

    async fn patch(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Patch, url)
            .body(body.clone())
            .body_type(DataType::Json)
            .extra_headers(headers.clone())
            .tries(self.tries)
            .build()?;
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstanceUrl;

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(None).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Salesforce Model Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = SalesforceConfig::builder()
            .instance_url(InstanceUrl::new("https://cs81.salesforce.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .request_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        let client = HttpClient::new(Some(&config)).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("Salesforce Model Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(None).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_default_tries_is_one() {
        let client = HttpClient::new(None).unwrap();
        assert_eq!(client.tries(), 1);
    }

    #[test]
    fn test_serialize_error_from_salesforce_error_array() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            r#"[{"message":"No such column 'Foo'","errorCode":"INVALID_FIELD"},{"message":"second","errorCode":"OTHER"}]"#,
        );
        let (message, code) = HttpClient::serialize_error(&response);
        assert_eq!(
            message,
            "INVALID_FIELD: No such column 'Foo'; OTHER: second"
        );
        assert_eq!(code.as_deref(), Some("INVALID_FIELD"));
    }

    #[test]
    fn test_serialize_error_from_oauth_error_object() {
        let response = HttpResponse::new(
            401,
            HashMap::new(),
            r#"{"error":"invalid_grant","error_description":"expired access/refresh token"}"#,
        );
        let (message, code) = HttpClient::serialize_error(&response);
        assert_eq!(message, "invalid_grant: expired access/refresh token");
        assert_eq!(code.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_serialize_error_falls_back_to_raw_body_or_status() {
        let response = HttpResponse::new(502, HashMap::new(), "Bad Gateway");
        assert_eq!(HttpClient::serialize_error(&response).0, "Bad Gateway");

        let response = HttpResponse::new(500, HashMap::new(), "");
        assert_eq!(HttpClient::serialize_error(&response).0, "HTTP 500");
    }

    #[test]
    fn test_retry_delay_prefers_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2".to_string()]);
        let response = HttpResponse::new(429, headers, "");
        assert_eq!(
            HttpClient::calculate_retry_delay(&response),
            Duration::from_secs(2)
        );

        let response = HttpResponse::new(503, HashMap::new(), "");
        assert_eq!(
            HttpClient::calculate_retry_delay(&response),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_retry_delay_falls_back_on_unrepresentable_retry_after() {
        for value in ["1e300", "-5", "NaN", "inf"] {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
            let response = HttpResponse::new(429, headers, "");
            assert_eq!(
                HttpClient::calculate_retry_delay(&response),
                Duration::from_secs(RETRY_WAIT_TIME),
                "retry-after: {value}"
            );
        }
    }
}
