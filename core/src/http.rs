//! HTTP requests and responses as plain data.
//!
//! # Design
//! The request builder produces `HttpRequest` values and the normalizer
//! consumes `HttpResponse` values. Executing the round-trip is the job of a
//! [`Transport`](crate::transport::Transport), so nothing here touches the
//! network. All fields are owned so values move freely into transports that
//! hop threads.

use std::fmt;

use serde_json::Value;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cookie policy for a request, mirroring the fetch `credentials` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    Omit,
    SameOrigin,
    /// Send cookies, including cross-origin. Every built request uses this.
    #[default]
    Include,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub credentials: Credentials,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. An empty body (e.g. `204 No Content`) is `null`.
    pub fn json(&self) -> Result<Value, ApiError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_covers_the_2xx_range() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(199, "").ok());
        assert!(!HttpResponse::new(304, "").ok());
        assert!(!HttpResponse::new(422, "").ok());
    }

    #[test]
    fn json_parses_any_shape() {
        assert_eq!(HttpResponse::new(200, "[1,2]").json().unwrap(), json!([1, 2]));
        assert_eq!(HttpResponse::new(200, r#""uh oh!""#).json().unwrap(), json!("uh oh!"));
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(HttpResponse::new(204, "").json().unwrap(), Value::Null);
    }

    #[test]
    fn malformed_body_is_a_deserialization_error() {
        let err = HttpResponse::new(200, "not json").json().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "/foo".to_string(),
            headers: vec![("X-CSRF-Token".to_string(), "abc".to_string())],
            credentials: Credentials::Include,
            body: None,
        };
        assert_eq!(request.header("x-csrf-token"), Some("abc"));
        assert_eq!(request.header("content-type"), None);
    }
}
