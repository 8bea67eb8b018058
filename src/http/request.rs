//! Request descriptors for a single API call.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;

/// Body of an API request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as-is.
    Raw(String),
    /// Serialized to JSON at send time.
    Json(Value),
}

impl RequestBody {
    pub fn into_text(self) -> String {
        match self {
            RequestBody::Raw(text) => text,
            RequestBody::Json(value) => value.to_string(),
        }
    }
}

/// Describes one call: endpoint path, method, optional body, extra headers
/// and query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a structured body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::InvalidRequest(format!("request body could not be serialized: {}", e))
        })?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a pre-serialized body.
    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Add a header. Overrides the client's default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }
}

/// Percent-encode a single path segment (everything but RFC 3986 unreserved
/// characters), for user-supplied names such as KV keys.
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_defaults() {
        let request = ApiRequest::get("/zones");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/zones");
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_builder_collects_parts() {
        let request = ApiRequest::post("/zones/z1/dns_records")
            .json(&json!({"type": "A"}))
            .unwrap()
            .header("X-Extra", "1")
            .query("page", "2")
            .query_opt("name", None::<String>)
            .query_opt("type", Some("A"));

        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body,
            Some(RequestBody::Json(json!({"type": "A"})))
        );
        assert_eq!(request.headers, vec![("X-Extra".into(), "1".into())]);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("type".to_string(), "A".to_string())
            ]
        );
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[test]
    fn test_json_serialization_failure_is_reported() {
        let result = ApiRequest::post("/zones").json(&Unserializable);
        match result {
            Err(ApiError::InvalidRequest(msg)) => assert!(msg.contains("refused")),
            other => panic!("Expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_body_text() {
        assert_eq!(RequestBody::Raw("{not json".into()).into_text(), "{not json");
        assert_eq!(
            RequestBody::Json(json!({"a": 1})).into_text(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("plain-key_1.txt"), "plain-key_1.txt");
        assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_path_segment("ü"), "%C3%BC");
    }
}
