//! Demo request descriptor.

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// HTTP method token.
///
/// Tokens outside the known set are kept verbatim in [`Method::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Other(String),
}

impl Method {
    /// Parse a method token. Unknown tokens pass through untouched.
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(token: &str) -> Self {
        Method::parse(token)
    }
}

impl From<String> for Method {
    fn from(token: String) -> Self {
        Method::parse(&token)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

/// Request descriptor handed to a demo service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRequest {
    /// HTTP method.
    pub method: Method,
    /// Request URL, never parsed.
    pub url: String,
    /// Headers keyed by lower-case name.
    #[serde(default, deserialize_with = "lowercase_headers")]
    pub headers: HashMap<String, String>,
    /// Opaque request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Bytes>,
}

fn lowercase_headers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect())
}

impl DemoRequest {
    /// Create a new request without headers or body.
    pub fn new(method: impl Into<Method>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Shorthand for a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Add a header. The name is stored lower-cased.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header by name, ignoring ASCII case.
    ///
    /// Stored names are always lower-case, whether they came through
    /// [`DemoRequest::header`] or deserialization.
    pub fn get_header(&self, key: &str) -> Option<&String> {
        self.headers.get(&key.to_ascii_lowercase())
    }

    /// Get the body as text if present.
    pub fn text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }
}

impl Default for DemoRequest {
    fn default() -> Self {
        Self::get("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_known_tokens() {
        assert_eq!(Method::parse("GET"), Method::Get);
        assert_eq!(Method::parse("DELETE"), Method::Delete);
        assert_eq!(Method::parse("PATCH"), Method::Patch);
    }

    #[test]
    fn test_method_parse_passes_unknown_through() {
        let method = Method::parse("BREW");
        assert_eq!(method, Method::Other("BREW".to_string()));
        assert_eq!(method.to_string(), "BREW");

        // Tokens are case-sensitive.
        assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    }

    #[test]
    fn test_method_serializes_as_token() {
        let json = serde_json::to_string(&Method::Put).unwrap();
        assert_eq!(json, "\"PUT\"");

        let method: Method = serde_json::from_str("\"PURGE\"").unwrap();
        assert_eq!(method, Method::Other("PURGE".to_string()));
    }

    #[test]
    fn test_header_names_are_lowercased() {
        let request = DemoRequest::get("/").header("User-Agent", "StackBlitz/1.0");
        assert!(request.headers.contains_key("user-agent"));
        assert_eq!(
            request.get_header("USER-AGENT"),
            Some(&"StackBlitz/1.0".to_string())
        );
    }

    #[test]
    fn test_request_from_json_defaults_headers() {
        let request: DemoRequest =
            serde_json::from_str(r#"{"method":"GET","url":"/api/health"}"#).unwrap();
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_deserialized_header_names_are_lowercased() {
        let request: DemoRequest = serde_json::from_str(
            r#"{"method":"GET","url":"/test","headers":{"User-Agent":"X","X-Trace":"1"}}"#,
        )
        .unwrap();

        assert_eq!(request.get_header("user-agent"), Some(&"X".to_string()));
        assert_eq!(request.get_header("X-TRACE"), Some(&"1".to_string()));
        assert!(request.headers.contains_key("x-trace"));
    }

    #[test]
    fn test_body_text() {
        let request = DemoRequest::post("/api/products").body("{\"name\":\"Mouse\"}");
        assert_eq!(request.text(), Some("{\"name\":\"Mouse\"}".to_string()));
    }
}
