use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP-shaped request delivered to a function.
///
/// Header names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub path: String,
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl InvocationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_method: default_method(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Header value, treating an empty value the same as an absent header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Header value parsed as `T`, `None` if missing or unparseable.
    pub fn header_parsed<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.header(name).and_then(|v| v.parse().ok())
    }
}

/// Platform metadata attached to a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: u32,
    pub builder_function: bool,
}

impl Metadata {
    pub const fn builder(builder_function: bool) -> Self {
        Self {
            version: 1,
            builder_function,
        }
    }
}

/// HTTP-shaped response returned by a function.
///
/// `status_code` is whatever the function chose; the host validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub status_code: i64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl InvocationResponse {
    /// Plain-text response with the given status and no headers.
    pub fn new(status_code: i64, body: impl Into<String>) -> Self {
        Self {
            metadata: None,
            status_code,
            headers: HashMap::new(),
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    /// JSON response with `content-type: application/json`.
    pub fn json(status_code: i64, body: impl Into<String>) -> Self {
        Self::new(status_code, body).with_header("content-type", "application/json")
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
