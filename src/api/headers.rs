//! Conversion between HTTP header maps and invocation envelope headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

use crate::error::HostError;

/// Extension trait for reading inbound request headers.
pub trait HeaderMapExt {
    /// Flatten into envelope headers: lowercase names, repeated values joined
    /// with `", "`. Values that are not valid UTF-8 are dropped.
    fn to_invocation_headers(&self) -> HashMap<String, String>;
}

impl HeaderMapExt for HeaderMap {
    fn to_invocation_headers(&self) -> HashMap<String, String> {
        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in self {
            let Ok(value) = value.to_str() else {
                tracing::debug!(header = %name, "Dropping non UTF-8 header value");
                continue;
            };
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        headers
    }
}

/// Build an outbound header map from envelope headers.
///
/// Any name or value HTTP cannot carry makes the whole envelope invalid.
pub fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, HostError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HostError::InvalidResponse(format!("invalid header name {name:?}")))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            HostError::InvalidResponse(format!("invalid value for header {name:?}"))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_headers_join_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("image/png"));
        headers.append("accept", HeaderValue::from_static("image/webp"));
        headers.insert("X-NF-Pause", HeaderValue::from_static("1s"));

        let flat = headers.to_invocation_headers();
        assert_eq!(flat["accept"], "image/png, image/webp");
        assert_eq!(flat["x-nf-pause"], "1s");
    }

    #[test]
    fn test_invocation_headers_drop_opaque_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert!(headers.to_invocation_headers().is_empty());
    }

    #[test]
    fn test_to_header_map() {
        let headers = HashMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("0".to_string(), "abc".to_string()),
        ]);
        let map = to_header_map(&headers).unwrap();
        assert_eq!(map["content-type"], "application/json");
        assert_eq!(map["0"], "abc");
    }

    #[test]
    fn test_to_header_map_rejects_invalid() {
        let bad_name = HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(
            to_header_map(&bad_name),
            Err(HostError::InvalidResponse(_))
        ));

        let bad_value = HashMap::from([("x-bad".to_string(), "line\nbreak".to_string())]);
        assert!(matches!(
            to_header_map(&bad_value),
            Err(HostError::InvalidResponse(_))
        ));
    }
}
