//! Fetching original images from the origin.

use crate::error::{OriginError, ResizeError};
use crate::models::OriginConfig;

/// Source of raw image bytes.
pub trait Origin: Send + Sync {
    /// Fetch the body at `url`. Any HTTP status counts as success; only
    /// network-level failures are errors.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResizeError>;
}

/// Build the absolute URL `<scheme>://<host><path>`.
///
/// The host comes from configuration when set, else from the request. The
/// path is set as the URL path component, so `?` and `#` are percent-encoded
/// rather than starting a query or fragment. A path without a leading slash
/// gets one.
pub fn origin_url(
    config: &OriginConfig,
    request_host: &str,
    origin_path: &str,
) -> Result<String, ResizeError> {
    let Some(host) = config.resolve_host(request_host) else {
        let slash = if origin_path.is_empty() || origin_path.starts_with('/') {
            ""
        } else {
            "/"
        };
        return Err(ResizeError::OriginUnreachable {
            url: format!("{}://{slash}{origin_path}", config.scheme),
            source: OriginError::MissingHost,
        });
    };

    let base = format!("{}://{host}", config.scheme);
    let mut url = reqwest::Url::parse(&base).map_err(|e| ResizeError::OriginUnreachable {
        url: format!("{base}{origin_path}"),
        source: OriginError::InvalidUrl(e.to_string()),
    })?;
    url.set_path(origin_path);
    Ok(url.into())
}

/// Plain HTTP(S) GET origin backed by a blocking `reqwest` client.
///
/// A fresh client is built for every fetch and no timeout is set; the host
/// owns cancellation.
#[derive(Debug, Default, Clone)]
pub struct HttpOrigin;

impl HttpOrigin {
    pub fn new() -> Self {
        Self
    }
}

impl Origin for HttpOrigin {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ResizeError> {
        let unreachable = |source: reqwest::Error| ResizeError::OriginUnreachable {
            url: url.to_string(),
            source: source.into(),
        };

        tracing::debug!(url = %url, "Fetching original image");

        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(unreachable)?;

        let response = client.get(url).send().map_err(unreachable)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Origin returned non-success status");
        }

        let body = response.bytes().map_err(unreachable)?;
        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            size_bytes = body.len(),
            "Fetched original image"
        );
        Ok(body.to_vec())
    }
}
