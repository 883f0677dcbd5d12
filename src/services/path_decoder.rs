//! Splits `<origin-path>/ratio/<integer>` request paths.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{RatioError, ResizeError};
use crate::models::InvocationRequest;

/// Everything up to the last `/ratio/` is the origin path.
static RATIO_PATH: OnceLock<Regex> = OnceLock::new();

fn ratio_path() -> &'static Regex {
    RATIO_PATH
        .get_or_init(|| Regex::new(r"(.*)/ratio/(.*)").expect("valid ratio path pattern"))
}

/// A decoded resize request, valid for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    pub origin_path: String,
    pub scale_factor: i64,
    pub request_host: String,
}

impl ResizeRequest {
    pub fn from_invocation(request: &InvocationRequest) -> Result<Self, ResizeError> {
        let (origin_path, scale_factor) = decode_path(&request.path)?;
        Ok(Self {
            origin_path,
            scale_factor,
            request_host: request.header("host").unwrap_or_default().to_string(),
        })
    }
}

/// Extract `(origin_path, scale_factor)` from a request path.
///
/// Zero and negative factors are accepted here and rejected by the scaler.
pub fn decode_path(path: &str) -> Result<(String, i64), ResizeError> {
    let captures = ratio_path()
        .captures(path)
        .ok_or_else(|| ResizeError::MalformedPath {
            path: path.to_string(),
        })?;

    let origin_path = captures.get(1).map_or("", |m| m.as_str());
    let ratio = captures.get(2).map_or("", |m| m.as_str());

    let scale_factor = ratio.parse::<i64>().map_err(|source| RatioError::Parse {
        value: ratio.to_string(),
        source,
    })?;

    Ok((origin_path.to_string(), scale_factor))
}
