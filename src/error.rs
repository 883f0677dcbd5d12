use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::num::ParseIntError;
use thiserror::Error;

use crate::functions::duration::DurationError;
use crate::imaging::codec::DecodeError;

/// Failure of a single function invocation.
///
/// The host turns this into a platform-level error response; no fallback
/// body is ever synthesized from it.
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error(transparent)]
    Resize(#[from] ResizeError),

    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl FunctionError {
    /// Short machine-readable error type, reported as `errorType`.
    pub fn kind(&self) -> &'static str {
        match self {
            FunctionError::Resize(e) => e.kind(),
            FunctionError::Probe(e) => e.kind(),
        }
    }
}

/// Errors of the image resize pipeline, one variant per failing stage.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("invalid path: {path}")]
    MalformedPath { path: String },

    #[error("invalid ratio")]
    InvalidRatio(#[source] RatioError),

    #[error("failed getting original {url}")]
    OriginUnreachable {
        url: String,
        #[source]
        source: OriginError,
    },

    #[error("failed to decode original image")]
    Decode(#[source] DecodeError),

    #[error("failed to encode")]
    Encode(#[source] png::EncodingError),
}

/// Pipeline stage a [`ResizeError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Path,
    Fetch,
    Decode,
    Scale,
    Encode,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Path => "path",
            Stage::Fetch => "fetch",
            Stage::Decode => "decode",
            Stage::Scale => "scale",
            Stage::Encode => "encode",
        }
    }
}

impl ResizeError {
    pub fn stage(&self) -> Stage {
        match self {
            ResizeError::MalformedPath { .. } => Stage::Path,
            ResizeError::InvalidRatio(RatioError::Parse { .. }) => Stage::Path,
            ResizeError::InvalidRatio(_) => Stage::Scale,
            ResizeError::OriginUnreachable { .. } => Stage::Fetch,
            ResizeError::Decode(_) => Stage::Decode,
            ResizeError::Encode(_) => Stage::Encode,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResizeError::MalformedPath { .. } => "MalformedPathError",
            ResizeError::InvalidRatio(_) => "InvalidRatioError",
            ResizeError::OriginUnreachable { .. } => "OriginUnreachableError",
            ResizeError::Decode(_) => "DecodeError",
            ResizeError::Encode(_) => "EncodeError",
        }
    }
}

impl From<RatioError> for ResizeError {
    fn from(e: RatioError) -> Self {
        ResizeError::InvalidRatio(e)
    }
}

/// Why a scale factor was rejected.
#[derive(Debug, Error)]
pub enum RatioError {
    #[error("failed parsing ratio {value:?}")]
    Parse {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ratio must be positive, got {0}")]
    NonPositive(i64),

    #[error("ratio {ratio} reduces {width}x{height} image to {dest_width}x{dest_height}")]
    Degenerate {
        ratio: i64,
        width: u32,
        height: u32,
        dest_width: u32,
        dest_height: u32,
    },
}

/// Network-level failure while talking to the origin.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("no origin host configured and request has no host header")]
    MissingHost,

    #[error("invalid origin url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors raised by the fault-injection functions.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("fail header detected")]
    FailHeader,

    #[error("failed processing")]
    InvalidStatusCode(#[source] ParseIntError),

    #[error("failed parsing duration")]
    InvalidDuration(#[source] DurationError),

    #[error("failed marshaling body")]
    Serialize(#[from] serde_json::Error),
}

impl ProbeError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::FailHeader => "FailHeaderError",
            ProbeError::InvalidStatusCode(_) => "InvalidStatusCodeError",
            ProbeError::InvalidDuration(_) => "InvalidDurationError",
            ProbeError::Serialize(_) => "SerializeError",
        }
    }
}

/// Errors surfaced by the local invocation host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    #[error(transparent)]
    Invocation(#[from] FunctionError),

    #[error("Invalid function response: {0}")]
    InvalidResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Render an error and its whole `source()` chain as `outer: inner: ...`.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            HostError::FunctionNotFound(_) => {
                (StatusCode::NOT_FOUND, "FunctionNotFound", self.to_string())
            }
            HostError::Invocation(e) => (StatusCode::BAD_GATEWAY, e.kind(), error_chain(e)),
            HostError::InvalidResponse(_) => {
                (StatusCode::BAD_GATEWAY, "InvalidResponse", self.to_string())
            }
            HostError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                self.to_string(),
            ),
        };

        let body = Json(json!({
            "errorType": error_type,
            "errorMessage": message,
        }));

        (status, body).into_response()
    }
}
