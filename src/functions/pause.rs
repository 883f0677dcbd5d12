use chrono::{DateTime, Utc};
use serde::Serialize;

use super::duration::parse_duration;
use super::Function;
use crate::error::{FunctionError, ProbeError};
use crate::models::{InvocationRequest, InvocationResponse, Metadata};

pub const PAUSE_HEADER: &str = "x-nf-pause";

/// Sleeps for the duration given in `x-nf-pause`, then reports when it
/// started and ended.
pub struct PauseFunction;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PauseBody {
    start: String,
    end: String,
    start_unix: i64,
    end_unix: i64,
}

impl PauseBody {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: start.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            end: end.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            start_unix: start.timestamp(),
            end_unix: end.timestamp(),
        }
    }
}

impl Function for PauseFunction {
    fn name(&self) -> &'static str {
        "pause"
    }

    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse, FunctionError> {
        let start = Utc::now();

        if let Some(pause) = request.header(PAUSE_HEADER) {
            let duration = parse_duration(pause).map_err(ProbeError::InvalidDuration)?;
            // Negative pauses return immediately
            let duration = duration.to_std().unwrap_or_default();
            tracing::debug!(pause_ms = duration.as_millis() as u64, "Pausing invocation");
            std::thread::sleep(duration);
        }

        let body = serde_json::to_string(&PauseBody::new(start, Utc::now()))
            .map_err(ProbeError::from)?;

        Ok(InvocationResponse::new(200, body).with_metadata(Metadata::builder(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_no_pause() {
        let response = PauseFunction.invoke(&InvocationRequest::new("/")).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.metadata, Some(Metadata::builder(true)));

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        for key in ["Start", "End"] {
            assert!(body[key].is_string(), "missing {key}");
        }
        assert!(body["EndUnix"].as_i64().unwrap() >= body["StartUnix"].as_i64().unwrap());
    }

    #[test]
    fn test_pause_sleeps() {
        let started = Instant::now();
        PauseFunction
            .invoke(&InvocationRequest::new("/").with_header(PAUSE_HEADER, "50ms"))
            .unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    }

    #[test]
    fn test_negative_pause_returns_immediately() {
        let started = Instant::now();
        PauseFunction
            .invoke(&InvocationRequest::new("/").with_header(PAUSE_HEADER, "-10s"))
            .unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_pause() {
        let err = PauseFunction
            .invoke(&InvocationRequest::new("/").with_header(PAUSE_HEADER, "forever"))
            .unwrap_err();
        assert!(matches!(
            err,
            FunctionError::Probe(ProbeError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_body_field_format() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let end = DateTime::from_timestamp(1_700_000_002, 0).unwrap();
        let json = serde_json::to_value(PauseBody::new(start, end)).unwrap();
        assert_eq!(json["Start"], "2023-11-14T22:13:20Z");
        assert_eq!(json["End"], "2023-11-14T22:13:22Z");
        assert_eq!(json["StartUnix"], 1_700_000_000);
        assert_eq!(json["EndUnix"], 1_700_000_002);
    }
}
