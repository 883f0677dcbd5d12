//! Header-driven probe for platform behaviors: forced failures, status code
//! overrides, oversized headers and staleness hints.

use rand::Rng;
use std::collections::HashMap;

use super::duration::parse_duration;
use super::{timestamp_body, Function};
use crate::error::{FunctionError, ProbeError};
use crate::models::{InvocationRequest, InvocationResponse, Metadata};

pub const FAIL_HEADER: &str = "x-nf-should-fail";
pub const NOT_BUILDER_HEADER: &str = "x-nf-not-builder";
pub const STATUS_CODE_HEADER: &str = "x-nf-status-code";
pub const STALE_AT_HEADER: &str = "x-nf-stale-at";
pub const FRESH_FOR_HEADER: &str = "x-nf-fresh-for";
pub const HEADER_SIZE_KB_HEADER: &str = "x-nf-header-size-kb";

/// Length of each generated filler header value
const FILLER_LEN: usize = 1024;

/// Upper bound on filler headers, 1 MiB of header data
pub const MAX_FILLER_HEADERS: i64 = 1024;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct ProbeFunction;

impl Function for ProbeFunction {
    fn name(&self) -> &'static str {
        "test"
    }

    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse, FunctionError> {
        if request.header(FAIL_HEADER).is_some() {
            tracing::info!("Fail header present, failing invocation");
            return Err(ProbeError::FailHeader.into());
        }

        let status = match request.header(STATUS_CODE_HEADER) {
            Some(value) => value
                .parse::<i64>()
                .map_err(ProbeError::InvalidStatusCode)?,
            None => 200,
        };

        let builder = request.header(NOT_BUILDER_HEADER).is_none();

        let size_kb = request
            .header_parsed::<i64>(HEADER_SIZE_KB_HEADER)
            .unwrap_or(0);
        let mut headers = filler_headers(size_kb);
        headers.insert("content-type".to_string(), "application/json".to_string());

        let now = chrono::Utc::now();
        if let Some(fresh_for) = request.header(FRESH_FOR_HEADER) {
            if fresh_for == "invalid" {
                headers.insert(STALE_AT_HEADER.to_string(), "invalid".to_string());
            }
            if let Ok(ttl) = parse_duration(fresh_for) {
                let stale_at = now + ttl;
                headers.insert(
                    STALE_AT_HEADER.to_string(),
                    stale_at.timestamp().to_string(),
                );
            }
        }

        tracing::debug!(
            status,
            builder,
            filler_headers = size_kb.clamp(0, MAX_FILLER_HEADERS),
            "Probe response prepared"
        );

        Ok(InvocationResponse {
            metadata: Some(Metadata::builder(builder)),
            status_code: status,
            headers,
            body: timestamp_body(now.to_rfc3339()),
            is_base64_encoded: false,
        })
    }
}

/// `count` headers named `"0"`, `"1"`, ... each holding 1 KiB of random letters.
///
/// Negative counts give none; counts above [`MAX_FILLER_HEADERS`] are clamped.
fn filler_headers(count: i64) -> HashMap<String, String> {
    let mut rng = rand::thread_rng();
    (0..count.clamp(0, MAX_FILLER_HEADERS))
        .map(|i| {
            let value: String = (0..FILLER_LEN)
                .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
                .collect();
            (i.to_string(), value)
        })
        .collect()
}
