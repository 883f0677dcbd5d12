use super::{timestamp_body, Function};
use crate::error::{FunctionError, ProbeError};
use crate::models::{InvocationRequest, InvocationResponse};

pub const FAIL_HEADER: &str = "x-nf-fail";

/// Returns the current time, or fails when `x-nf-fail: fail` is sent.
pub struct HelloFunction;

impl Function for HelloFunction {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse, FunctionError> {
        if request.header(FAIL_HEADER) == Some("fail") {
            return Err(ProbeError::FailHeader.into());
        }

        Ok(InvocationResponse::json(
            200,
            timestamp_body(chrono::Utc::now().to_rfc3339()),
        ))
    }
}
