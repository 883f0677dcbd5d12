use super::{timestamp_body, Function};
use crate::error::FunctionError;
use crate::models::{InvocationRequest, InvocationResponse};

/// Status code outside the valid HTTP range, returned on purpose
pub const BOGUS_STATUS: i64 = 50;

/// Returns a timestamp with a status code the host must reject.
pub struct TimestampFunction;

impl Function for TimestampFunction {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn invoke(&self, _request: &InvocationRequest) -> Result<InvocationResponse, FunctionError> {
        Ok(InvocationResponse::json(
            BOGUS_STATUS,
            timestamp_body(chrono::Utc::now().timestamp_millis()),
        ))
    }
}
