//! Functions the invocation host can run.
//!
//! Each function maps one [`InvocationRequest`] to one [`InvocationResponse`]
//! or fails the whole invocation. Functions are synchronous and keep no state
//! between invocations.

pub mod duration;
pub mod hello;
pub mod pause;
pub mod probe;
pub mod resize;
pub mod timestamp;

pub use hello::HelloFunction;
pub use pause::PauseFunction;
pub use probe::ProbeFunction;
pub use resize::ResizeFunction;
pub use timestamp::TimestampFunction;

use crate::error::FunctionError;
use crate::models::{InvocationRequest, InvocationResponse};

/// A single serverless handler.
pub trait Function: Send + Sync {
    /// Name used to route invocations to this function
    fn name(&self) -> &'static str;

    /// Handle one invocation
    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse, FunctionError>;
}

/// `{"timestamp": ...}` body shared by several probes
pub(crate) fn timestamp_body(timestamp: impl serde::Serialize) -> String {
    serde_json::json!({ "timestamp": timestamp }).to_string()
}
