use base64::Engine;

use crate::models::{InvocationResponse, Metadata};

/// Wrap resized image bytes in a base64 envelope.
///
/// No `content-type` is set; that is left to the surrounding platform.
pub fn binary_response(bytes: &[u8]) -> InvocationResponse {
    InvocationResponse {
        metadata: Some(Metadata::builder(true)),
        status_code: 200,
        headers: Default::default(),
        body: base64::engine::general_purpose::STANDARD.encode(bytes),
        is_base64_encoded: true,
    }
}
