use crate::error::ResizeError;
use crate::imaging::{decode_png, encode_png, scale_down};
use crate::models::{InvocationRequest, OriginConfig};
use crate::services::origin::{origin_url, HttpOrigin, Origin};
use crate::services::path_decoder::ResizeRequest;

/// Pipeline that orchestrates path → fetch → decode → scale → encode.
///
/// Holds no per-request state; every call owns its buffers.
pub struct ResizePipeline<O = HttpOrigin> {
    origin: O,
    config: OriginConfig,
}

impl ResizePipeline<HttpOrigin> {
    pub fn http(config: OriginConfig) -> Self {
        Self::new(HttpOrigin::new(), config)
    }
}

impl<O: Origin> ResizePipeline<O> {
    pub fn new(origin: O, config: OriginConfig) -> Self {
        Self { origin, config }
    }

    /// Run the whole pipeline for an invocation, returning PNG bytes
    pub fn run(&self, request: &InvocationRequest) -> Result<Vec<u8>, ResizeError> {
        let resize = ResizeRequest::from_invocation(request)?;
        self.resize(&resize)
    }

    /// Fetch, downscale and re-encode the image a decoded request points at
    pub fn resize(&self, request: &ResizeRequest) -> Result<Vec<u8>, ResizeError> {
        let url = origin_url(&self.config, &request.request_host, &request.origin_path)?;
        let raw = self.origin.fetch(&url)?;

        let source = decode_png(&raw).map_err(ResizeError::Decode)?;
        drop(raw);

        let scaled = scale_down(&source, request.scale_factor)?;
        drop(source);

        let bytes = encode_png(&scaled).map_err(ResizeError::Encode)?;

        tracing::info!(
            url = %url,
            ratio = request.scale_factor,
            width = scaled.width(),
            height = scaled.height(),
            size_bytes = bytes.len(),
            "Image resized"
        );

        Ok(bytes)
    }
}
