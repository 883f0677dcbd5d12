use crate::error::FunctionError;
use crate::functions::Function;
use crate::models::{InvocationRequest, InvocationResponse, OriginConfig};
use crate::services::origin::{HttpOrigin, Origin};
use crate::services::response_builder::binary_response;
use crate::services::ResizePipeline;

/// Image resize proxy: `GET <origin-path>/ratio/<n>` returns the origin
/// image downscaled by `n`, base64 encoded.
pub struct ResizeFunction<O = HttpOrigin> {
    pipeline: ResizePipeline<O>,
}

impl ResizeFunction<HttpOrigin> {
    pub fn http(config: OriginConfig) -> Self {
        Self {
            pipeline: ResizePipeline::http(config),
        }
    }
}

impl<O: Origin> ResizeFunction<O> {
    pub fn with_origin(origin: O, config: OriginConfig) -> Self {
        Self {
            pipeline: ResizePipeline::new(origin, config),
        }
    }
}

impl<O: Origin> Function for ResizeFunction<O> {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse, FunctionError> {
        match self.pipeline.run(request) {
            Ok(bytes) => Ok(binary_response(&bytes)),
            Err(e) => {
                tracing::error!(
                    path = %request.path,
                    stage = e.stage().as_str(),
                    error = %crate::error::error_chain(&e),
                    "Resize failed"
                );
                Err(e.into())
            }
        }
    }
}
