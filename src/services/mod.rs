pub mod function_registry;
pub mod origin;
pub mod path_decoder;
pub mod resize_pipeline;
pub mod response_builder;

pub use function_registry::FunctionRegistry;
pub use origin::{origin_url, HttpOrigin, Origin};
pub use path_decoder::{decode_path, ResizeRequest};
pub use resize_pipeline::ResizePipeline;
pub use response_builder::binary_response;
