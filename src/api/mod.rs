pub mod headers;
pub mod invoke;

pub use headers::HeaderMapExt;
pub use invoke::{__path_handle_invoke, __path_handle_invoke_root};
pub use invoke::{handle_invoke, handle_invoke_root, into_http_response};
