pub mod config;
pub mod invocation;

pub use config::{AppConfig, ConfigError, OriginConfig};
pub use invocation::{InvocationRequest, InvocationResponse, Metadata};
