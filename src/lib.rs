//! faas-fixtures
//!
//! Fixture functions for exercising a function-as-a-service platform: an
//! image resize proxy plus a handful of fault-injection probes, and a local
//! host that serves them over HTTP.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod functions;
pub mod imaging;
pub mod models;
pub mod server;
pub mod services;
