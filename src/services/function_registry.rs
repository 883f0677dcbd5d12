use std::collections::HashMap;
use std::sync::Arc;

use crate::functions::{
    Function, HelloFunction, PauseFunction, ProbeFunction, ResizeFunction, TimestampFunction,
};
use crate::models::AppConfig;

/// Immutable name → function table, built once at startup.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Arc<dyn Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in function
    pub fn with_defaults(config: &AppConfig) -> Self {
        Self::new()
            .register(ResizeFunction::http(config.origin.clone()))
            .register(ProbeFunction)
            .register(PauseFunction)
            .register(HelloFunction)
            .register(TimestampFunction)
    }

    /// Add a function, replacing any previous one with the same name
    pub fn register<F: Function + 'static>(mut self, function: F) -> Self {
        self.functions.insert(function.name(), Arc::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
