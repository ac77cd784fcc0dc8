//! Native function registry and script host integration.
//!
//! A [`FunctionRegistry`] is built once at startup and installed into a
//! [`ScriptHost`] when a scripting context is initialized. [`GlobalScope`] is
//! the in-crate host: a global namespace that dispatches script calls to the
//! registered functions.

use crate::config::BridgeConfig;
use crate::error::{Result, ScriptError};
use crate::host_functions::file::{FileSize, ReadFileChunk, ReadOptions};
use crate::host_functions::sample::SampleFunction;
use crate::host_functions::{CallArgs, HostFunction, HostResult};
use crate::metrics::CallMetrics;
use crate::value::ScriptValue;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A native function with its exported name and declared arity
#[derive(Clone)]
pub struct NativeFunction {
    function: Arc<dyn HostFunction>,
}

impl NativeFunction {
    /// Wrap a host function
    pub fn new(function: impl HostFunction + 'static) -> Self {
        Self {
            function: Arc::new(function),
        }
    }

    /// Exported global name
    pub fn name(&self) -> &'static str {
        self.function.name()
    }

    /// Declared arity
    pub fn arity(&self) -> usize {
        self.function.arity()
    }

    /// Call with the fixed-arity convention: extra arguments are dropped and
    /// missing ones are `undefined`.
    pub fn invoke(&self, args: &[ScriptValue]) -> HostResult<ScriptValue> {
        let arity = self.arity();
        let mut slots: Vec<ScriptValue> = args.iter().take(arity).cloned().collect();
        slots.resize(arity, ScriptValue::Undefined);

        self.function
            .call(&CallArgs::new(&slots))
            .map_err(|e| e.with_function(self.name()))
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .finish()
    }
}

/// A scripting environment that native functions can be installed into
pub trait ScriptHost {
    /// Bind `function` to its name in the global namespace
    fn put_global_function(&mut self, function: NativeFunction);
}

/// Ordered set of native functions to install
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<NativeFunction>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard set of functions for `config`
    pub fn from_config(config: &BridgeConfig) -> Self {
        let mut registry = Self::new();
        if config.register_sample {
            registry.register(SampleFunction);
        }
        registry
            .register(ReadFileChunk::new(ReadOptions::from(config)))
            .register(FileSize);
        registry
    }

    /// Build the standard set of functions from a JSON configuration file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config = BridgeConfig::from_json_file(config_path)?;
        Ok(Self::from_config(&config))
    }

    /// Add a function, replacing any earlier one with the same name
    pub fn register(&mut self, function: impl HostFunction + 'static) -> &mut Self {
        let function = NativeFunction::new(function);
        match self.functions.iter_mut().find(|f| f.name() == function.name()) {
            Some(existing) => *existing = function,
            None => self.functions.push(function),
        }
        self
    }

    /// Look up a function by exported name
    pub fn get(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Exported names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.functions.iter().map(NativeFunction::name).collect()
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Install every function into `host`. A missing host is a no-op.
    pub fn install(&self, host: Option<&mut dyn ScriptHost>) {
        let Some(host) = host else {
            return;
        };

        debug!(count = self.functions.len(), "Registering extra functions");
        for function in &self.functions {
            host.put_global_function(function.clone());
        }
    }
}

static DEFAULT_REGISTRY: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_config(&BridgeConfig::default()));

/// Process-wide registry with the default configuration
pub fn default_registry() -> &'static FunctionRegistry {
    &DEFAULT_REGISTRY
}

/// Global namespace of a scripting context
#[derive(Debug, Default)]
pub struct GlobalScope {
    functions: HashMap<String, NativeFunction>,
    metrics: Arc<CallMetrics>,
}

impl GlobalScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope that records into a shared collector
    pub fn with_metrics(metrics: Arc<CallMetrics>) -> Self {
        Self {
            functions: HashMap::new(),
            metrics,
        }
    }

    /// Metrics collector for this scope
    pub fn metrics(&self) -> Arc<CallMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Whether a global function named `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Declared arity of the global function `name`
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions.get(name).map(NativeFunction::arity)
    }

    /// Names of all global functions
    pub fn names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    /// Call the global function `name` as a script would
    pub fn invoke(&self, name: &str, args: &[ScriptValue]) -> HostResult<ScriptValue> {
        let Some(function) = self.functions.get(name) else {
            let err = ScriptError::function_not_found(name);
            self.metrics.record_unresolved(err.code);
            return Err(err);
        };

        trace!(function = name, argc = args.len(), "Invoking native function");
        let result = function.invoke(args);
        self.metrics.record_call(name, &result);

        if let Err(e) = &result {
            debug!(function = name, error = %e, "Native function raised");
        }
        result
    }
}

impl ScriptHost for GlobalScope {
    fn put_global_function(&mut self, function: NativeFunction) {
        let name = function.name();
        if self.functions.insert(name.to_string(), function).is_some() {
            warn!(function = name, "Overwriting global function");
        }
    }
}
