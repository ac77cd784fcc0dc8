//! Native functions exposed to scripts.
//!
//! These functions are called from within the scripting sandbox and provide
//! access to local files. Each one validates its untyped arguments before
//! any typed logic runs.

pub mod file;
pub mod sample;

use crate::error::ScriptError;
use crate::value::{ScriptString, ScriptValue, ValueKind};

/// Result type for native functions
pub type HostResult<T> = std::result::Result<T, ScriptError>;

/// Trait for native function implementations
pub trait HostFunction: Send + Sync {
    /// The exported global name (e.g., "readFileChunk")
    fn name(&self) -> &'static str;

    /// Declared number of arguments
    fn arity(&self) -> usize;

    /// Run the function. `args` already holds exactly `arity` slots.
    fn call(&self, args: &CallArgs<'_>) -> HostResult<ScriptValue>;
}

/// Arguments of a single native call
#[derive(Debug, Clone, Copy)]
pub struct CallArgs<'a> {
    values: &'a [ScriptValue],
}

impl<'a> CallArgs<'a> {
    /// Wrap the argument slots of a call
    pub fn new(values: &'a [ScriptValue]) -> Self {
        Self { values }
    }

    /// Number of argument slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the call has no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, if the slot exists
    pub fn get(&self, index: usize) -> Option<&'a ScriptValue> {
        self.values.get(index)
    }

    /// Kind at `index`; missing slots report [`ValueKind::None`]
    pub fn kind_at(&self, index: usize) -> ValueKind {
        self.get(index).map_or(ValueKind::None, ScriptValue::kind)
    }

    /// Require a string at `index`
    pub fn require_string(&self, index: usize) -> HostResult<&'a ScriptString> {
        match self.get(index) {
            Some(ScriptValue::String(s)) => Ok(s),
            _ => Err(ScriptError::type_mismatch(
                ValueKind::String,
                self.kind_at(index),
            )),
        }
    }

    /// Require a number at `index`
    pub fn require_number(&self, index: usize) -> HostResult<f64> {
        match self.get(index) {
            Some(ScriptValue::Number(n)) => Ok(*n),
            _ => Err(ScriptError::type_mismatch(
                ValueKind::Number,
                self.kind_at(index),
            )),
        }
    }
}
