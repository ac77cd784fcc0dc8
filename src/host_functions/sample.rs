//! Sample native function.
//!
//! Useful for checking from a script that extra functions were registered.

use super::{CallArgs, HostFunction, HostResult};
use crate::value::ScriptValue;

/// Value returned by `testExtraFunction`
pub const SAMPLE_VALUE: i32 = 1234;

/// `testExtraFunction()`: does nothing and returns [`SAMPLE_VALUE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleFunction;

impl HostFunction for SampleFunction {
    fn name(&self) -> &'static str {
        "testExtraFunction"
    }

    fn arity(&self) -> usize {
        0
    }

    fn call(&self, _args: &CallArgs<'_>) -> HostResult<ScriptValue> {
        Ok(ScriptValue::from(SAMPLE_VALUE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_returns_constant() {
        let result = SampleFunction.call(&CallArgs::new(&[])).unwrap();
        assert_eq!(result, ScriptValue::Number(1234.0));
    }

    #[test]
    fn test_sample_ignores_arguments() {
        let values = vec![ScriptValue::from("x"), ScriptValue::Null];
        let result = SampleFunction.call(&CallArgs::new(&values)).unwrap();
        assert_eq!(result.as_number(), Some(1234.0));
    }
}
