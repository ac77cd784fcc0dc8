//! Call metrics for native functions.
//!
//! Counters are atomics so one collector can be shared by every thread that
//! runs script code.

use crate::error::ErrorCode;
use crate::host_functions::HostResult;
use crate::value::ScriptValue;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the collected metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStats {
    /// Total native calls, including unknown names
    pub total_calls: u64,

    /// Calls that raised an error
    pub failed_calls: u64,

    /// Calls that returned the "no data" sentinel
    pub no_data_results: u64,

    /// Bytes returned to scripts as strings
    pub bytes_returned: u64,

    /// Call counts per exported name
    pub calls: HashMap<String, u64>,

    /// Error counts per error code
    pub errors: HashMap<String, u64>,
}

/// Metrics collector for native calls
pub struct CallMetrics {
    total_calls: AtomicU64,
    failed_calls: AtomicU64,
    no_data_results: AtomicU64,
    bytes_returned: AtomicU64,
    calls: Mutex<HashMap<String, u64>>,
    errors: Mutex<HashMap<ErrorCode, u64>>,
}

impl CallMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            total_calls: AtomicU64::new(0),
            failed_calls: AtomicU64::new(0),
            no_data_results: AtomicU64::new(0),
            bytes_returned: AtomicU64::new(0),
            calls: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
        }
    }

    /// Record a completed call to `name`
    pub fn record_call(&self, name: &str, result: &HostResult<ScriptValue>) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        *self.calls.lock().entry(name.to_string()).or_insert(0) += 1;

        match result {
            Ok(value) if value.is_no_data() => {
                self.no_data_results.fetch_add(1, Ordering::Relaxed);
            }
            Ok(ScriptValue::String(s)) => {
                self.bytes_returned
                    .fetch_add(s.len() as u64, Ordering::Relaxed);
            }
            Ok(_) => {}
            Err(e) => self.record_error(e.code),
        }
    }

    /// Record a call that failed before reaching a function
    pub fn record_unresolved(&self, code: ErrorCode) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.record_error(code);
    }

    fn record_error(&self, code: ErrorCode) {
        self.failed_calls.fetch_add(1, Ordering::Relaxed);
        *self.errors.lock().entry(code).or_insert(0) += 1;
    }

    /// Get total calls
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    /// Get failed calls
    pub fn failed_calls(&self) -> u64 {
        self.failed_calls.load(Ordering::Relaxed)
    }

    /// Copy the current values
    pub fn snapshot(&self) -> CallStats {
        CallStats {
            total_calls: self.total_calls(),
            failed_calls: self.failed_calls(),
            no_data_results: self.no_data_results.load(Ordering::Relaxed),
            bytes_returned: self.bytes_returned.load(Ordering::Relaxed),
            calls: self.calls.lock().clone(),
            errors: self
                .errors
                .lock()
                .iter()
                .map(|(code, count)| (code.to_string(), *count))
                .collect(),
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.total_calls.store(0, Ordering::Relaxed);
        self.failed_calls.store(0, Ordering::Relaxed);
        self.no_data_results.store(0, Ordering::Relaxed);
        self.bytes_returned.store(0, Ordering::Relaxed);
        self.calls.lock().clear();
        self.errors.lock().clear();
    }

    /// Export Prometheus-format metrics
    pub fn to_prometheus(&self) -> String {
        let stats = self.snapshot();
        let mut output = String::new();

        output.push_str("# HELP script_bridge_calls_total Native function calls\n");
        output.push_str("# TYPE script_bridge_calls_total counter\n");
        let mut calls: Vec<_> = stats.calls.iter().collect();
        calls.sort();
        for (name, count) in calls {
            output.push_str(&format!(
                "script_bridge_calls_total{{function=\"{}\"}} {}\n",
                name, count
            ));
        }

        output.push_str("\n# HELP script_bridge_no_data_total Reads that returned no data\n");
        output.push_str("# TYPE script_bridge_no_data_total counter\n");
        output.push_str(&format!("script_bridge_no_data_total {}\n", stats.no_data_results));

        output.push_str("\n# HELP script_bridge_bytes_returned_total Bytes returned to scripts\n");
        output.push_str("# TYPE script_bridge_bytes_returned_total counter\n");
        output.push_str(&format!(
            "script_bridge_bytes_returned_total {}\n",
            stats.bytes_returned
        ));

        output.push_str("\n# HELP script_bridge_errors_total Error counts by code\n");
        output.push_str("# TYPE script_bridge_errors_total counter\n");
        let mut errors: Vec<_> = stats.errors.iter().collect();
        errors.sort();
        for (code, count) in errors {
            output.push_str(&format!(
                "script_bridge_errors_total{{code=\"{}\"}} {}\n",
                code, count
            ));
        }

        output
    }
}

impl Default for CallMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallMetrics")
            .field("total_calls", &self.total_calls())
            .field("failed_calls", &self.failed_calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use crate::value::ScriptValue;

    #[test]
    fn test_record_calls() {
        let metrics = CallMetrics::new();

        metrics.record_call("readFileChunk", &Ok(ScriptValue::from("abcd")));
        metrics.record_call("readFileChunk", &Ok(ScriptValue::no_data()));
        metrics.record_call("fileSize", &Ok(ScriptValue::from(10u64)));

        let stats = metrics.snapshot();
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.failed_calls, 0);
        assert_eq!(stats.no_data_results, 1);
        assert_eq!(stats.bytes_returned, 4);
        assert_eq!(stats.calls["readFileChunk"], 2);
        assert_eq!(stats.calls["fileSize"], 1);
    }

    #[test]
    fn test_record_errors() {
        let metrics = CallMetrics::new();

        metrics.record_call("fileSize", &Err(ScriptError::internal_error("x")));
        metrics.record_unresolved(ErrorCode::FunctionNotFound);

        let stats = metrics.snapshot();
        assert_eq!(stats.total_calls, 2);
        assert_eq!(stats.failed_calls, 2);
        assert_eq!(stats.errors["INTERNAL_ERROR"], 1);
        assert_eq!(stats.errors["FUNCTION_NOT_FOUND"], 1);
    }

    #[test]
    fn test_reset() {
        let metrics = CallMetrics::new();
        metrics.record_call("fileSize", &Ok(ScriptValue::from(1u64)));
        metrics.reset();

        let stats = metrics.snapshot();
        assert_eq!(stats.total_calls, 0);
        assert!(stats.calls.is_empty());
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = CallMetrics::new();
        metrics.record_call("readFileChunk", &Ok(ScriptValue::from("ab")));

        let output = metrics.to_prometheus();
        assert!(output.contains("script_bridge_calls_total{function=\"readFileChunk\"} 1"));
        assert!(output.contains("script_bridge_bytes_returned_total 2"));
    }
}
