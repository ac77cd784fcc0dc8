//! Error types for the script bridge.
//!
//! This module defines error codes, the error record raised into the
//! scripting sandbox, the typed file-layer error and the crate-level error.

use crate::config::ConfigError;
use crate::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Error codes for categorizing errors raised into scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Argument of the wrong kind
    TypeError,
    /// File could not be opened or read
    IoError,
    /// Argument of the right kind but an unusable value
    InvalidArgument,
    /// No global function with the requested name
    FunctionNotFound,
    /// Internal bridge error (bug)
    InternalError,
}

impl ErrorCode {
    /// Exception class the scripting engine raises for this code
    pub fn exception_name(&self) -> &'static str {
        match self {
            ErrorCode::TypeError => "TypeError",
            ErrorCode::InvalidArgument => "RangeError",
            ErrorCode::FunctionNotFound => "ReferenceError",
            ErrorCode::IoError | ErrorCode::InternalError => "Error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TypeError => write!(f, "TYPE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::FunctionNotFound => write!(f, "FUNCTION_NOT_FOUND"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error raised into the scripting sandbox as a native exception
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptError {
    /// Error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// Exported name of the function that raised the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ScriptError {
    /// Create a new script error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            function: None,
            context: None,
        }
    }

    /// Create an argument kind mismatch error
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::new(
            ErrorCode::TypeError,
            format!("Invalid argument (expected {}, got {})", expected, actual),
        )
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Create a function not found error
    pub fn function_not_found(name: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FunctionNotFound,
            format!("{} is not defined", name.into()),
        )
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach the raising function's exported name, keeping an existing one
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        if self.function.is_none() {
            self.function = Some(name.into());
        }
        self
    }

    /// Add context
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Exception class name as seen by scripts
    pub fn exception_name(&self) -> &'static str {
        self.code.exception_name()
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.exception_name(), self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Failure of a native file operation
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The file could not be opened for reading
    #[error("Error opening file: {}", .path.display())]
    Open {
        /// Path as given by the script
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Seeking or reading failed, or a positioned read returned nothing
    #[error("Error reading file: {}", .path.display())]
    Read {
        /// Path as given by the script
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Path the failed operation was working on
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileError::Open { path, .. } | FileError::Read { path, .. } => path,
        }
    }
}

impl From<FileError> for ScriptError {
    fn from(e: FileError) -> Self {
        let (operation, source) = match &e {
            FileError::Open { source, .. } => ("open", source),
            FileError::Read { source, .. } => ("read", source),
        };
        let context = serde_json::json!({
            "operation": operation,
            "path": e.path().display().to_string(),
            "cause": source.to_string(),
        });
        ScriptError::new(ErrorCode::IoError, e.to_string()).with_context(context)
    }
}

/// Main error type for the bridge
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Error raised by a native function
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Convert to ScriptError for raising into a script
    pub fn to_script_error(&self) -> ScriptError {
        match self {
            BridgeError::Script(e) => e.clone(),
            BridgeError::Config(e) => ScriptError::invalid_argument(e.to_string()),
        }
    }
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::TypeError.to_string(), "TYPE_ERROR");
        assert_eq!(ErrorCode::IoError.to_string(), "IO_ERROR");
    }

    #[test]
    fn test_exception_names() {
        assert_eq!(ErrorCode::TypeError.exception_name(), "TypeError");
        assert_eq!(ErrorCode::InvalidArgument.exception_name(), "RangeError");
        assert_eq!(ErrorCode::FunctionNotFound.exception_name(), "ReferenceError");
        assert_eq!(ErrorCode::IoError.exception_name(), "Error");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ScriptError::type_mismatch(ValueKind::String, ValueKind::Number);
        assert_eq!(err.code, ErrorCode::TypeError);
        assert_eq!(err.message, "Invalid argument (expected string, got number)");
        assert_eq!(
            err.to_string(),
            "TypeError: Invalid argument (expected string, got number)"
        );
    }

    #[test]
    fn test_with_function_keeps_first() {
        let err = ScriptError::internal_error("boom")
            .with_function("readFileChunk")
            .with_function("other");
        assert_eq!(err.function.as_deref(), Some("readFileChunk"));
    }

    #[test]
    fn test_file_error_conversion() {
        let file_err = FileError::Open {
            path: PathBuf::from("/missing/a.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(file_err.to_string(), "Error opening file: /missing/a.txt");

        let err = ScriptError::from(file_err);
        assert_eq!(err.code, ErrorCode::IoError);
        assert_eq!(err.message, "Error opening file: /missing/a.txt");
        let context = err.context.unwrap();
        assert_eq!(context["operation"], "open");
        assert_eq!(context["path"], "/missing/a.txt");
    }

    #[test]
    fn test_script_error_serialization() {
        let err = ScriptError::type_mismatch(ValueKind::Number, ValueKind::Null)
            .with_function("readFileChunk");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("TYPE_ERROR"));
        assert!(json.contains("\"function\":\"readFileChunk\""));
        assert!(!json.contains("context"));
    }

    #[test]
    fn test_bridge_error_conversion() {
        let bridge_err = BridgeError::Script(ScriptError::function_not_found("nope"));
        let converted = bridge_err.to_script_error();
        assert_eq!(converted.code, ErrorCode::FunctionNotFound);
        assert_eq!(converted.message, "nope is not defined");
    }

    #[test]
    fn test_config_error_conversion() {
        let bridge_err = BridgeError::from(ConfigError::InvalidValue {
            field: "maxChunkBytes".to_string(),
            reason: "must be greater than zero".to_string(),
        });
        assert!(bridge_err.to_string().starts_with("Configuration error: "));
        assert_eq!(bridge_err.to_script_error().code, ErrorCode::InvalidArgument);

        let io_err = ConfigError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(BridgeError::from(io_err), BridgeError::Config(ConfigError::Io(_))));
    }
}
