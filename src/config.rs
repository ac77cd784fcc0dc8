//! Bridge configuration types and defaults.
//!
//! This module defines which native functions get registered and how
//! `readFileChunk` treats the edges of a requested range.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a range ending exactly at end-of-file returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EofBoundary {
    /// Return the "no data" sentinel (compatible with existing scripts)
    #[default]
    NoData,
    /// Return the final bytes of the file
    ReturnTail,
}

/// How `readFileChunk` treats a negative length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NegativeLength {
    /// Raise a RangeError
    #[default]
    Reject,
    /// Return the "no data" sentinel
    NoData,
}

/// Configuration for the native functions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Register `testExtraFunction` (default: true)
    #[serde(default = "default_true")]
    pub register_sample: bool,

    /// Behavior when a range ends exactly at end-of-file (default: noData)
    #[serde(default)]
    pub eof_boundary: EofBoundary,

    /// Behavior for negative lengths (default: reject)
    #[serde(default)]
    pub negative_length: NegativeLength,

    /// Upper bound on bytes returned by one `readFileChunk` call
    #[serde(default)]
    pub max_chunk_bytes: Option<u64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            register_sample: true,
            eof_boundary: EofBoundary::NoData,
            negative_length: NegativeLength::Reject,
            max_chunk_bytes: None,
        }
    }
}

impl BridgeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Enable or disable the sample function
    pub fn with_sample(mut self, enable: bool) -> Self {
        self.register_sample = enable;
        self
    }

    /// Set the end-of-file boundary behavior
    pub fn with_eof_boundary(mut self, boundary: EofBoundary) -> Self {
        self.eof_boundary = boundary;
        self
    }

    /// Set the negative length behavior
    pub fn with_negative_length(mut self, policy: NegativeLength) -> Self {
        self.negative_length = policy;
        self
    }

    /// Cap the bytes returned by one read
    pub fn with_max_chunk_bytes(mut self, max: u64) -> Self {
        self.max_chunk_bytes = Some(max);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_chunk_bytes".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field name
        field: String,
        /// The reason it's invalid
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn default_true() -> bool {
    true
}
