//! # Script File Bridge
//!
//! Native file helpers for an embedded scripting sandbox. The functions are
//! collected in a registry at startup and installed into the global
//! namespace of each scripting context the host creates.
//!
//! ## Architecture
//!
//! ```text
//! Script (fileSize / readFileChunk / testExtraFunction)
//!     │
//!     │ global function call
//!     ▼
//! ScriptHost (GlobalScope or an embedding engine)
//!     │
//!     │ fixed-arity dispatch
//!     ▼
//! Native functions (this crate) ──► local files
//! ```
//!
//! ## Exported functions
//!
//! - **`fileSize(path)`**: byte size of a file
//! - **`readFileChunk(path, offset, length)`**: bytes of a range, clamped to
//!   end-of-file, or `-1` when there is nothing to read
//! - **`testExtraFunction()`**: always `1234`

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod host_functions;
pub mod metrics;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use config::{BridgeConfig, EofBoundary, NegativeLength};
pub use error::{BridgeError, ErrorCode, FileError, ScriptError};
pub use host_functions::file::{file_size, read_file_chunk, read_range, Chunk, ReadOptions};
pub use host_functions::{CallArgs, HostFunction, HostResult};
pub use metrics::{CallMetrics, CallStats};
pub use registry::{default_registry, FunctionRegistry, GlobalScope, NativeFunction, ScriptHost};
pub use value::{ScriptString, ScriptValue, ValueKind, NO_DATA};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `tracing` subscriber reading `RUST_LOG`.
///
/// Falls back to `script_file_bridge=info`. Does nothing if a global
/// subscriber is already set.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("script_file_bridge=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
