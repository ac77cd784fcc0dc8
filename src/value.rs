//! Script value types crossing the native boundary.
//!
//! Arguments arrive from the scripting layer untyped; every native function
//! inspects the [`ValueKind`] of each slot before converting it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// In-band "nothing to read" value returned by `readFileChunk`
pub const NO_DATA: i32 = -1;

/// Kind of a value on the script side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Argument slot that does not exist
    None,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any number (always f64 on the script side)
    Number,
    /// Byte string
    String,
    /// Plain object
    Object,
    /// Raw byte buffer
    Buffer,
}

impl ValueKind {
    /// Name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Buffer => "buffer",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script string.
///
/// Engine strings are byte sequences, so file contents are carried as-is
/// without UTF-8 validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScriptString(Vec<u8>);

impl ScriptString {
    /// Wrap raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text view, replacing invalid UTF-8
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Interpret the string as a local file path
    #[cfg(unix)]
    pub fn to_path(&self) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(OsStr::from_bytes(&self.0))
    }

    /// Interpret the string as a local file path
    #[cfg(not(unix))]
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.to_str_lossy().into_owned())
    }
}

impl From<&str> for ScriptString {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for ScriptString {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<Vec<u8>> for ScriptString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl PartialEq<str> for ScriptString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for ScriptString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for ScriptString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

/// Tagged value exchanged with the scripting layer
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    /// `undefined` (also fills missing argument slots)
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (f64 for JS compatibility)
    Number(f64),
    /// String value
    String(ScriptString),
    /// Object/map of values
    Object(HashMap<String, ScriptValue>),
    /// Raw byte buffer
    Buffer(Vec<u8>),
}

impl ScriptValue {
    /// The "no data" sentinel
    pub fn no_data() -> Self {
        ScriptValue::Number(NO_DATA as f64)
    }

    /// Whether this is the "no data" sentinel
    pub fn is_no_data(&self) -> bool {
        matches!(self, ScriptValue::Number(n) if *n == NO_DATA as f64)
    }

    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            ScriptValue::Undefined => ValueKind::Undefined,
            ScriptValue::Null => ValueKind::Null,
            ScriptValue::Bool(_) => ValueKind::Boolean,
            ScriptValue::Number(_) => ValueKind::Number,
            ScriptValue::String(_) => ValueKind::String,
            ScriptValue::Object(_) => ValueKind::Object,
            ScriptValue::Buffer(_) => ValueKind::Buffer,
        }
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, ScriptValue::Undefined)
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScriptValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_string(&self) -> Option<&ScriptString> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the bytes of a string or buffer
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ScriptValue::String(s) => Some(s.as_bytes()),
            ScriptValue::Buffer(b) => Some(b),
            _ => None,
        }
    }
}

/// Coerce a script number to a whole number.
///
/// Truncates toward zero; NaN becomes 0 and infinities saturate, which is
/// exactly what an `f64 as i64` cast does.
pub fn to_integer(n: f64) -> i64 {
    n as i64
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Bool(b)
    }
}

impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        ScriptValue::Number(n)
    }
}

impl From<i32> for ScriptValue {
    fn from(n: i32) -> Self {
        ScriptValue::Number(n as f64)
    }
}

impl From<i64> for ScriptValue {
    fn from(n: i64) -> Self {
        ScriptValue::Number(n as f64)
    }
}

impl From<u64> for ScriptValue {
    fn from(n: u64) -> Self {
        ScriptValue::Number(n as f64)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.into())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(s.into())
    }
}

impl From<ScriptString> for ScriptValue {
    fn from(s: ScriptString) -> Self {
        ScriptValue::String(s)
    }
}
