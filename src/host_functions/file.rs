//! File access native functions.
//!
//! `fileSize` reports the byte size of a file and `readFileChunk` reads a
//! bounded byte range. Every call opens its own handle, measures the size with
//! a seek to the end, and drops the handle before returning.

use super::{CallArgs, HostFunction, HostResult};
use crate::config::{BridgeConfig, EofBoundary, NegativeLength};
use crate::error::{FileError, ScriptError};
use crate::value::{to_integer, ScriptString, ScriptValue};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::instrument;

/// Outcome of a chunk read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Bytes read from the file
    Data(Vec<u8>),
    /// Nothing to read at the requested range
    NoData,
}

/// Range handling for [`read_file_chunk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// What a range ending exactly at end-of-file returns
    pub eof_boundary: EofBoundary,
    /// What a negative length returns
    pub negative_length: NegativeLength,
    /// Upper bound on bytes returned by one read
    pub max_chunk_bytes: Option<u64>,
}

impl From<&BridgeConfig> for ReadOptions {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            eof_boundary: config.eof_boundary,
            negative_length: config.negative_length,
            max_chunk_bytes: config.max_chunk_bytes,
        }
    }
}

fn open(path: &Path) -> Result<File, FileError> {
    File::open(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_error(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
    move |source| FileError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Byte size of the file at `path`
#[instrument(level = "trace")]
pub fn file_size(path: &Path) -> Result<u64, FileError> {
    let mut file = open(path)?;
    file.seek(SeekFrom::End(0)).map_err(read_error(path))
}

/// Number of bytes to read for a request, or `None` for "no data".
///
/// A request running past the end is clamped to what remains. One ending
/// exactly at the end yields `None` unless `boundary` is `ReturnTail`.
pub fn effective_length(size: u64, offset: u64, length: u64, boundary: EofBoundary) -> Option<u64> {
    if offset >= size {
        return None;
    }

    let available = size - offset;
    let length = match length.cmp(&available) {
        Ordering::Equal if boundary == EofBoundary::NoData => return None,
        Ordering::Greater => available,
        _ => length,
    };

    (length > 0).then_some(length)
}

/// Read up to `length` bytes at `offset` from the file at `path`
#[instrument(level = "trace", skip(options))]
pub fn read_file_chunk(
    path: &Path,
    offset: u64,
    length: u64,
    options: &ReadOptions,
) -> Result<Chunk, FileError> {
    let mut file = open(path)?;
    let size = file.seek(SeekFrom::End(0)).map_err(read_error(path))?;
    read_range(&mut file, path, size, offset, length, options)
}

/// Read a range from an already opened `reader` whose size was measured as
/// `size`. `path` is only used for error reporting.
///
/// `max_chunk_bytes` is applied after end-of-file clamping, so the cap never
/// turns a readable range into "no data".
pub fn read_range<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
    size: u64,
    offset: u64,
    length: u64,
    options: &ReadOptions,
) -> Result<Chunk, FileError> {
    let Some(length) = effective_length(size, offset, length, options.eof_boundary) else {
        return Ok(Chunk::NoData);
    };
    let length = options.max_chunk_bytes.map_or(length, |max| length.min(max));

    reader.seek(SeekFrom::Start(offset)).map_err(read_error(path))?;

    let mut buf = Vec::with_capacity(usize::try_from(length).unwrap_or(0));
    let read = reader
        .by_ref()
        .take(length)
        .read_to_end(&mut buf)
        .map_err(read_error(path))?;

    // The file shrank between the size check and the read
    if read == 0 {
        return Err(read_error(path)(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no bytes read",
        )));
    }

    Ok(Chunk::Data(buf))
}

/// `fileSize(path)`: byte size of a file
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSize;

impl HostFunction for FileSize {
    fn name(&self) -> &'static str {
        "fileSize"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &CallArgs<'_>) -> HostResult<ScriptValue> {
        let path = args.require_string(0)?;
        let size = file_size(&path.to_path())?;
        Ok(ScriptValue::from(size))
    }
}

/// `readFileChunk(path, offset, length)`: bytes of a file range, or `-1`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadFileChunk {
    options: ReadOptions,
}

impl ReadFileChunk {
    /// Create with the given range handling
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }
}

impl HostFunction for ReadFileChunk {
    fn name(&self) -> &'static str {
        "readFileChunk"
    }

    fn arity(&self) -> usize {
        3
    }

    fn call(&self, args: &CallArgs<'_>) -> HostResult<ScriptValue> {
        let path = args.require_string(0)?;
        let offset = to_integer(args.require_number(1)?);
        let length = to_integer(args.require_number(2)?);

        if offset < 0 {
            return Err(ScriptError::invalid_argument(format!(
                "Invalid offset: {}",
                offset
            )));
        }
        if length < 0 {
            return match self.options.negative_length {
                NegativeLength::Reject => Err(ScriptError::invalid_argument(format!(
                    "Invalid length: {}",
                    length
                ))),
                NegativeLength::NoData => Ok(ScriptValue::no_data()),
            };
        }

        match read_file_chunk(&path.to_path(), offset as u64, length as u64, &self.options)? {
            Chunk::Data(bytes) => Ok(ScriptValue::String(ScriptString::from(bytes))),
            Chunk::NoData => Ok(ScriptValue::no_data()),
        }
    }
}
