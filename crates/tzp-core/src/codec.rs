//! # Binary Codec — Fixed-Width Big-Endian Primitives
//!
//! `DataWriter` and `DataReader` are the sole byte path of the table. Every
//! higher component (locale sets, compaction records, zone entries, the
//! zone-rules blob) is expressed in terms of these primitives.
//!
//! ## Encodings
//!
//! | Primitive | Bytes                                                  |
//! |-----------|--------------------------------------------------------|
//! | `int32`   | 4, two's complement, big-endian                        |
//! | `int64`   | 8, two's complement, big-endian                        |
//! | `string`  | `int32` UTF-8 byte length, then the bytes, no terminator |
//! | `bytes`   | `int32` length, then the raw bytes                     |
//!
//! Lengths and counts are written through [`DataWriter::write_len`], which
//! refuses anything above `i32::MAX` instead of truncating. Reads never
//! return partial values: a read that needs more bytes than remain fails
//! with `UnexpectedEndOfData` and leaves the cursor where it was.

use crate::error::TableError;

/// Append-only big-endian writer over an in-memory buffer.
#[derive(Debug, Default, Clone)]
pub struct DataWriter {
    buf: Vec<u8>,
}

impl DataWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a 4-byte big-endian signed integer.
    pub fn write_i32(&mut self, n: i32) {
        self.buf.extend_from_slice(&n.to_be_bytes());
    }

    /// Write an 8-byte big-endian signed integer.
    pub fn write_i64(&mut self, n: i64) {
        self.buf.extend_from_slice(&n.to_be_bytes());
    }

    /// Write a length or element count as an `int32`.
    ///
    /// # Errors
    ///
    /// Returns `TableError::EncodingOverflow` if `len` exceeds `i32::MAX`.
    pub fn write_len(&mut self, what: &'static str, len: usize) -> Result<(), TableError> {
        let n = i32::try_from(len).map_err(|_| TableError::EncodingOverflow { what, len })?;
        self.write_i32(n);
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `TableError::EncodingOverflow` if the UTF-8 byte length does
    /// not fit an `int32`.
    pub fn write_string(&mut self, s: &str) -> Result<(), TableError> {
        self.write_len("string byte length", s.len())?;
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Write a length-prefixed byte blob.
    ///
    /// # Errors
    ///
    /// Returns `TableError::EncodingOverflow` if the blob length does not fit
    /// an `int32`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TableError> {
        self.write_len("byte blob length", bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append bytes that are already encoded (a nested writer's output).
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer, returning its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Forward-only big-endian reader over a byte slice.
#[derive(Debug, Clone)]
pub struct DataReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DataReader<'a> {
    /// Create a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Returns true when every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take exactly `n` bytes, or fail without moving the cursor.
    fn take(&mut self, n: usize) -> Result<&'a [u8], TableError> {
        let available = self.remaining();
        if n > available {
            return Err(TableError::UnexpectedEndOfData {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.bytes[start..self.pos])
    }

    /// Read a 4-byte big-endian signed integer.
    pub fn read_i32(&mut self) -> Result<i32, TableError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(i32::from_be_bytes(buf))
    }

    /// Read an 8-byte big-endian signed integer.
    pub fn read_i64(&mut self) -> Result<i64, TableError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(i64::from_be_bytes(buf))
    }

    /// Read an `int32` length or count, rejecting negative values.
    pub fn read_len(&mut self, what: &str) -> Result<usize, TableError> {
        let offset = self.pos;
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| TableError::MalformedRecord {
            offset,
            reason: format!("negative {what} {n}"),
        })
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// On failure the cursor is left at the start of the length prefix.
    pub fn read_string(&mut self) -> Result<String, TableError> {
        let offset = self.pos;
        let result = self
            .read_len("string byte length")
            .and_then(|len| self.take(len))
            .and_then(|bytes| {
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|_| TableError::InvalidUtf8 { offset })
            });
        if result.is_err() {
            self.pos = offset;
        }
        result
    }

    /// Read a length-prefixed byte blob.
    ///
    /// On failure the cursor is left at the start of the length prefix.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], TableError> {
        let offset = self.pos;
        let result = self
            .read_len("byte blob length")
            .and_then(|len| self.take(len));
        if result.is_err() {
            self.pos = offset;
        }
        result
    }

    /// Assert that the input has been consumed exactly.
    ///
    /// # Errors
    ///
    /// Returns `TableError::TrailingData` if unread bytes remain.
    pub fn finish(self) -> Result<(), TableError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(TableError::TrailingData {
                offset: self.pos,
                remaining,
            }),
        }
    }
}
