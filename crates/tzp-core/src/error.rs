//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error type shared by the codec, the grouping engine and the
//! table assembler. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Nothing here is retried or recovered from. Generation is a pure function
//!   of its inputs, so an error means a bad input or a corrupt byte stream
//!   and the whole run is aborted.
//! - Identifier errors name the identifier and its kind.
//! - Decoding errors name the byte offset at which the read started.

use thiserror::Error;

/// The namespace an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// A time-zone identifier such as `Australia/Sydney`.
    Zone,
    /// A locale language tag such as `en-AU`.
    Locale,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Zone => "zone id",
            Self::Locale => "locale",
        })
    }
}

/// Top-level error type for table generation and decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A zone id or locale is not known to the catalog.
    #[error("unknown {kind} {id:?}")]
    UnknownIdentifier {
        /// Which namespace the identifier was looked up in.
        kind: IdentifierKind,
        /// The identifier as supplied.
        id: String,
    },

    /// An identifier could not be parsed into its canonical form.
    #[error("malformed {kind} {id:?}: {reason}")]
    MalformedIdentifier {
        /// Which namespace the identifier belongs to.
        kind: IdentifierKind,
        /// The identifier as supplied.
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The reader ran out of bytes before a value was complete.
    #[error(
        "unexpected end of data at byte {offset}: needed {needed} byte(s), {available} available"
    )]
    UnexpectedEndOfData {
        /// Offset at which the read started.
        offset: usize,
        /// Bytes required to finish the value.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },

    /// A selection filter is malformed or matched nothing when at least one
    /// match was required.
    #[error("selection filter {filter:?} {reason}")]
    InvalidSelectionFilter {
        /// The offending filter string.
        filter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A table was requested over an empty locale set. Every compaction
    /// record needs a default value, so at least one locale is required.
    #[error("no locales selected; a table needs at least one locale")]
    NoLocales,

    /// A length or count does not fit the fixed-width `int32` prefix.
    #[error("{what} of {len} exceeds the int32 range")]
    EncodingOverflow {
        /// What was being encoded.
        what: &'static str,
        /// The length that did not fit.
        len: usize,
    },

    /// A string on the wire is not valid UTF-8.
    #[error("invalid UTF-8 in string at byte {offset}")]
    InvalidUtf8 {
        /// Offset of the string's length prefix.
        offset: usize,
    },

    /// A structurally valid read produced a value that breaks a table invariant.
    #[error("malformed record at byte {offset}: {reason}")]
    MalformedRecord {
        /// Offset at which the offending value started.
        offset: usize,
        /// The violated invariant.
        reason: String,
    },

    /// Bytes remain after the declared end of the table.
    #[error("{remaining} trailing byte(s) after the end of the table at byte {offset}")]
    TrailingData {
        /// Offset of the first unread byte.
        offset: usize,
        /// Number of unread bytes.
        remaining: usize,
    },
}

impl TableError {
    /// Shorthand for an [`TableError::UnknownIdentifier`] naming a zone.
    pub fn unknown_zone(id: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            kind: IdentifierKind::Zone,
            id: id.into(),
        }
    }

    /// Shorthand for an [`TableError::UnknownIdentifier`] naming a locale.
    pub fn unknown_locale(id: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            kind: IdentifierKind::Locale,
            id: id.into(),
        }
    }
}
