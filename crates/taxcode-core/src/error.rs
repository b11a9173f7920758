//! # Error Hierarchy
//!
//! Structured error types for the tax code codec, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Lookup misses, decode failures and malformed inputs are distinct types so
//! callers (the HTTP layer in particular) can map each to its own response
//! class without string matching.

use thiserror::Error;

/// Top-level error type returned by encode and decode.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The birth place could not be resolved in the place registry.
    #[error(transparent)]
    PlaceNotFound(#[from] PlaceNotFound),

    /// The tax code is well-formed but does not describe a valid person.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A domain primitive failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A place registry lookup miss.
///
/// Carries the offending key so messages identify exactly what was missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceNotFound {
    /// No record for the given name and province pair.
    #[error("The city {name} and province {province} do not exist")]
    ByPlace {
        /// Place name as supplied by the caller.
        name: String,
        /// Province as supplied by the caller.
        province: String,
    },

    /// No record for the given place code.
    #[error("The city with code {code} does not exist")]
    ByCode {
        /// The 4-character place code embedded in the tax code.
        code: String,
    },
}

/// Errors raised while turning a tax code back into person data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The month position holds a letter outside the month table.
    #[error("unknown month letter {0:?}")]
    UnknownMonth(char),

    /// The year, month and day fields do not form a calendar date.
    #[error("invalid birth date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Resolved four-digit year.
        year: i32,
        /// Month number (1-12).
        month: u32,
        /// Day of month after removing the female offset.
        day: u32,
    },

    /// The control character does not match the one computed from the body.
    #[error("control character mismatch: expected {expected}, found {found}")]
    ChecksumMismatch {
        /// Control character computed from the first 15 characters.
        expected: char,
        /// Control character present in the code.
        found: char,
    },
}

/// Validation failures for domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a structurally valid 16-character tax code.
    #[error("invalid tax code: {0:?}")]
    InvalidTaxCode(String),

    /// Not a valid 4-character place code.
    #[error("invalid place code: {0:?}")]
    InvalidPlaceCode(String),

    /// A place record with a blank name or province.
    #[error("invalid place record: {0}")]
    InvalidPlaceRecord(String),

    /// Control character input that is not 15 characters of `0-9A-Z`.
    #[error("invalid control character input: {0:?}")]
    InvalidChecksumInput(String),
}

/// Errors while building a [`crate::PlaceRegistry`].
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two records share the same place code.
    #[error("duplicate place code {code}")]
    DuplicateCode {
        /// The repeated code.
        code: String,
    },

    /// Two records share the same name and province.
    #[error("duplicate place {name} ({province})")]
    DuplicatePlace {
        /// Upper-cased place name.
        name: String,
        /// Upper-cased province.
        province: String,
    },

    /// A source row failed record validation.
    #[error("invalid record at row {row}: {source}")]
    InvalidRecord {
        /// 1-based data row number (the header is row 0).
        row: usize,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },

    /// The CSV source is malformed or lacks a required column.
    #[error("malformed place data: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
