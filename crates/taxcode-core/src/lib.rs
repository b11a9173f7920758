//! # taxcode-core: Italian Tax Code Codec
//!
//! Encodes a person's identifying data into the 16-character Italian tax
//! code ("codice fiscale") and decodes a code back into the data it carries.
//!
//! ```text
//! B G N | L S N | 9 3 | P | 1 9 | H 2 9 4 | L
//! family  given   year  mon day   place     check
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** A [`TaxCode`] can only be constructed from a
//!    well-formed 16-character string. [`PlaceRecord`] validates its code.
//!
//! 2. **Read-only place data.** [`PlaceRegistry`] is built once, rejects
//!    duplicate keys, and is shared behind an `Arc` by the encoder and the
//!    decoder.
//!
//! 3. **Typed failures.** Every fallible operation returns a variant of
//!    [`CodecError`] or [`RegistryError`]; nothing in this crate panics on
//!    caller input.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `taxcode-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checksum;
pub mod date;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod name;
pub mod person;
pub mod place;

// Re-export primary types for ergonomic imports.
pub use decoder::{DecodeOptions, TaxCodeDecoder};
pub use encoder::TaxCodeEncoder;
pub use error::{CodecError, DecodeError, PlaceNotFound, RegistryError, ValidationError};
pub use person::{Person, Sex, TaxCode};
pub use place::{PlaceRecord, PlaceRegistry};
