//! # Place Registry
//!
//! Immutable, bidirectional lookup between a birth place (name + province)
//! and its 4-character place code (the "codice catastale" of a municipality,
//! or the `Z` code of a foreign country).
//!
//! The registry is built once from an ordered sequence of [`PlaceRecord`]s
//! and never mutated afterwards. It holds no interior mutability, so an
//! `Arc<PlaceRegistry>` can be read from any number of threads without locks.
//!
//! ## Keys
//!
//! Both indices are keyed on upper-cased values: lookups are case-insensitive
//! for the code and for the (name, province) pair.
//!
//! ## Duplicates
//!
//! A repeated code or a repeated (name, province) pair rejects the whole
//! source at build time.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{PlaceNotFound, RegistryError, ValidationError};
use crate::person::is_numeric_or_omocodic;

/// Length of a place code.
pub const PLACE_CODE_LEN: usize = 4;

/// One municipality (or foreign country) of birth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlaceRecord {
    name: String,
    province: String,
    code: String,
}

impl PlaceRecord {
    /// Create a validated record.
    ///
    /// Name and province are trimmed and kept in their original case; the
    /// code is upper-cased.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::InvalidPlaceRecord`] for a blank name or province.
    /// - [`ValidationError::InvalidPlaceCode`] unless the code is a letter
    ///   followed by three ASCII alphanumerics.
    pub fn new(
        name: impl Into<String>,
        province: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let province = province.into().trim().to_string();
        let raw_code = code.into();
        let code = raw_code.trim().to_ascii_uppercase();

        if name.is_empty() {
            return Err(ValidationError::InvalidPlaceRecord(format!(
                "blank name for code {code}"
            )));
        }
        if province.is_empty() {
            return Err(ValidationError::InvalidPlaceRecord(format!(
                "blank province for {name}"
            )));
        }
        if !is_place_code(&code) {
            return Err(ValidationError::InvalidPlaceCode(raw_code));
        }
        Ok(Self {
            name,
            province,
            code,
        })
    }

    /// Place name as it appears in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Province abbreviation as it appears in the source.
    pub fn province(&self) -> &str {
        &self.province
    }

    /// Upper-cased 4-character place code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

fn is_place_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == PLACE_CODE_LEN
        && bytes[0].is_ascii_uppercase()
        && bytes[1..]
            .iter()
            .all(|&b| is_numeric_or_omocodic(char::from(b)))
}

fn place_key(name: &str, province: &str) -> (String, String) {
    (name.trim().to_uppercase(), province.trim().to_uppercase())
}

/// Read-only index of place records by code and by (name, province).
#[derive(Debug, Clone, Default)]
pub struct PlaceRegistry {
    records: Vec<PlaceRecord>,
    by_code: HashMap<String, usize>,
    by_place: HashMap<(String, String), usize>,
}

impl PlaceRegistry {
    /// Build a registry from an ordered sequence of records.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCode`] or
    /// [`RegistryError::DuplicatePlace`] on the first repeated key.
    pub fn from_records(
        records: impl IntoIterator<Item = PlaceRecord>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for record in records {
            let index = registry.records.len();

            if registry.by_code.contains_key(record.code()) {
                return Err(RegistryError::DuplicateCode {
                    code: record.code().to_string(),
                });
            }
            let key = place_key(record.name(), record.province());
            if registry.by_place.contains_key(&key) {
                return Err(RegistryError::DuplicatePlace {
                    name: key.0,
                    province: key.1,
                });
            }

            registry.by_code.insert(record.code().to_string(), index);
            registry.by_place.insert(key, index);
            registry.records.push(record);
        }
        Ok(registry)
    }

    /// Find the record for a place code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PlaceNotFound::ByCode`] when no record carries the code.
    pub fn lookup_by_code(&self, code: &str) -> Result<&PlaceRecord, PlaceNotFound> {
        self.by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(|&i| &self.records[i])
            .ok_or_else(|| {
                tracing::debug!(code, "place code not in registry");
                PlaceNotFound::ByCode {
                    code: code.to_string(),
                }
            })
    }

    /// Find the record for a place name and province (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PlaceNotFound::ByPlace`] when the pair is unknown.
    pub fn lookup_by_place(
        &self,
        name: &str,
        province: &str,
    ) -> Result<&PlaceRecord, PlaceNotFound> {
        self.by_place
            .get(&place_key(name, province))
            .map(|&i| &self.records[i])
            .ok_or_else(|| {
                tracing::debug!(name, province, "place not in registry");
                PlaceNotFound::ByPlace {
                    name: name.to_string(),
                    province: province.to_string(),
                }
            })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceRecord> {
        self.records.iter()
    }
}
