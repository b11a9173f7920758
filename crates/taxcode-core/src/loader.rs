//! # Place Data Loader
//!
//! Builds a [`PlaceRegistry`] from the semicolon-delimited place dataset:
//!
//! ```text
//! name;province;code
//! RIMINI;RN;H294
//! ROMA;RM;H501
//! ```
//!
//! The header row is required and columns are matched by name. Fields are
//! trimmed and blank lines skipped. A dataset is compiled into the crate and
//! available through [`PlaceRegistry::bundled`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::place::{PlaceRecord, PlaceRegistry};

const BUNDLED_PLACES: &str = include_str!("../data/italian-cities.csv");

/// One row of the source file, before validation.
#[derive(Debug, Deserialize)]
struct PlaceRow {
    name: String,
    province: String,
    code: String,
}

/// Parse place records from any reader.
///
/// # Errors
///
/// - [`RegistryError::Csv`] for malformed rows or a missing column.
/// - [`RegistryError::InvalidRecord`] when a row fails [`PlaceRecord::new`].
pub fn read_records<R: Read>(reader: R) -> Result<Vec<PlaceRecord>, RegistryError> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv.deserialize::<PlaceRow>().enumerate() {
        let row = row?;
        let record = PlaceRecord::new(row.name, row.province, row.code).map_err(|source| {
            RegistryError::InvalidRecord {
                row: index + 1,
                source,
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Build a registry from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<PlaceRegistry, RegistryError> {
    let registry = PlaceRegistry::from_records(read_records(reader)?)?;
    tracing::info!(count = registry.len(), "loaded places");
    Ok(registry)
}

/// Build a registry from a file on disk.
pub fn from_path(path: &Path) -> Result<PlaceRegistry, RegistryError> {
    let file = std::fs::File::open(path)?;
    tracing::debug!(path = %path.display(), "reading place data");
    from_reader(std::io::BufReader::new(file))
}

impl PlaceRegistry {
    /// Registry over the dataset compiled into this crate.
    pub fn bundled() -> Result<Self, RegistryError> {
        from_reader(BUNDLED_PLACES.as_bytes())
    }
}
