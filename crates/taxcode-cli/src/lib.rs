//! # taxcode-cli: Command-Line Tool for Italian Tax Codes
//!
//! Provides the `taxcode` command-line interface over `taxcode-core`.
//!
//! ## Subcommands
//!
//! - `taxcode encode`: compute the tax code of a person.
//! - `taxcode decode`: recover person data from a tax code.
//! - `taxcode check`: validate the format and control character of a code.
//!
//! ```bash
//! taxcode encode --name Alessandro --surname Bagnoli --sex male \
//!     --birth-date 1993-09-19 --place Rimini --province RN
//! taxcode decode BGNLSN93P19H294L --json
//! taxcode --places ./comuni.csv check BGNLSN93P19H294L
//! ```
//!
//! ## Exit codes
//!
//! `0` success, `1` the input names no valid code or person, `2` operational
//! error (unreadable place data, I/O failure).

pub mod check;
pub mod decode;
pub mod encode;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use taxcode_core::{loader, PlaceRegistry};

/// Exit code for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit code when the input is rejected by the codec.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for operational failures.
pub const EXIT_ERROR: u8 = 2;

/// Load the place registry from `places`, or the bundled dataset.
pub fn load_registry(places: Option<&Path>) -> Result<Arc<PlaceRegistry>> {
    let registry = match places {
        Some(path) => loader::from_path(path)
            .with_context(|| format!("failed to load places from {}", path.display()))?,
        None => PlaceRegistry::bundled().context("failed to load bundled places")?,
    };
    tracing::debug!(places = registry.len(), "place registry loaded");
    Ok(Arc::new(registry))
}
