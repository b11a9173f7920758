//! # Decode Subcommand
//!
//! Recovers sex, birth date and birth place from a tax code. The name fields
//! of the output are the 3-letter fragments carried by the code.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use taxcode_core::{DecodeOptions, PlaceRegistry, TaxCode, TaxCodeDecoder};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the `taxcode decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// The 16-character tax code.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Reject codes whose control character is wrong.
    #[arg(long)]
    pub verify_checksum: bool,

    /// Print the decoded person as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the decode subcommand.
///
/// Returns exit code: 0 on success, 1 if the code is malformed or names no
/// valid person.
pub fn run_decode(
    args: &DecodeArgs,
    registry: Arc<PlaceRegistry>,
    out: &mut impl Write,
) -> Result<u8> {
    let code = match TaxCode::new(args.code.as_str()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            return Ok(EXIT_REJECTED);
        }
    };

    let decoder = TaxCodeDecoder::with_options(
        registry,
        DecodeOptions {
            verify_checksum: args.verify_checksum,
        },
    );
    let person = match decoder.decode(&code) {
        Ok(person) => person,
        Err(e) => {
            tracing::error!("{e}");
            return Ok(EXIT_REJECTED);
        }
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&person)?)?;
    } else {
        writeln!(out, "family name: {}", person.family_name)?;
        writeln!(out, "given name:  {}", person.given_name)?;
        writeln!(out, "sex:         {}", person.sex)?;
        writeln!(out, "birth date:  {}", person.birth_date)?;
        writeln!(
            out,
            "birth place: {} ({})",
            person.birth_place, person.birth_province
        )?;
    }
    Ok(EXIT_OK)
}
