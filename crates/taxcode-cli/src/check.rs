//! # Check Subcommand
//!
//! Validates the structure and control character of a tax code without
//! consulting the place registry.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use taxcode_core::{checksum, TaxCode};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the `taxcode check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The 16-character tax code.
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if the code is valid, 1 otherwise.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let code = match TaxCode::new(args.code.as_str()) {
        Ok(code) => code,
        Err(e) => {
            writeln!(out, "invalid: {e}")?;
            return Ok(EXIT_REJECTED);
        }
    };

    if !checksum::verify(&code) {
        let expected = checksum::compute(code.body())?;
        writeln!(
            out,
            "invalid: control character is {}, expected {expected}",
            code.check_char()
        )?;
        return Ok(EXIT_REJECTED);
    }

    if code.is_omocode() {
        let mut base = code.normalized();
        base.truncate(checksum::BODY_LEN);
        let check = checksum::compute(&base)?;
        writeln!(out, "valid (omocode of {base}{check})")?;
    } else {
        writeln!(out, "valid")?;
    }
    Ok(EXIT_OK)
}
