//! # Encode Subcommand
//!
//! Computes the tax code of a person and prints it, as plain text or as a
//! JSON object with a `tax_code` field.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use taxcode_core::{CodecError, Person, PlaceRegistry, Sex, TaxCodeEncoder};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Sex as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

/// Arguments for the `taxcode encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Given name.
    #[arg(long)]
    pub name: String,

    /// Family name (may be empty).
    #[arg(long, default_value = "")]
    pub surname: String,

    #[arg(long, value_enum)]
    pub sex: SexArg,

    /// Birth date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub birth_date: NaiveDate,

    /// Municipality or foreign country of birth.
    #[arg(long)]
    pub place: String,

    /// Province abbreviation (`EE` for foreign countries).
    #[arg(long)]
    pub province: String,

    /// Print a JSON object instead of the bare code.
    #[arg(long)]
    pub json: bool,
}

impl EncodeArgs {
    fn person(&self) -> Person {
        Person {
            given_name: self.name.clone(),
            family_name: self.surname.clone(),
            sex: self.sex.into(),
            birth_date: self.birth_date,
            birth_place: self.place.clone(),
            birth_province: self.province.clone(),
        }
    }
}

/// Execute the encode subcommand.
///
/// Returns exit code: 0 on success, 1 if the birth place is unknown.
pub fn run_encode(
    args: &EncodeArgs,
    registry: Arc<PlaceRegistry>,
    out: &mut impl Write,
) -> Result<u8> {
    let encoder = TaxCodeEncoder::new(registry);
    let code = match encoder.encode(&args.person()) {
        Ok(code) => code,
        Err(e @ CodecError::PlaceNotFound(_)) => {
            tracing::error!("{e}");
            return Ok(EXIT_REJECTED);
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        let body = serde_json::json!({ "tax_code": code });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
    } else {
        writeln!(out, "{code}")?;
    }
    Ok(EXIT_OK)
}
