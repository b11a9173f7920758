//! # Tax Code Decoder
//!
//! Parses a [`TaxCode`] back into a [`Person`]. Only the 3-letter name
//! fragments survive encoding, so the returned `given_name` and
//! `family_name` are fragments, not names.
//!
//! Omocodic substitutions in the numeric positions are undone before the
//! year, day and place code are read.
//!
//! The control character is not checked unless
//! [`DecodeOptions::verify_checksum`] is set.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::checksum;
use crate::date::decode_date;
use crate::error::{CodecError, DecodeError, ValidationError};
use crate::person::{Person, TaxCode};
use crate::place::PlaceRegistry;

/// Behavior switches for [`TaxCodeDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject codes whose control character does not match their body.
    pub verify_checksum: bool,
}

/// Stateless decoder over a shared place registry.
#[derive(Debug, Clone)]
pub struct TaxCodeDecoder {
    registry: Arc<PlaceRegistry>,
    options: DecodeOptions,
}

impl TaxCodeDecoder {
    /// Create a decoder with default options.
    pub fn new(registry: Arc<PlaceRegistry>) -> Self {
        Self::with_options(registry, DecodeOptions::default())
    }

    /// Create a decoder with explicit options.
    pub fn with_options(registry: Arc<PlaceRegistry>, options: DecodeOptions) -> Self {
        Self { registry, options }
    }

    /// Options this decoder was built with.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode `code`, resolving two-digit years against the current UTC year.
    ///
    /// # Errors
    ///
    /// See [`TaxCodeDecoder::decode_with_reference_year`].
    pub fn decode(&self, code: &TaxCode) -> Result<Person, CodecError> {
        self.decode_with_reference_year(code, Utc::now().year())
    }

    /// Decode `code`, resolving two-digit years against `reference_year`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::ChecksumMismatch`] when checksum verification is on
    ///   and the control character is wrong.
    /// - [`DecodeError::InvalidDate`] when the date fields name no real day.
    /// - [`CodecError::PlaceNotFound`] when the place code is unknown.
    pub fn decode_with_reference_year(
        &self,
        code: &TaxCode,
        reference_year: i32,
    ) -> Result<Person, CodecError> {
        if self.options.verify_checksum {
            let expected = checksum::compute(code.body())?;
            if expected != code.check_char() {
                return Err(DecodeError::ChecksumMismatch {
                    expected,
                    found: code.check_char(),
                }
                .into());
            }
        }

        let normalized = code.normalized();
        let year_field = parse_digits(&normalized[6..8], code)?;
        let day_field = parse_digits(&normalized[9..11], code)?;
        let (birth_date, sex) =
            decode_date(year_field, code.month_letter(), day_field, reference_year)?;

        let place = self.registry.lookup_by_code(&normalized[11..15])?;

        Ok(Person {
            given_name: code.given_name_part().to_string(),
            family_name: code.family_name_part().to_string(),
            sex,
            birth_date,
            birth_place: place.name().to_string(),
            birth_province: place.province().to_string(),
        })
    }
}

fn parse_digits(field: &str, code: &TaxCode) -> Result<u32, ValidationError> {
    field
        .parse()
        .map_err(|_| ValidationError::InvalidTaxCode(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaceNotFound;
    use crate::person::Sex;
    use crate::place::PlaceRecord;
    use chrono::NaiveDate;

    const REFERENCE_YEAR: i32 = 2026;

    fn registry() -> Arc<PlaceRegistry> {
        Arc::new(
            PlaceRegistry::from_records([
                PlaceRecord::new("Rimini", "RN", "H294").unwrap(),
                PlaceRecord::new("Roma", "RM", "H501").unwrap(),
            ])
            .unwrap(),
        )
    }

    fn decode(code: &str) -> Result<Person, CodecError> {
        TaxCodeDecoder::new(registry())
            .decode_with_reference_year(&TaxCode::new(code).unwrap(), REFERENCE_YEAR)
    }

    #[test]
    fn decodes_reference_code() {
        let p = decode("BGNLSN93P19H294L").unwrap();
        assert_eq!(p.family_name, "BGN");
        assert_eq!(p.given_name, "LSN");
        assert_eq!(p.sex, Sex::Male);
        assert_eq!(p.birth_date, NaiveDate::from_ymd_opt(1993, 9, 19).unwrap());
        assert_eq!(p.birth_place, "Rimini");
        assert_eq!(p.birth_province, "RN");
    }

    #[test]
    fn decodes_female() {
        let p = decode("FXXFXX93P59H294P").unwrap();
        assert_eq!(p.sex, Sex::Female);
        assert_eq!(p.birth_date, NaiveDate::from_ymd_opt(1993, 9, 19).unwrap());
    }

    #[test]
    fn recent_years_resolve_to_2000s() {
        let p = decode("XXXAAX10R19H501R").unwrap();
        assert_eq!(p.birth_date, NaiveDate::from_ymd_opt(2010, 10, 19).unwrap());
        assert_eq!(p.birth_place, "Roma");
    }

    #[test]
    fn decodes_omocode() {
        let p = decode("BGNLSNVPPMVHNVQL").unwrap();
        assert_eq!(p.birth_date, NaiveDate::from_ymd_opt(1993, 9, 19).unwrap());
        assert_eq!(p.birth_place, "Rimini");
    }

    #[test]
    fn unknown_place_code() {
        match decode("BGNLSN93P19H295L") {
            Err(CodecError::PlaceNotFound(PlaceNotFound::ByCode { code })) => {
                assert_eq!(code, "H295");
            }
            other => panic!("expected PlaceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn impossible_date_is_a_decode_error() {
        // 30 February.
        assert!(matches!(
            decode("BGNLSN93B30H294L"),
            Err(CodecError::Decode(DecodeError::InvalidDate { month: 2, day: 30, .. }))
        ));
        // Day field in the 32..=40 gap.
        assert!(matches!(
            decode("BGNLSN93P35H294L"),
            Err(CodecError::Decode(DecodeError::InvalidDate { .. }))
        ));
    }

    #[test]
    fn checksum_ignored_by_default() {
        assert!(decode("BGNLSN93P19H294Z").is_ok());
    }

    #[test]
    fn checksum_verified_when_enabled() {
        let decoder = TaxCodeDecoder::with_options(
            registry(),
            DecodeOptions {
                verify_checksum: true,
            },
        );
        let good = TaxCode::new("BGNLSN93P19H294L").unwrap();
        assert!(decoder.decode_with_reference_year(&good, REFERENCE_YEAR).is_ok());

        let bad = TaxCode::new("BGNLSN93P19H294Z").unwrap();
        match decoder.decode_with_reference_year(&bad, REFERENCE_YEAR) {
            Err(CodecError::Decode(DecodeError::ChecksumMismatch { expected, found })) => {
                assert_eq!(expected, 'L');
                assert_eq!(found, 'Z');
            }
            other => panic!("expected ChecksumMismatch, got {other:?}"),
        }
    }

    #[test]
    fn decode_uses_current_year() {
        // 1993 is outside any window in which it would resolve to 2093.
        let code = TaxCode::new("BGNLSN93P19H294L").unwrap();
        let p = TaxCodeDecoder::new(registry()).decode(&code).unwrap();
        assert_eq!(p.birth_date.year(), 1993);
    }
}
