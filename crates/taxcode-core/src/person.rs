//! # Person and Tax Code Types
//!
//! The two values the codec converts between: a [`Person`] (transient,
//! constructed per call) and a [`TaxCode`] (validated 16-character newtype).
//!
//! ## Tax code layout
//!
//! ```text
//!  0..3   family name fragment     A-Z
//!  3..6   given name fragment      A-Z
//!  6..8   two-digit birth year     digit or omocodic letter
//!  8      month letter             ABCDEHLMPRST
//!  9..11  day (+40 when female)    digit or omocodic letter
//! 11..15  place code               letter + 3 digit or omocodic letter
//! 15      control character        A-Z
//! ```
//!
//! ## Omocodia
//!
//! When two people would receive the same code, the issuing office replaces
//! digits (right to left) with the letters `L M N P Q R S T U V` standing for
//! `0..9`. [`TaxCode::normalized`] undoes the substitution; the control
//! character is always computed over the code as written.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::MONTH_LETTERS;
use crate::error::ValidationError;

/// Total length of a personal tax code.
pub const TAX_CODE_LEN: usize = 16;

/// Substitution letters for the digits `0..9` under omocodia.
pub const OMOCODIC_LETTERS: [char; 10] = ['L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V'];

/// Positions that hold a digit or its omocodic substitute.
const NUMERIC_POSITIONS: [usize; 7] = [6, 7, 9, 10, 12, 13, 14];

/// Biological sex as encoded in the day field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    /// Day field holds the plain day of month.
    Male,
    /// Day field holds the day of month plus 40.
    Female,
}

impl Sex {
    /// Return the string representation of this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifying attributes a tax code is derived from.
///
/// After a decode, `given_name` and `family_name` hold only the 3-letter
/// fragments carried by the code; the original strings are not recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Given name, or its 3-letter fragment after a decode.
    pub given_name: String,
    /// Family name, or its 3-letter fragment after a decode.
    pub family_name: String,
    /// Sex, which selects the day offset.
    pub sex: Sex,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Municipality or foreign state of birth, as held by the place registry.
    pub birth_place: String,
    /// Province abbreviation of the birth place (`EE` for foreign states).
    pub birth_province: String,
}

/// A structurally valid Italian personal tax code.
///
/// Always 16 upper-case ASCII characters. Construction checks the character
/// class of every position but not the control character; see
/// [`crate::checksum::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxCode(String);

impl TaxCode {
    /// Create a tax code, trimming surrounding whitespace and upper-casing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTaxCode`] if any position holds a
    /// character outside its class.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_ascii_uppercase();
        if !is_well_formed(&upper) {
            return Err(ValidationError::InvalidTaxCode(raw));
        }
        Ok(Self(upper))
    }

    /// Access the full 16-character code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 15 characters, the input of the control character.
    pub fn body(&self) -> &str {
        &self.0[..15]
    }

    /// Family name fragment (positions 0..3).
    pub fn family_name_part(&self) -> &str {
        &self.0[0..3]
    }

    /// Given name fragment (positions 3..6).
    pub fn given_name_part(&self) -> &str {
        &self.0[3..6]
    }

    /// Two-digit year field as written (positions 6..8).
    pub fn year_part(&self) -> &str {
        &self.0[6..8]
    }

    /// Month letter (position 8).
    pub fn month_letter(&self) -> char {
        char::from(self.0.as_bytes()[8])
    }

    /// Day field as written (positions 9..11).
    pub fn day_part(&self) -> &str {
        &self.0[9..11]
    }

    /// Place code as written (positions 11..15).
    pub fn place_code(&self) -> &str {
        &self.0[11..15]
    }

    /// Control character (position 15).
    pub fn check_char(&self) -> char {
        char::from(self.0.as_bytes()[15])
    }

    /// Whether any numeric position carries an omocodic letter.
    pub fn is_omocode(&self) -> bool {
        let bytes = self.0.as_bytes();
        NUMERIC_POSITIONS
            .iter()
            .any(|&i| bytes[i].is_ascii_alphabetic())
    }

    /// Return the code with omocodic letters mapped back to digits.
    ///
    /// The control character is left untouched, so the result of a
    /// normalization generally fails checksum verification.
    pub fn normalized(&self) -> String {
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if NUMERIC_POSITIONS.contains(&i) {
                    omocodic_digit(c).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

impl std::fmt::Display for TaxCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaxCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxCode> for String {
    fn from(code: TaxCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for TaxCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Map an omocodic letter to the digit it stands for.
fn omocodic_digit(c: char) -> Option<char> {
    OMOCODIC_LETTERS
        .iter()
        .position(|&l| l == c)
        .and_then(|d| char::from_digit(d as u32, 10))
}

pub(crate) fn is_numeric_or_omocodic(c: char) -> bool {
    c.is_ascii_digit() || OMOCODIC_LETTERS.contains(&c)
}

fn is_well_formed(s: &str) -> bool {
    if s.len() != TAX_CODE_LEN || !s.is_ascii() {
        return false;
    }
    s.chars().enumerate().all(|(i, c)| match i {
        0..=5 | 11 | 15 => c.is_ascii_uppercase(),
        8 => MONTH_LETTERS.contains(&c),
        _ => is_numeric_or_omocodic(c),
    })
}
