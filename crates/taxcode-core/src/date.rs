//! # Birth Date and Sex Fields
//!
//! Encoding and decoding of positions 6..11: two-digit year, month letter,
//! and day of month with the +40 female offset.
//!
//! Two-digit years are resolved against a reference year: a value greater
//! than or equal to the reference year's last two digits belongs to the
//! 1900s, anything smaller to the 2000s. Correct decoding is therefore
//! limited to people born within the last hundred years.

use chrono::{Datelike, NaiveDate};

use crate::error::DecodeError;
use crate::person::Sex;

/// Month letters, indexed by month number minus one.
pub const MONTH_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

/// Offset added to the day of month for women.
pub const FEMALE_DAY_OFFSET: u32 = 40;

/// Letter for a month number (1-12).
pub fn month_letter(month: u32) -> Option<char> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_LETTERS.get(index).copied()
}

/// Month number (1-12) for a month letter.
pub fn month_from_letter(letter: char) -> Option<u32> {
    MONTH_LETTERS
        .iter()
        .position(|&l| l == letter.to_ascii_uppercase())
        .map(|i| i as u32 + 1)
}

/// Encode the year, month and day fields (5 characters) for a birth date.
pub fn encode_date(birth_date: NaiveDate, sex: Sex) -> String {
    let year = birth_date.year().rem_euclid(100);
    // NaiveDate::month() is always 1..=12.
    let month = month_letter(birth_date.month()).unwrap_or('A');
    let day = match sex {
        Sex::Male => birth_date.day(),
        Sex::Female => birth_date.day() + FEMALE_DAY_OFFSET,
    };
    format!("{year:02}{month}{day:02}")
}

/// Split a two-digit day field into day of month and sex.
pub fn decode_day(day_field: u32) -> (u32, Sex) {
    if day_field > 31 {
        // 32..=40 saturate to day 0, which no calendar accepts.
        (day_field.saturating_sub(FEMALE_DAY_OFFSET), Sex::Female)
    } else {
        (day_field, Sex::Male)
    }
}

/// Resolve a two-digit year against a reference calendar year.
pub fn resolve_century(two_digit_year: u32, reference_year: i32) -> i32 {
    let current = reference_year.rem_euclid(100) as u32;
    let y = two_digit_year as i32;
    if two_digit_year >= current {
        1900 + y
    } else {
        2000 + y
    }
}

/// Rebuild a birth date from already-normalized year, month letter and day
/// fields.
///
/// # Errors
///
/// - [`DecodeError::UnknownMonth`] for a letter outside the month table.
/// - [`DecodeError::InvalidDate`] when the fields do not form a real date.
pub fn decode_date(
    year_field: u32,
    month_letter: char,
    day_field: u32,
    reference_year: i32,
) -> Result<(NaiveDate, Sex), DecodeError> {
    let month = month_from_letter(month_letter).ok_or(DecodeError::UnknownMonth(month_letter))?;
    let (day, sex) = decode_day(day_field);
    let year = resolve_century(year_field, reference_year);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DecodeError::InvalidDate { year, month, day })?;
    Ok((date, sex))
}
