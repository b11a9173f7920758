//! # Control Character
//!
//! The 16th character of a tax code is computed from the first 15. Each
//! character is converted to a number with one of two substitution tables,
//! chosen by the parity of its 0-indexed position, the numbers are summed,
//! and `sum mod 26` is mapped to a letter `A..Z`.
//!
//! The two tables deliberately disagree on the same character (`L` is 4 at
//! even positions but 11 at odd positions). Digits share the value of the
//! letter at the same alphabet index (`0` = `A`, `1` = `B`, ...).
//!
//! The algorithm's own terminology is 1-indexed, so the table used at
//! 0-indexed even positions is traditionally called the "odd" table.

use crate::error::ValidationError;
use crate::person::TaxCode;

/// Number of characters the control character is computed from.
pub const BODY_LEN: usize = 15;

/// Values at 0-indexed even positions (0, 2, ..., 14), indexed `A..Z`.
const EVEN_POSITION_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Values at 0-indexed odd positions (1, 3, ..., 13), indexed `A..Z`.
const ODD_POSITION_VALUES: [u32; 26] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
];

/// Alphabet index shared by a digit and its letter counterpart.
fn table_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'A'..='Z' => Some(c as usize - 'A' as usize),
        _ => None,
    }
}

/// Value of `c` at the given 0-indexed position.
fn position_value(position: usize, c: char) -> Option<u32> {
    let index = table_index(c)?;
    let table = if position % 2 == 0 {
        &EVEN_POSITION_VALUES
    } else {
        &ODD_POSITION_VALUES
    };
    Some(table[index])
}

/// Compute the control character for the first 15 characters of a code.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChecksumInput`] unless `body` is
/// exactly 15 characters drawn from `0-9A-Z`.
pub fn compute(body: &str) -> Result<char, ValidationError> {
    if body.chars().count() != BODY_LEN {
        return Err(ValidationError::InvalidChecksumInput(body.to_string()));
    }
    let sum = body.chars().enumerate().try_fold(0u32, |acc, (i, c)| {
        position_value(i, c)
            .map(|v| acc + v)
            .ok_or_else(|| ValidationError::InvalidChecksumInput(body.to_string()))
    })?;
    Ok(char::from(b'A' + (sum % 26) as u8))
}

/// Whether the control character of `code` matches its body.
pub fn verify(code: &TaxCode) -> bool {
    compute(code.body()).is_ok_and(|expected| expected == code.check_char())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_codes() {
        assert_eq!(compute("BGNLSN93P19H294").unwrap(), 'L');
        assert_eq!(compute("FXXFXX93P59H294").unwrap(), 'P');
        assert_eq!(compute("XXXAAX10R19H501").unwrap(), 'R');
    }

    #[test]
    fn tables_disagree_on_l() {
        assert_eq!(position_value(0, 'L'), Some(4));
        assert_eq!(position_value(1, 'L'), Some(11));
    }

    #[test]
    fn digits_share_letter_values() {
        for (digit, letter) in ('0'..='9').zip('A'..='J') {
            assert_eq!(position_value(0, digit), position_value(0, letter));
            assert_eq!(position_value(1, digit), position_value(1, letter));
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(compute("").is_err());
        assert!(compute("BGNLSN93P19H29").is_err());
        assert!(compute("BGNLSN93P19H294L").is_err());
    }

    #[test]
    fn rejects_lowercase_and_symbols() {
        assert!(compute("bgnlsn93p19h294").is_err());
        assert!(compute("BGNLSN93P19H29-").is_err());
        assert!(compute("BGNLSN93P19H29È").is_err());
    }

    #[test]
    fn verify_detects_transcription_errors() {
        let good = TaxCode::new("BGNLSN93P19H294L").unwrap();
        assert!(verify(&good));
        let typo = TaxCode::new("BGNLSN93P19H294M").unwrap();
        assert!(!verify(&typo));
        let swapped = TaxCode::new("BGNLSN39P19H294L").unwrap();
        assert!(!verify(&swapped));
    }
}
