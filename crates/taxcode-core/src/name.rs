//! # Name Compression
//!
//! Reduces a family name or given name to the 3-letter fragment used in the
//! first six positions of a tax code.
//!
//! The text is upper-cased and every character outside `A..Z` is dropped
//! (whitespace, apostrophes, digits, accented letters). The remaining letters
//! split into consonants and vowels, each kept in original order, and the
//! fragment is chosen by consonant count:
//!
//! | consonants | fragment                                         |
//! |------------|--------------------------------------------------|
//! | 0          | up to 3 vowels, `X`-padded                       |
//! | 1          | the consonant + up to 2 vowels, `X`-padded       |
//! | 2          | both consonants + first vowel, or `X`            |
//! | 3          | the three consonants                             |
//! | 4 or more  | family name: first three consonants              |
//! |            | given name: consonants 1, 3 and 4                |
//!
//! The given-name rule skipping the second consonant is part of the
//! algorithm. Because of it the fragment cannot be inverted into a name.

/// Which name a fragment is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// Family name (surname), positions 0..3.
    Family,
    /// Given name, positions 3..6.
    Given,
}

/// Length of every name fragment.
pub const FRAGMENT_LEN: usize = 3;

const PADDING: char = 'X';

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Compress free text into a 3-letter fragment matching `[A-Z]{3}`.
pub fn compress(raw: &str, field: NameField) -> String {
    let letters: Vec<char> = raw
        .chars()
        .flat_map(char::to_uppercase)
        .filter(char::is_ascii_uppercase)
        .collect();
    let (vowels, consonants): (Vec<char>, Vec<char>) =
        letters.into_iter().partition(|&c| is_vowel(c));

    let mut fragment: String = match (consonants.len(), field) {
        (0..=2, _) => consonants.iter().chain(vowels.iter()).take(FRAGMENT_LEN).collect(),
        (3, _) | (_, NameField::Family) => consonants[..FRAGMENT_LEN].iter().collect(),
        (_, NameField::Given) => [consonants[0], consonants[2], consonants[3]].iter().collect(),
    };
    while fragment.len() < FRAGMENT_LEN {
        fragment.push(PADDING);
    }
    fragment
}

/// Fragment for a family name.
pub fn family_name_code(raw: &str) -> String {
    compress(raw, NameField::Family)
}

/// Fragment for a given name.
pub fn given_name_code(raw: &str) -> String {
    compress(raw, NameField::Given)
}
