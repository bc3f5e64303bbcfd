//! # ICAO 9303 Check Digits
//!
//! Weighted modulo-10 check digits. Each character maps to a value
//! (`<` → 0, `0`–`9` → 0–9, `A`–`Z` → 10–35), values are multiplied by the
//! repeating weights `7, 3, 1`, and the sum modulo 10 is the check digit.
//!
//! Characters outside the MRZ alphabet (lowercase, punctuation, OCR noise)
//! contribute 0, the same as filler.

/// Repeating weight sequence.
pub const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of one MRZ character.
pub fn check_digit_value(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => 10 + (c as u32 - 'A' as u32),
        _ => 0,
    }
}

/// Compute the check digit (0–9) for `data`.
pub fn compute_check_digit(data: &str) -> u32 {
    let sum: u32 = data
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, w)| check_digit_value(c) * w)
        .sum();
    sum % 10
}

/// Whether `claimed` is the correct check digit for `data`.
///
/// A claimed digit that is not an ASCII digit (filler for an absent field,
/// OCR noise) never verifies.
pub fn verify_check_digit(data: &str, claimed: char) -> bool {
    match claimed.to_digit(10) {
        Some(d) => compute_check_digit(data) == d,
        None => false,
    }
}
