//! # Bounds-Clamped MRZ Text
//!
//! OCR output is frequently short or truncated. [`MrzLine`] makes every
//! fixed-offset read total: ranges are clamped to the line, and a character
//! read past the end yields the neutral digit `'0'`.

/// Character returned for out-of-range reads. Contributes zero to a
/// check-digit sum and is itself a valid digit.
pub const NEUTRAL_DIGIT: char = '0';

/// One line of MRZ text with clamped, panic-free positional access.
///
/// Positions count characters, not bytes, so non-ASCII OCR noise cannot
/// split a code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzLine {
    chars: Vec<char>,
}

impl MrzLine {
    /// Wrap a line of text. Trailing whitespace and line breaks are
    /// dropped; leading characters are kept so every offset is measured
    /// from the raw start of the line.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.trim_end().chars().collect(),
        }
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters in `[start, end)`, clamped to the line.
    ///
    /// An inverted or fully out-of-range span yields an empty string.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.chars.len();
        let a = start.min(len);
        let b = end.min(len).max(a);
        self.chars[a..b].iter().collect()
    }

    /// The character at `idx`, or [`NEUTRAL_DIGIT`] past the end.
    pub fn char_at(&self, idx: usize) -> char {
        self.chars.get(idx).copied().unwrap_or(NEUTRAL_DIGIT)
    }

    /// Whether the line starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut own = self.chars.iter();
        prefix.chars().all(|p| own.next() == Some(&p))
    }

    /// The remainder of the line from `start`, clamped.
    pub fn tail(&self, start: usize) -> String {
        self.slice(start, self.chars.len())
    }
}

impl std::fmt::Display for MrzLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Replace filler with spaces, trim, and collapse internal whitespace runs.
pub fn strip_fillers(s: &str) -> String {
    s.replace('<', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
