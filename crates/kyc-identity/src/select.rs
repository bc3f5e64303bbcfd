//! Field selection helpers shared by the reconciler.

/// The first candidate that is present and non-blank, trimmed.
pub fn first_non_blank<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// `"<first> <last>"` when at least one part is non-blank.
pub fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Comparison key: uppercase, keeping only ASCII letters and digits.
///
/// `"Anna-Maria  Eriksson"` and `"ANNA MARIA ERIKSSON"` compare equal.
pub fn normalize_for_compare(s: &str) -> String {
    s.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Whether two values disagree after normalization. `None` when either
/// side is absent, so the comparison is not evaluated.
pub fn disagrees(visual: Option<&str>, mrz: Option<&str>) -> Option<bool> {
    match (visual, mrz) {
        (Some(v), Some(m)) => Some(normalize_for_compare(v) != normalize_for_compare(m)),
        _ => None,
    }
}
