//! # TD3 Decoding
//!
//! Fixed-offset extraction of line-2 fields, check-digit verification, and
//! name decoding from line 1. All reads go through [`MrzLine`], so no input
//! can cause an out-of-range access.

use kyc_core::CalendarDate;

use crate::check_digit::verify_check_digit;
use crate::layout;
use crate::record::{MrzCheckReport, MrzName, MrzRecord, Sex};
use crate::text::{strip_fillers, MrzLine};

/// Split an MRZ text block, as delivered by document analysis, into its
/// first two non-empty lines.
///
/// Accepts `\n`, `\r\n` and bare `\r` line breaks. Trailing whitespace is
/// dropped from each line; leading whitespace is kept so field offsets stay
/// relative to the raw line. Returns `None` when the block has fewer than
/// two non-blank lines.
pub fn split_mrz_block(block: &str) -> Option<(String, String)> {
    let mut lines = block
        .split(['\n', '\r'])
        .map(str::trim_end)
        .filter(|l| !l.is_empty());
    let first = lines.next()?;
    let second = lines.next()?;
    Some((first.to_string(), second.to_string()))
}

/// Decode an MRZ text block. A missing, blank, or single-line block yields
/// a record whose checks fail.
pub fn decode_block(block: Option<&str>) -> MrzRecord {
    match block {
        None => MrzRecord::absent(),
        Some(b) if b.trim().is_empty() => MrzRecord::absent(),
        Some(b) => match split_mrz_block(b) {
            Some((l1, l2)) => decode_td3(Some(l1.as_str()), Some(l2.as_str())),
            None => {
                tracing::debug!("MRZ block has fewer than two lines");
                MrzRecord::undecodable()
            }
        },
    }
}

/// Decode a TD3 MRZ from its two lines.
///
/// If either line is absent, or line 2 is shorter than
/// [`layout::MIN_LINE2_LEN`] characters, every derived field is `None` and
/// the checks fail. Otherwise each field is extracted at its fixed offset
/// and the four check digits are verified independently.
pub fn decode_td3(line1: Option<&str>, line2: Option<&str>) -> MrzRecord {
    let present = [line1, line2]
        .iter()
        .any(|l| l.is_some_and(|s| !s.trim().is_empty()));
    if !present {
        return MrzRecord::absent();
    }

    let (l1, l2) = match (line1, line2) {
        (Some(a), Some(b)) => (MrzLine::new(a), MrzLine::new(b)),
        _ => {
            tracing::debug!("MRZ is missing a line");
            return MrzRecord::undecodable();
        }
    };
    if l2.len() < layout::MIN_LINE2_LEN {
        tracing::debug!(line2_len = l2.len(), "MRZ line 2 too short to decode");
        return MrzRecord::undecodable();
    }

    let doc_number_raw = l2.slice(layout::DOCUMENT_NUMBER.start, layout::DOCUMENT_NUMBER.end);
    let birth_raw = l2.slice(layout::BIRTH_DATE.start, layout::BIRTH_DATE.end);
    let expiry_raw = l2.slice(layout::EXPIRY_DATE.start, layout::EXPIRY_DATE.end);
    let composite: String = layout::COMPOSITE_SPANS
        .iter()
        .map(|span| l2.slice(span.start, span.end))
        .collect();

    let checks = MrzCheckReport {
        document_number: verify_check_digit(
            &doc_number_raw,
            l2.char_at(layout::DOCUMENT_NUMBER_CHECK),
        ),
        birth_date: verify_check_digit(&birth_raw, l2.char_at(layout::BIRTH_DATE_CHECK)),
        expiry_date: verify_check_digit(&expiry_raw, l2.char_at(layout::EXPIRY_DATE_CHECK)),
        composite: verify_check_digit(&composite, l2.char_at(layout::COMPOSITE_CHECK)),
    };

    tracing::debug!(
        document_number = checks.document_number,
        birth_date = checks.birth_date,
        expiry_date = checks.expiry_date,
        composite = checks.composite,
        "decoded TD3 MRZ"
    );

    let (issuing_state, name) = decode_name(&l1.to_string());

    MrzRecord {
        present: true,
        document_number: non_empty(strip_fillers(&doc_number_raw)),
        issuing_state,
        nationality: non_empty(strip_fillers(
            &l2.slice(layout::NATIONALITY.start, layout::NATIONALITY.end),
        )),
        birth_date: CalendarDate::from_mrz_yymmdd(&birth_raw).ok(),
        sex: Some(Sex::from_mrz(l2.char_at(layout::SEX))),
        expiry_date: CalendarDate::from_mrz_yymmdd(&expiry_raw).ok(),
        personal_number: non_empty(strip_fillers(
            &l2.slice(layout::OPTIONAL_DATA.start, layout::OPTIONAL_DATA.end),
        )),
        name,
        checks,
    }
}

/// Decode the issuing state and holder name from line 1.
///
/// A leading `P<` is stripped. The remainder splits on the first `<<` into
/// a primary segment (issuing state followed by the surname) and a
/// secondary segment (given names). The first three characters of the
/// primary segment are the issuing state and are not part of the surname.
/// Filler becomes a space and whitespace runs collapse.
pub fn decode_name(line1: &str) -> (Option<String>, Option<MrzName>) {
    let line = MrzLine::new(line1);
    let body = if line.starts_with(layout::PASSPORT_PREFIX) {
        line.tail(layout::PASSPORT_PREFIX.chars().count())
    } else {
        line.to_string()
    };

    let mut segments = body.split(layout::NAME_SEPARATOR);
    let primary = MrzLine::new(segments.next().unwrap_or_default());
    let secondary = segments.next().unwrap_or_default();

    let issuing_state = non_empty(strip_fillers(&primary.slice(0, layout::ISSUING_STATE_LEN)));
    let surname = strip_fillers(&primary.tail(layout::ISSUING_STATE_LEN));
    let given_names = strip_fillers(secondary);

    let name = if surname.is_empty() && given_names.is_empty() {
        None
    } else {
        Some(MrzName {
            surname,
            given_names,
        })
    };
    (issuing_state, name)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
