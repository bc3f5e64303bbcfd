//! # Identity Pipeline
//!
//! MRZ decoding, check-digit validation and reconciliation exercised
//! together through the public entry points. Line-2 fields sit at the
//! decoder's offsets: nationality `[11,14)`, birth date `[14,20)` + `20`,
//! sex `21`, expiry `[22,28)` + `28`, optional data `[29,42)`, composite
//! digit `42`.

use kyc_core::CalendarDate;
use kyc_identity::visual::keys;
use kyc_identity::{extract_identity_signal, ExpiryStatus, VisualFields};
use kyc_mrz::{compute_check_digit, decode_td3};
use proptest::prelude::*;

const SPECIMEN_L1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
const SPECIMEN_L2: &str = "L898902C<3<UTO6908061F9406236ZE184226B<<<<0<";
/// ICAO 9303 Part 4 specimen line 2 with composite digit 0, fields one
/// column earlier than the decoder reads them.
const ICAO_COLUMN_L2: &str = "L898902C<3UTO6908061F9406236ZE184226B<<<<<10";

fn today() -> CalendarDate {
    CalendarDate::from_ymd(2026, 10, 16).unwrap()
}

fn digit(data: &str) -> char {
    char::from_digit(compute_check_digit(data), 10).unwrap()
}

/// Assemble a 44-character line 2 with correct check digits. `opt` is the
/// 13-character optional data block.
fn build_line2(doc: &str, nat: &str, dob: &str, sex: char, exp: &str, opt: &str) -> String {
    let doc_part = format!("{doc}{}", digit(doc));
    let dob_part = format!("{dob}{}", digit(dob));
    let exp_part = format!("{exp}{}", digit(exp));
    let composite = format!("{doc_part}{nat}{dob_part}{exp_part}{opt}");
    format!(
        "{doc_part}<{nat}{dob_part}{sex}{exp_part}{opt}{}<",
        digit(&composite)
    )
}

// =========================================================================
// Canonical examples
// =========================================================================

#[test]
fn specimen_decodes_and_validates() {
    let rec = decode_td3(Some(SPECIMEN_L1), Some(SPECIMEN_L2));
    assert!(rec.checks_valid(), "{:?}", rec.checks.failures());
    let name = rec.name.unwrap();
    assert_eq!(name.surname, "ERIKSSON");
    assert_eq!(name.given_names, "ANNA MARIA");
    assert_eq!(rec.document_number.as_deref(), Some("L898902C"));
    assert_eq!(rec.nationality.as_deref(), Some("UTO"));
}

#[test]
fn icao_column_specimen_decodes_name_and_document_number() {
    let rec = decode_td3(Some(SPECIMEN_L1), Some(ICAO_COLUMN_L2));
    let name = rec.name.clone().unwrap();
    assert_eq!(name.surname, "ERIKSSON");
    assert_eq!(name.given_names, "ANNA MARIA");
    assert_eq!(rec.document_number.as_deref(), Some("L898902C"));
    assert!(rec.checks.document_number);
    // Birth date and expiry are read one column late, so their checks and
    // the composite fail.
    assert!(!rec.checks.birth_date);
    assert!(!rec.checks.expiry_date);
    assert!(!rec.checks.composite);
    assert!(!rec.checks_valid());
}

#[test]
fn builder_reproduces_specimen() {
    let l2 = build_line2("L898902C<", "UTO", "690806", 'F', "940623", "ZE184226B<<<<");
    assert_eq!(l2, SPECIMEN_L2);
}

#[test]
fn additional_known_lines_validate() {
    for l2 in [
        "X1234567<7<D<<8503150M3101012<<<<<<<<<<<<<5<",
        "C01X00T478<D<<6408125F2701013<<<<<<<<<<<<<7<",
        "AB12345671<UTO9001011M3001019<<<<<<<<<<<<<1<",
    ] {
        let rec = decode_td3(Some("P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<"), Some(l2));
        assert!(rec.checks_valid(), "{l2}: {:?}", rec.checks.failures());
    }
}

// =========================================================================
// Reconciliation
// =========================================================================

#[test]
fn mismatch_requires_both_sides() {
    // The MRZ carries no name, so the visual name has nothing to disagree with.
    let l1 = "P<UTO<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
    let rec = decode_td3(Some(l1), Some(SPECIMEN_L2));
    assert!(rec.checks_valid());
    assert_eq!(rec.full_name(), None);

    let visual = VisualFields::new().with_text(keys::FULL_NAME, "Completely Different");
    let signal = extract_identity_signal(&visual, Some(l1), Some(SPECIMEN_L2), today());
    assert!(signal.mrz_valid);
    assert_eq!(signal.consistency.name, None);
    assert!(!signal.identity_mismatch);
}

#[test]
fn mismatch_on_document_number() {
    let visual = VisualFields::new()
        .with_text(keys::FULL_NAME, "Anna Maria Eriksson")
        .with_text(keys::DOCUMENT_NUMBER, "L898902X");
    let signal = extract_identity_signal(&visual, Some(SPECIMEN_L1), Some(SPECIMEN_L2), today());
    assert!(signal.identity_mismatch);
    assert_eq!(
        signal.reasons,
        vec![
            "Inconsistency between MRZ and visual fields.".to_string(),
            "Document expired.".to_string(),
        ]
    );
}

#[test]
fn icao_column_line_never_accuses() {
    let visual = VisualFields::new()
        .with_text(keys::FULL_NAME, "Someone Else")
        .with_text(keys::DOCUMENT_NUMBER, "Z0000000");
    let signal = extract_identity_signal(&visual, Some(SPECIMEN_L1), Some(ICAO_COLUMN_L2), today());
    assert!(!signal.mrz_valid);
    assert!(!signal.identity_mismatch);
    assert_eq!(
        signal.reasons[0],
        "MRZ present but failed check-digit validation (ICAO 9303)."
    );
}

#[test]
fn expiry_from_mrz_when_visual_absent() {
    let l2 = build_line2("AB1234567", "UTO", "900101", 'M', "290101", "<<<<<<<<<<<<<");
    let signal =
        extract_identity_signal(&VisualFields::new(), Some(SPECIMEN_L1), Some(l2.as_str()), today());
    assert!(signal.mrz_valid);
    assert_eq!(signal.expiry_status, ExpiryStatus::Valid);
    assert!(signal.reasons.is_empty(), "{:?}", signal.reasons);

    // The specimen's 940623 expiry is read as 1994.
    let signal =
        extract_identity_signal(&VisualFields::new(), Some(SPECIMEN_L1), Some(SPECIMEN_L2), today());
    assert_eq!(signal.expiry_status, ExpiryStatus::Expired);
}

#[test]
fn century_cutover_applies_to_birth_dates() {
    let l2 = build_line2("AB1234567", "UTO", "291231", 'M', "300101", "<<<<<<<<<<<<<");
    let rec = decode_td3(Some(SPECIMEN_L1), Some(l2.as_str()));
    assert_eq!(rec.birth_date.unwrap().to_iso_string(), "2029-12-31");
    let l2 = build_line2("AB1234567", "UTO", "300101", 'M', "300101", "<<<<<<<<<<<<<");
    let rec = decode_td3(Some(SPECIMEN_L1), Some(l2.as_str()));
    assert_eq!(rec.birth_date.unwrap().to_iso_string(), "1930-01-01");
}

// =========================================================================
// Properties
// =========================================================================

fn line2_strategy() -> impl Strategy<Value = String> {
    (
        "[A-Z0-9<]{9}",
        "[A-Z]{3}",
        "[0-9]{6}",
        prop_oneof![Just('M'), Just('F'), Just('<')],
        "[0-9]{6}",
        "[A-Z0-9<]{13}",
    )
        .prop_map(|(doc, nat, dob, sex, exp, opt)| build_line2(&doc, &nat, &dob, sex, &exp, &opt))
}

/// Positions read into the composite string, plus the composite digit.
fn composite_region() -> impl Iterator<Item = usize> {
    (0..10).chain(11..21).chain(22..43)
}

proptest! {
    /// Correctly computed check digits always validate.
    #[test]
    fn valid_pairs_validate(l2 in line2_strategy()) {
        prop_assert_eq!(l2.chars().count(), 44);
        let rec = decode_td3(Some(SPECIMEN_L1), Some(l2.as_str()));
        prop_assert!(rec.checks_valid(), "{} failed {:?}", l2, rec.checks.failures());
    }

    /// Replacing any digit in the composite region with a different digit
    /// invalidates the MRZ.
    #[test]
    fn digit_substitution_in_composite_region_detected(
        l2 in line2_strategy(),
        pick in any::<prop::sample::Index>(),
        replacement in 0u32..10,
    ) {
        let chars: Vec<char> = l2.chars().collect();
        let covered: Vec<usize> = composite_region()
            .filter(|&i| chars[i].is_ascii_digit())
            .collect();
        let pos = covered[pick.index(covered.len())];
        let new_char = char::from_digit(replacement, 10).unwrap();
        prop_assume!(chars[pos] != new_char);

        let mut mutated = chars.clone();
        mutated[pos] = new_char;
        let mutated: String = mutated.into_iter().collect();
        let rec = decode_td3(Some(SPECIMEN_L1), Some(mutated.as_str()));
        prop_assert!(!rec.checks_valid(), "mutation at {} went undetected", pos);
    }

    /// A mismatch is never reported against an MRZ that failed its checks.
    #[test]
    fn no_mismatch_without_valid_checks(
        l2 in "[A-Z0-9<]{44}",
        name in "[A-Za-z ]{0,30}",
        doc in "[A-Z0-9]{0,9}",
    ) {
        let visual = VisualFields::new()
            .with_text(keys::FULL_NAME, &name)
            .with_text(keys::DOCUMENT_NUMBER, &doc);
        let signal = extract_identity_signal(&visual, Some(SPECIMEN_L1), Some(l2.as_str()), today());
        if !signal.mrz_valid {
            prop_assert!(!signal.identity_mismatch);
        }
    }
}
