//! # Identity Reconciliation
//!
//! Merges visual fields with a decoded [`MrzRecord`] into an
//! [`IdentitySignal`].
//!
//! ## Selection
//!
//! Every attribute prefers the visual value when it is non-blank and falls
//! back to the MRZ value otherwise. Names try the visual aliases in order
//! (`FullName`, `Name`, `FirstName`+`LastName`, `GivenName`+`Surname`,
//! `GivenNames`+`Surname`) before the MRZ.
//!
//! ## Consistency
//!
//! Name, document number and date of birth are compared only when both
//! sides are present. A mismatch is reported only when the MRZ passed all
//! of its own check digits.

use kyc_core::CalendarDate;
use kyc_mrz::MrzRecord;

use crate::select::{disagrees, first_non_blank, join_name};
use crate::signal::{
    ConsistencyReport, ExpiryStatus, IdentityInfo, IdentitySignal, REASON_CROPPED,
    REASON_EXPIRED, REASON_MISMATCH, REASON_MRZ_INVALID,
};
use crate::visual::{keys, VisualFields};

/// Page-text marker for a cropped capture, matched case-insensitively.
pub const CROPPING_MARKER: &str = "cropped";

/// Reconcile visual fields against a decoded MRZ as of `today`.
pub fn reconcile(visual: &VisualFields, mrz: &MrzRecord, today: CalendarDate) -> IdentitySignal {
    if !visual.document_found {
        tracing::debug!("no document found by analyzer");
        return IdentitySignal::no_document(visual.document_ref.clone());
    }

    let visual_name = visual_name(visual);
    let visual_doc_no = first_non_blank([visual.text(keys::DOCUMENT_NUMBER)]);
    let visual_dob = visual
        .date(keys::DATE_OF_BIRTH)
        .or_else(|| visual.date(keys::BIRTH_DATE));

    let mrz_name = mrz.full_name();

    let consistency = ConsistencyReport {
        name: disagrees(visual_name.as_deref(), mrz_name.as_deref()),
        document_number: disagrees(visual_doc_no.as_deref(), mrz.document_number.as_deref()),
        dob: match (visual_dob, mrz.birth_date) {
            (Some(v), Some(m)) => Some(v.to_iso_string() != m.to_iso_string()),
            _ => None,
        },
    };
    let mrz_valid = mrz.checks_valid();
    let identity_mismatch = mrz_valid && consistency.any_mismatch();

    let id_info = IdentityInfo {
        full_name: visual_name.or(mrz_name),
        dob: visual_dob.or(mrz.birth_date),
        doc_no: visual_doc_no.or_else(|| mrz.document_number.clone()),
        country: first_non_blank([
            visual.text(keys::COUNTRY_REGION),
            visual.text(keys::NATIONALITY),
            mrz.nationality.as_deref(),
            mrz.issuing_state.as_deref(),
        ]),
    };

    let expiry_status = expiry_status(visual, mrz, today);
    let expired = expiry_status.is_expired();
    let quality = quality(visual.confidence);
    let cropping_hint = visual
        .content
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(CROPPING_MARKER));

    let mut reasons = Vec::new();
    if mrz.present && !mrz_valid {
        reasons.push(REASON_MRZ_INVALID.to_string());
    }
    if identity_mismatch {
        reasons.push(REASON_MISMATCH.to_string());
    }
    if expired {
        reasons.push(REASON_EXPIRED.to_string());
    }
    if cropping_hint {
        reasons.push(REASON_CROPPED.to_string());
    }

    tracing::debug!(
        mrz_present = mrz.present,
        mrz_valid,
        identity_mismatch,
        expired,
        cropping_hint,
        reasons = reasons.len(),
        "reconciled identity signal"
    );

    IdentitySignal {
        document_ref: visual.document_ref.clone(),
        id_info,
        mrz_valid,
        mrz_checks: mrz.checks,
        identity_mismatch,
        consistency,
        expired,
        expiry_status,
        quality,
        cropping_hint,
        reasons,
        ok: true,
    }
}

/// Visual name by alias priority.
fn visual_name(visual: &VisualFields) -> Option<String> {
    first_non_blank([visual.text(keys::FULL_NAME), visual.text(keys::NAME)])
        .or_else(|| join_name(visual.text(keys::FIRST_NAME), visual.text(keys::LAST_NAME)))
        .or_else(|| join_name(visual.text(keys::GIVEN_NAME), visual.text(keys::SURNAME)))
        .or_else(|| join_name(visual.text(keys::GIVEN_NAMES), visual.text(keys::SURNAME)))
}

/// Resolve the expiry date and compare it with `today`.
///
/// A non-blank visual expiry wins even when it does not parse; in that
/// case the status is [`ExpiryStatus::Unknown`] and the document is
/// reported as not expired.
fn expiry_status(visual: &VisualFields, mrz: &MrzRecord, today: CalendarDate) -> ExpiryStatus {
    let resolved = match visual.date_text(keys::DATE_OF_EXPIRATION) {
        Some(raw) => match CalendarDate::parse_iso(raw) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::debug!(error = %err, "visual expiry date unparsable, treating as not expired");
                None
            }
        },
        None => mrz.expiry_date,
    };
    match resolved {
        Some(date) if date < today => ExpiryStatus::Expired,
        Some(_) => ExpiryStatus::Valid,
        None => ExpiryStatus::Unknown,
    }
}

/// Clamp confidence to `[0, 1]`. Absent or NaN confidence is `0.0`.
fn quality(confidence: Option<f64>) -> f64 {
    match confidence {
        Some(c) if !c.is_nan() => c.clamp(0.0, 1.0),
        _ => 0.0,
    }
}
