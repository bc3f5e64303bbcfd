//! # Identity Signal
//!
//! The record handed to the downstream decisioning step. Serialized
//! field names are camelCase and stable; the record is built once per
//! document and never mutated afterwards.

use kyc_core::CalendarDate;
use kyc_mrz::MrzCheckReport;
use serde::Serialize;

/// MRZ present but at least one check digit failed.
pub const REASON_MRZ_INVALID: &str = "MRZ present but failed check-digit validation (ICAO 9303).";
/// Valid MRZ disagrees with the visual fields.
pub const REASON_MISMATCH: &str = "Inconsistency between MRZ and visual fields.";
/// Resolved expiry is in the past.
pub const REASON_EXPIRED: &str = "Document expired.";
/// Page text suggests a cropped capture.
pub const REASON_CROPPED: &str = "Cropped/partial frame detected.";
/// The analyzer found no document.
pub const REASON_NO_DOCUMENT: &str = "No document parsed.";

/// Resolved identity fields, visual first with MRZ fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityInfo {
    /// Holder name.
    pub full_name: Option<String>,
    /// Date of birth.
    pub dob: Option<CalendarDate>,
    /// Document number.
    pub doc_no: Option<String>,
    /// Issuing country or nationality.
    pub country: Option<String>,
}

/// Per-field consistency outcome between visual and MRZ values.
///
/// `None` means the comparison was not evaluated because one side was
/// absent; `Some(true)` means the values disagreed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    /// Name disagreement.
    pub name: Option<bool>,
    /// Document number disagreement.
    pub document_number: Option<bool>,
    /// Date-of-birth disagreement.
    pub dob: Option<bool>,
}

impl ConsistencyReport {
    /// Whether any evaluated comparison disagreed.
    pub fn any_mismatch(&self) -> bool {
        [self.name, self.document_number, self.dob]
            .into_iter()
            .any(|m| m == Some(true))
    }
}

/// How the expired flag was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expiry date is today or later.
    Valid,
    /// Expiry date is strictly before today.
    Expired,
    /// No expiry available, or it could not be parsed. Reported as not
    /// expired.
    Unknown,
}

impl ExpiryStatus {
    /// The boolean surfaced as `expired`.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Identity signal for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySignal {
    /// Source document reference, echoed from the input.
    pub document_ref: Option<String>,
    /// Resolved identity fields.
    pub id_info: IdentityInfo,
    /// All four MRZ check digits verified.
    pub mrz_valid: bool,
    /// Individual check-digit outcomes.
    pub mrz_checks: MrzCheckReport,
    /// A valid MRZ disagrees with the visual fields.
    pub identity_mismatch: bool,
    /// Per-field comparison outcomes behind `identity_mismatch`.
    pub consistency: ConsistencyReport,
    /// Resolved expiry is before today.
    pub expired: bool,
    /// Detail behind `expired`.
    pub expiry_status: ExpiryStatus,
    /// Document-level confidence clamped to `[0, 1]`.
    pub quality: f64,
    /// Page text mentions cropping.
    pub cropping_hint: bool,
    /// Human-readable reasons, in fixed order.
    pub reasons: Vec<String>,
    /// `false` when no document was parsed.
    pub ok: bool,
}

impl IdentitySignal {
    /// Signal for an analysis that found no document.
    pub fn no_document(document_ref: Option<String>) -> Self {
        Self {
            document_ref,
            id_info: IdentityInfo::default(),
            mrz_valid: false,
            mrz_checks: MrzCheckReport::failed(),
            identity_mismatch: false,
            consistency: ConsistencyReport::default(),
            expired: false,
            expiry_status: ExpiryStatus::Unknown,
            quality: 0.0,
            cropping_hint: false,
            reasons: vec![REASON_NO_DOCUMENT.to_string()],
            ok: false,
        }
    }
}
