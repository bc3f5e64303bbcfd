#![deny(missing_docs)]

//! # kyc-identity — Identity Signal Extraction
//!
//! Combines the fields a document-analysis service extracted from the
//! visual zone of an identity document with the decoded MRZ, and produces
//! one [`IdentitySignal`] per document.
//!
//! ## Entry Points
//!
//! - [`extract_identity_signal`] takes the two MRZ lines explicitly.
//! - [`extract_identity_signal_from_block`] reads the MRZ from the
//!   `MachineReadableZone` field of the visual extraction.
//!
//! Neither returns an error. Absent or malformed input degrades into the
//! signal's flags and `reasons` list. "Today" is a parameter; callers
//! obtain it from a [`kyc_core::Clock`].

pub mod reconcile;
pub mod select;
pub mod signal;
pub mod visual;

pub use reconcile::reconcile;
pub use signal::{ConsistencyReport, ExpiryStatus, IdentityInfo, IdentitySignal};
pub use visual::{VisualField, VisualFields};

use kyc_core::CalendarDate;

/// Decode the MRZ lines and reconcile them with the visual fields.
pub fn extract_identity_signal(
    visual: &VisualFields,
    mrz_line1: Option<&str>,
    mrz_line2: Option<&str>,
    today: CalendarDate,
) -> IdentitySignal {
    let mrz = kyc_mrz::decode_td3(mrz_line1, mrz_line2);
    reconcile(visual, &mrz, today)
}

/// Like [`extract_identity_signal`], with the MRZ taken from the visual
/// `MachineReadableZone` field.
pub fn extract_identity_signal_from_block(
    visual: &VisualFields,
    today: CalendarDate,
) -> IdentitySignal {
    let mrz = kyc_mrz::decode_block(visual.mrz_text());
    reconcile(visual, &mrz, today)
}
