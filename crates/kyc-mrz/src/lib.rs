#![deny(missing_docs)]

//! # kyc-mrz — Machine-Readable Zone Decoding
//!
//! Decodes the two-line TD3 (passport) machine-readable zone defined by
//! ICAO Doc 9303 into a typed [`MrzRecord`], and verifies its four check
//! digits.
//!
//! ## Architecture
//!
//! - **Text** (`text.rs`): [`MrzLine`], bounds-clamped character access.
//!   Every substring and character read in this crate goes through it.
//!
//! - **Check digits** (`check_digit.rs`): the weighted modulo-10 algorithm.
//!
//! - **Layout** (`layout.rs`): the fixed TD3 field offsets.
//!
//! - **Decode** (`decode.rs`): field extraction, name decoding, and MRZ
//!   block splitting.
//!
//! - **Record** (`record.rs`): the immutable decoded result and its
//!   per-field check report.
//!
//! ## Failure Model
//!
//! Decoding never fails. Absent, short, or garbled input yields a record
//! whose checks are invalid and whose derived fields are `None`.

pub mod check_digit;
pub mod decode;
pub mod layout;
pub mod record;
pub mod text;

pub use check_digit::{check_digit_value, compute_check_digit, verify_check_digit};
pub use decode::{decode_block, decode_name, decode_td3, split_mrz_block};
pub use record::{MrzCheckReport, MrzName, MrzRecord, Sex};
pub use text::MrzLine;
