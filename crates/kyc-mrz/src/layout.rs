//! # TD3 Layout
//!
//! Fixed field offsets for the second line of a TD3 (passport) MRZ as read
//! by this engine. Spans are 0-indexed and half-open.
//!
//! ```text
//! L898902C<3<UTO6908061F9406236ZE184226B<<<<0<
//! |-------|| |-||----|||----|||-----------||
//! doc no  cd nat dob cd sex exp cd optional composite cd
//! ```
//!
//! Position 10 is a separator and is not read. The composite string is
//! `[0,10) + [11,21) + [22,29) + [29,42)`, checked at 42; nationality is
//! covered by the composite and sex is not. The ICAO 9303 specimen places
//! every field after the document number one column earlier, so read
//! through this layout only its document-number check holds.

use std::ops::Range;

/// Document number.
pub const DOCUMENT_NUMBER: Range<usize> = 0..9;
/// Document number check digit.
pub const DOCUMENT_NUMBER_CHECK: usize = 9;
/// Nationality (ISO 3166-1 alpha-3, or an ICAO code such as `UTO`).
pub const NATIONALITY: Range<usize> = 11..14;
/// Date of birth, `YYMMDD`.
pub const BIRTH_DATE: Range<usize> = 14..20;
/// Date of birth check digit.
pub const BIRTH_DATE_CHECK: usize = 20;
/// Sex: `M`, `F`, or `<`.
pub const SEX: usize = 21;
/// Date of expiry, `YYMMDD`.
pub const EXPIRY_DATE: Range<usize> = 22..28;
/// Date of expiry check digit.
pub const EXPIRY_DATE_CHECK: usize = 28;
/// Optional data (personal number), covered only through the composite.
pub const OPTIONAL_DATA: Range<usize> = 29..42;
/// Spans concatenated to form the composite check string.
pub const COMPOSITE_SPANS: [Range<usize>; 4] = [0..10, 11..21, 22..29, 29..42];
/// Composite check digit.
pub const COMPOSITE_CHECK: usize = 42;

/// Full TD3 line length.
pub const TD3_LINE_LEN: usize = 44;
/// Shortest second line the decoder will attempt: the composite check
/// digit is the last position read.
pub const MIN_LINE2_LEN: usize = 43;

/// Document-type prefix stripped from line 1.
pub const PASSPORT_PREFIX: &str = "P<";
/// Length of the issuing-state code that opens the primary name segment.
pub const ISSUING_STATE_LEN: usize = 3;
/// Separator between primary (surname) and secondary (given names) segments.
pub const NAME_SEPARATOR: &str = "<<";
