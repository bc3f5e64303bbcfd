//! # Temporal Types
//!
//! Two distinct notions of time flow through the engine:
//!
//! - [`Timestamp`]: an instant on the UTC timeline. Transactions carry one
//!   and the sliding-window scans measure distances between them.
//! - [`CalendarDate`]: a civil date with no time zone. Birth and expiry
//!   dates on identity documents are calendar dates.
//!
//! ## Clock Injection
//!
//! "Today" is never read from the system inside a component. Callers obtain
//! it from a [`Clock`] at the edge ([`SystemClock`] in production,
//! [`FixedClock`] in tests) and pass it down explicitly.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A UTC instant.
///
/// Parsing accepts any RFC 3339 offset and converts to UTC, so two feeds
/// that express the same instant in different zones order identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The Unix epoch. Used as the sort key for records without a timestamp.
    pub const EPOCH: Timestamp = Timestamp(DateTime::<Utc>::UNIX_EPOCH);

    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 / ISO 8601 instant, converting any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] if the string is not a
    /// valid RFC 3339 instant.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let dt = DateTime::parse_from_rfc3339(s.trim()).map_err(|e| {
            ValidationError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(dt.with_timezone(&Utc)))
    }

    /// Create a timestamp from a Unix epoch offset in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] if the offset is out of
    /// chrono's representable range.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: secs.to_string(),
                reason: "out of range".to_string(),
            })
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch offset in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Signed duration from `earlier` to `self`.
    pub fn duration_since(&self, earlier: &Timestamp) -> chrono::Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// The UTC calendar date this instant falls on.
    pub fn date(&self) -> CalendarDate {
        CalendarDate(self.0.date_naive())
    }

    /// Render as ISO 8601 with `Z` suffix, seconds precision.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

// ---------------------------------------------------------------------------
// CalendarDate
// ---------------------------------------------------------------------------

/// Two-digit years at or above this value belong to the 1900s.
///
/// A fixed cutover with no knowledge of the document's issue date:
/// `30..=99` map to 1930..=1999 and `00..=29` map to 2000..=2029.
pub const MRZ_CENTURY_CUTOVER: u32 = 30;

/// A civil date (no time, no zone), serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month, day. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `YYYY-MM-DD` date (zero-padded, exactly ten characters).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] for any other shape or an
    /// impossible date such as `2026-02-30`.
    pub fn parse_iso(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate(s.to_string());
        let b = s.as_bytes();
        let shaped = b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b
                .iter()
                .enumerate()
                .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
        if !shaped {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Decode an MRZ `YYMMDD` date using the fixed century cutover
    /// ([`MRZ_CENTURY_CUTOVER`]).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMrzDate`] unless the input is six
    /// ASCII digits forming a real date. Filler (`<`) is rejected.
    pub fn from_mrz_yymmdd(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMrzDate(s.to_string());
        if s.len() != 6 || !s.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let num = |range: std::ops::Range<usize>| -> Result<u32, ValidationError> {
            s[range].parse::<u32>().map_err(|_| invalid())
        };
        let yy = num(0..2)?;
        let month = num(2..4)?;
        let day = num(4..6)?;
        let year = if yy >= MRZ_CENTURY_CUTOVER {
            1900 + yy
        } else {
            2000 + yy
        };
        Self::from_ymd(year as i32, month, day).ok_or_else(invalid)
    }

    /// Access the underlying `chrono::NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_iso(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// The current UTC calendar date.
    fn today(&self) -> CalendarDate {
        self.now().date()
    }
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// A clock frozen at midnight UTC on the given date.
    pub fn at_date(date: CalendarDate) -> Self {
        let dt = date.as_naive().and_time(chrono::NaiveTime::MIN).and_utc();
        Self(Timestamp::from_datetime(dt))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_z_suffix() {
        let ts = Timestamp::parse("2025-02-10T09:12:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2025-02-10T09:12:00Z");
    }

    #[test]
    fn parse_converts_offset_to_utc() {
        let ts = Timestamp::parse("2025-02-10T14:12:00+05:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2025-02-10T09:12:00Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("2025-02-10").is_err());
    }

    #[test]
    fn epoch_orders_first() {
        let ts = Timestamp::parse("1999-12-31T23:59:59Z").unwrap();
        assert!(Timestamp::EPOCH < ts);
        assert_eq!(Timestamp::EPOCH.epoch_secs(), 0);
    }

    #[test]
    fn duration_since_is_signed() {
        let a = Timestamp::parse("2025-01-01T00:00:00Z").unwrap();
        let b = Timestamp::parse("2025-01-02T00:00:00Z").unwrap();
        assert_eq!(b.duration_since(&a), chrono::Duration::hours(24));
        assert_eq!(a.duration_since(&b), chrono::Duration::hours(-24));
    }

    #[test]
    fn timestamp_date_is_utc() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.date().to_iso_string(), "2026-03-01");
    }

    #[test]
    fn parse_iso_strict_shape() {
        assert!(CalendarDate::parse_iso("1974-08-12").is_ok());
        assert!(CalendarDate::parse_iso("1974-8-12").is_err());
        assert!(CalendarDate::parse_iso("12/08/1974").is_err());
        assert!(CalendarDate::parse_iso("2026-02-30").is_err());
        assert!(CalendarDate::parse_iso("").is_err());
    }

    #[test]
    fn mrz_century_cutover() {
        assert_eq!(
            CalendarDate::from_mrz_yymmdd("690806").unwrap().to_iso_string(),
            "1969-08-06"
        );
        assert_eq!(
            CalendarDate::from_mrz_yymmdd("300101").unwrap().to_iso_string(),
            "1930-01-01"
        );
        assert_eq!(
            CalendarDate::from_mrz_yymmdd("291231").unwrap().to_iso_string(),
            "2029-12-31"
        );
        assert_eq!(
            CalendarDate::from_mrz_yymmdd("000229").unwrap().to_iso_string(),
            "2000-02-29"
        );
    }

    #[test]
    fn mrz_date_rejects_filler_and_impossible_dates() {
        assert!(CalendarDate::from_mrz_yymmdd("<<<<<<").is_err());
        assert!(CalendarDate::from_mrz_yymmdd("691306").is_err());
        assert!(CalendarDate::from_mrz_yymmdd("69080").is_err());
        assert!(CalendarDate::from_mrz_yymmdd("6908061").is_err());
    }

    #[test]
    fn calendar_date_serde_as_string() {
        let d = CalendarDate::from_ymd(2031, 6, 23).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2031-06-23\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<CalendarDate>("\"23/06/2031\"").is_err());
    }

    #[test]
    fn fixed_clock_reports_date() {
        let day = CalendarDate::from_ymd(2026, 10, 16).unwrap();
        let clock = FixedClock::at_date(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().to_iso8601(), "2026-10-16T00:00:00Z");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// MRZ date decoding never panics on arbitrary six-byte input.
            #[test]
            fn mrz_date_never_panics(s in "\\PC{0,8}") {
                let _ = CalendarDate::from_mrz_yymmdd(&s);
            }

            /// Every decoded MRZ date lands in 1930..=2029.
            #[test]
            fn mrz_date_century_window(yy in 0u32..100, mm in 1u32..=12, dd in 1u32..=28) {
                let s = format!("{yy:02}{mm:02}{dd:02}");
                let d = CalendarDate::from_mrz_yymmdd(&s).unwrap();
                prop_assert!((1930..=2029).contains(&d.year()));
            }
        }
    }
}
