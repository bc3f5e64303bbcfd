//! # Error Hierarchy
//!
//! Validation errors for the shared domain primitives, built with
//! `thiserror`.
//!
//! Malformed domain input (a garbled MRZ, a transaction with a broken
//! timestamp) is never an error: it degrades to conservative defaults in
//! the component that reads it. [`ValidationError`] covers invalid
//! caller-supplied parameters. Each library crate wraps it in its own
//! error enum (`kyc_fraud::ConfigError`), and the binary joins them with
//! `anyhow` at the outer edge.

use thiserror::Error;

/// Validation errors for domain primitives and caller parameters.
///
/// Each variant carries the rejected input so that operators can diagnose
/// a bad request or configuration without guesswork.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Timestamp string is not a valid RFC 3339 instant.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Calendar date string is not a valid `YYYY-MM-DD` date.
    #[error("invalid date: \"{0}\" (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// MRZ date field is not a valid `YYMMDD` date.
    #[error("invalid MRZ date: \"{0}\" (expected YYMMDD)")]
    InvalidMrzDate(String),

    /// A sliding window was requested with a zero or negative duration.
    #[error("window duration must be positive, got {seconds}s")]
    NonPositiveWindow {
        /// The rejected duration in seconds.
        seconds: i64,
    },

    /// A sliding window was requested beyond the longest supported span.
    #[error("window duration must be at most {max}s, got {seconds}s")]
    WindowTooLong {
        /// The rejected duration in seconds.
        seconds: i64,
        /// The largest accepted duration in seconds.
        max: i64,
    },

    /// Signal label string is not part of the fixed vocabulary.
    #[error("unknown signal label: \"{0}\"")]
    UnknownSignalLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_non_positive_window() {
        let err = ValidationError::NonPositiveWindow { seconds: -3600 };
        assert!(format!("{err}").contains("-3600s"));
    }

    #[test]
    fn validation_error_window_too_long() {
        let err = ValidationError::WindowTooLong { seconds: i64::MAX, max: 3600 };
        let msg = format!("{err}");
        assert!(msg.contains("at most 3600s"));
        assert!(msg.contains(&i64::MAX.to_string()));
    }

    #[test]
    fn validation_error_invalid_timestamp() {
        let err = ValidationError::InvalidTimestamp {
            value: "yesterday".to_string(),
            reason: "not RFC 3339".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("not RFC 3339"));
    }

    #[test]
    fn validation_error_unknown_label() {
        let err = ValidationError::UnknownSignalLabel("MONEY_MULE".to_string());
        assert!(format!("{err}").contains("MONEY_MULE"));
    }
}
