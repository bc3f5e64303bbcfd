#![deny(missing_docs)]

//! # kyc-fraud — Transaction Pattern Detection
//!
//! Normalizes a loosely typed transaction feed and scans it for five
//! fraud patterns (see [`detector`]).
//!
//! ## Pipeline
//!
//! ```text
//! feed JSON ──parse_feed──▶ records ──normalize_feed──▶ sorted Transactions
//!                                                            │
//!                                        FraudDetector::scan ▼
//!                                              ScanReport { labels, .. }
//! ```
//!
//! ## Failure Policy
//!
//! Detection never fails. A malformed record degrades field by field; a
//! feed that cannot be parsed at all yields an empty label set and a
//! `warn` event. Only configuration loading returns errors.

pub mod config;
pub mod detector;
pub mod transaction;
pub mod window;

pub use config::{ConfigError, DetectorConfig};
pub use detector::{FraudDetector, ScanReport};
pub use transaction::{normalize_feed, normalize_record, parse_feed, FeedError, Transaction};
pub use window::{max_count_in_window, max_distinct_in_window, Window, MAX_WINDOW_SECONDS};

use std::collections::BTreeSet;

use kyc_core::SignalLabel;
use serde_json::Value;

/// Detect fraud patterns in raw records using the default rule set.
pub fn detect_fraud_signals(records: &[Value]) -> BTreeSet<SignalLabel> {
    FraudDetector::default().detect(records)
}

/// Detect fraud patterns in feed text using the default rule set.
///
/// Text that is not a JSON record list yields an empty set.
pub fn detect_fraud_signals_json(feed: &str) -> BTreeSet<SignalLabel> {
    detect_fraud_signals_json_with(&FraudDetector::default(), feed)
}

/// Like [`detect_fraud_signals_json`], with a configured detector.
pub fn detect_fraud_signals_json_with(
    detector: &FraudDetector,
    feed: &str,
) -> BTreeSet<SignalLabel> {
    match parse_feed(feed) {
        Ok(records) => detector.detect(&records),
        Err(err) => {
            tracing::warn!(error = %err, "transaction feed unreadable, no signals detected");
            BTreeSet::new()
        }
    }
}
