//! # Pattern Detector
//!
//! Four independent scans over a normalized, time-sorted transaction list:
//!
//! | Label | Rule |
//! |-------|------|
//! | `THRESHOLD_SKIRTING` | in-band cash deposits, total count, no window |
//! | `STRUCTURING_PATTERN` | in-band cash deposits within one structuring window |
//! | `VELOCITY_SPIKE` | transactions of any channel within one velocity window |
//! | `GEO_RISK` | any wire to a high-risk country, no window |
//! | `DEVICE_HOPPING` | distinct devices within one device window |
//!
//! Windowed scans only see transactions with a timestamp. The unwindowed
//! rules count every transaction.

use std::collections::BTreeSet;

use kyc_core::{SignalLabel, Timestamp};
use serde::Serialize;
use serde_json::Value;

use crate::config::{ConfigError, DetectorConfig};
use crate::transaction::{normalize_feed, Transaction};
use crate::window::{max_count_in_window, max_distinct_in_window, Window};

/// Measurements behind one detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Transactions scanned.
    pub transactions: usize,
    /// Transactions excluded from windowed scans for lack of a timestamp.
    pub undated: usize,
    /// In-band cash deposits, all time.
    pub skirting_count: usize,
    /// Most in-band cash deposits inside one structuring window.
    pub structuring_peak: usize,
    /// Most transactions inside one velocity window.
    pub velocity_peak: usize,
    /// Wires to high-risk countries.
    pub geo_risk_hits: usize,
    /// Most distinct devices inside one device window.
    pub device_peak: usize,
    /// Labels raised.
    pub labels: BTreeSet<SignalLabel>,
}

/// Configured pattern detector.
#[derive(Debug, Clone)]
pub struct FraudDetector {
    config: DetectorConfig,
    structuring: Window,
    velocity: Window,
    device: Window,
}

impl Default for FraudDetector {
    fn default() -> Self {
        use crate::config::{DEVICE_WINDOW_HOURS, STRUCTURING_WINDOW_HOURS, VELOCITY_WINDOW_HOURS};
        Self {
            config: DetectorConfig::default(),
            structuring: Window::from_hours_literal(STRUCTURING_WINDOW_HOURS),
            velocity: Window::from_hours_literal(VELOCITY_WINDOW_HOURS),
            device: Window::from_hours_literal(DEVICE_WINDOW_HOURS),
        }
    }
}

impl FraudDetector {
    /// Build a detector from a configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] when the configuration fails validation.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = |field: &'static str, hours: i64| {
            Window::hours(hours).map_err(|e| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            })
        };
        Ok(Self {
            structuring: window("structuring_window_hours", config.structuring_window_hours)?,
            velocity: window("velocity_window_hours", config.velocity_window_hours)?,
            device: window("device_window_hours", config.device_window_hours)?,
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Normalize raw records and return the raised labels.
    pub fn detect(&self, records: &[Value]) -> BTreeSet<SignalLabel> {
        self.scan(&normalize_feed(records)).labels
    }

    /// Run every scan over transactions sorted by [`Transaction::sort_key`].
    pub fn scan(&self, txs: &[Transaction]) -> ScanReport {
        let cfg = &self.config;
        let in_band = |t: &Transaction| {
            t.on_channel(&cfg.cash_channel)
                && t.amount >= cfg.skirting_band_low
                && t.amount < cfg.skirting_band_high
        };

        let dated: Vec<(Timestamp, &Transaction)> =
            txs.iter().filter_map(|t| t.ts.map(|ts| (ts, t))).collect();

        let skirting_count = txs.iter().filter(|&t| in_band(t)).count();

        let structuring_times: Vec<Timestamp> = dated
            .iter()
            .filter(|(_, t)| in_band(*t))
            .map(|(ts, _)| *ts)
            .collect();
        let structuring_peak = max_count_in_window(&structuring_times, self.structuring);

        let all_times: Vec<Timestamp> = dated.iter().map(|(ts, _)| *ts).collect();
        let velocity_peak = max_count_in_window(&all_times, self.velocity);

        let geo_risk_hits = txs
            .iter()
            .filter(|t| t.on_channel(&cfg.wire_channel))
            .filter(|t| t.country.as_deref().is_some_and(|c| cfg.is_high_risk(c)))
            .count();

        let device_events: Vec<(Timestamp, &str)> = dated
            .iter()
            .filter_map(|(ts, t)| {
                t.device
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(|d| (*ts, d))
            })
            .collect();
        let device_peak = max_distinct_in_window(&device_events, self.device);

        let mut labels = BTreeSet::new();
        let mut raise = |label: SignalLabel, hit: bool, count: usize| {
            if hit {
                tracing::debug!(label = %label, count, "fraud signal raised");
                labels.insert(label);
            }
        };
        raise(
            SignalLabel::ThresholdSkirting,
            skirting_count >= cfg.skirting_min_count,
            skirting_count,
        );
        raise(
            SignalLabel::StructuringPattern,
            structuring_peak >= cfg.structuring_min_count,
            structuring_peak,
        );
        raise(
            SignalLabel::VelocitySpike,
            velocity_peak >= cfg.velocity_min_count,
            velocity_peak,
        );
        raise(SignalLabel::GeoRisk, geo_risk_hits > 0, geo_risk_hits);
        raise(
            SignalLabel::DeviceHopping,
            device_peak >= cfg.device_min_distinct,
            device_peak,
        );

        ScanReport {
            transactions: txs.len(),
            undated: txs.len() - dated.len(),
            skirting_count,
            structuring_peak,
            velocity_peak,
            geo_risk_hits,
            device_peak,
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: i64 = 1_767_225_600; // 2026-01-01T00:00:00Z

    fn ts(hours: f64) -> String {
        let secs = BASE + (hours * 3600.0) as i64;
        Timestamp::from_epoch_secs(secs).unwrap().to_iso8601()
    }

    fn cash(hours: f64, amt: f64) -> Value {
        json!({"ts": ts(hours), "amt": amt, "channel": "cash_deposit", "country": "US"})
    }

    fn card(hours: f64, device: &str) -> Value {
        json!({"ts": ts(hours), "amt": 25.0, "channel": "card", "device": device})
    }

    fn detect(records: &[Value]) -> BTreeSet<SignalLabel> {
        FraudDetector::default().detect(records)
    }

    #[test]
    fn default_matches_validated_config() {
        let checked = FraudDetector::new(DetectorConfig::default()).unwrap();
        let default = FraudDetector::default();
        assert_eq!(checked.structuring, default.structuring);
        assert_eq!(checked.velocity, default.velocity);
        assert_eq!(checked.device, default.device);
    }

    #[test]
    fn structuring_within_window() {
        let labels = detect(&[cash(0.0, 9500.0), cash(20.0, 9500.0), cash(40.0, 9500.0)]);
        assert!(labels.contains(&SignalLabel::ThresholdSkirting));
        assert!(labels.contains(&SignalLabel::StructuringPattern));
    }

    #[test]
    fn skirting_without_structuring_when_spread() {
        let labels = detect(&[cash(0.0, 9500.0), cash(100.0, 9500.0), cash(200.0, 9500.0)]);
        assert!(labels.contains(&SignalLabel::ThresholdSkirting));
        assert!(!labels.contains(&SignalLabel::StructuringPattern));
    }

    #[test]
    fn band_is_half_open() {
        let labels = detect(&[cash(0.0, 9000.0), cash(1.0, 9999.99), cash(2.0, 10000.0)]);
        assert!(labels.is_empty(), "{labels:?}");
        let labels = detect(&[cash(0.0, 9000.0), cash(1.0, 9999.99), cash(2.0, 9000.0)]);
        assert!(labels.contains(&SignalLabel::StructuringPattern));
    }

    #[test]
    fn other_channels_do_not_skirt() {
        let wire = |h: f64| json!({"ts": ts(h), "amt": 9500, "channel": "wire_in"});
        assert!(detect(&[wire(0.0), wire(1.0), wire(2.0)]).is_empty());
    }

    #[test]
    fn undated_deposits_count_toward_skirting_only() {
        let undated = json!({"amt": 9500, "channel": "CASH_DEPOSIT"});
        let report = FraudDetector::default().scan(&normalize_feed(&[
            undated.clone(),
            undated.clone(),
            undated,
        ]));
        assert_eq!(report.skirting_count, 3);
        assert_eq!(report.undated, 3);
        assert_eq!(report.structuring_peak, 0);
        assert_eq!(
            report.labels,
            BTreeSet::from([SignalLabel::ThresholdSkirting])
        );
    }

    #[test]
    fn velocity_spike() {
        let dense: Vec<Value> = (0..6u32).map(|i| card(f64::from(i) * 2.0, "d1")).collect();
        assert!(detect(&dense).contains(&SignalLabel::VelocitySpike));

        let sparse: Vec<Value> = (0..6u32).map(|i| card(f64::from(i) * 7.0, "d1")).collect();
        assert!(!detect(&sparse).contains(&SignalLabel::VelocitySpike));
    }

    #[test]
    fn velocity_counts_all_channels() {
        let records = vec![
            card(0.0, "d1"),
            cash(1.0, 50.0),
            json!({"ts": ts(2.0), "channel": "wire_out", "country": "DE"}),
            card(3.0, "d1"),
            json!({"ts": ts(4.0)}),
        ];
        let report = FraudDetector::default().scan(&normalize_feed(&records));
        assert_eq!(report.velocity_peak, 5);
        assert!(report.labels.contains(&SignalLabel::VelocitySpike));
    }

    #[test]
    fn geo_risk_is_case_insensitive() {
        let labels = detect(&[json!({"channel": "Wire_Out", "country": "ir"})]);
        assert_eq!(labels, BTreeSet::from([SignalLabel::GeoRisk]));
        assert!(detect(&[json!({"channel": "cash_deposit", "country": "IR"})]).is_empty());
        assert!(detect(&[json!({"channel": "wire_out", "country": "DE"})]).is_empty());
        assert!(detect(&[json!({"channel": "wire_out"})]).is_empty());
    }

    #[test]
    fn device_hopping() {
        let close = [card(0.0, "a"), card(5.0, "b"), card(10.0, "c")];
        assert!(detect(&close).contains(&SignalLabel::DeviceHopping));

        let apart = [card(0.0, "a"), card(60.0, "b"), card(120.0, "c")];
        assert!(!detect(&apart).contains(&SignalLabel::DeviceHopping));
    }

    #[test]
    fn device_reuse_is_not_hopping() {
        let records: Vec<Value> = (0..10u32).map(|i| card(f64::from(i), "same")).collect();
        let report = FraudDetector::default().scan(&normalize_feed(&records));
        assert_eq!(report.device_peak, 1);
        assert!(!report.labels.contains(&SignalLabel::DeviceHopping));
    }

    #[test]
    fn empty_feed() {
        let report = FraudDetector::default().scan(&[]);
        assert_eq!(report, ScanReport::default());
    }

    #[test]
    fn custom_thresholds() {
        let config = DetectorConfig {
            velocity_min_count: 2,
            velocity_window_hours: 1,
            ..DetectorConfig::default()
        };
        let detector = FraudDetector::new(config).unwrap();
        let labels = detector.detect(&[card(0.0, "a"), card(0.5, "a")]);
        assert!(labels.contains(&SignalLabel::VelocitySpike));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = DetectorConfig {
            velocity_window_hours: -1,
            ..DetectorConfig::default()
        };
        assert!(FraudDetector::new(config).is_err());
    }

    #[test]
    fn saturating_window_config_rejected() {
        let config = DetectorConfig {
            velocity_window_hours: i64::MAX,
            ..DetectorConfig::default()
        };
        let err = FraudDetector::new(config).unwrap_err();
        assert!(err.to_string().contains("velocity_window_hours"));
    }
}
