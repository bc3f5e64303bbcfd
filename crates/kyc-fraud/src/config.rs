//! # Detector Configuration
//!
//! Thresholds, windows and channel names for the pattern scans. Every
//! field has a default, so an empty YAML document yields the standard
//! rule set:
//!
//! ```yaml
//! cash_channel: cash_deposit
//! wire_channel: wire_out
//! skirting_band_low: 9000
//! skirting_band_high: 10000
//! skirting_min_count: 3
//! structuring_window_hours: 72
//! structuring_min_count: 3
//! velocity_window_hours: 24
//! velocity_min_count: 5
//! device_window_hours: 48
//! device_min_distinct: 3
//! high_risk_countries: [AF, BY, IR, KP, RU, SY, YE]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::Window;

/// Default cash-deposit channel name.
pub const DEFAULT_CASH_CHANNEL: &str = "cash_deposit";
/// Default outbound-wire channel name.
pub const DEFAULT_WIRE_CHANNEL: &str = "wire_out";
/// Default high-risk destinations (ISO 3166-1 alpha-2).
pub const DEFAULT_HIGH_RISK_COUNTRIES: [&str; 7] = ["IR", "KP", "SY", "RU", "BY", "AF", "YE"];

/// Default structuring window.
pub const STRUCTURING_WINDOW_HOURS: i64 = 72;
/// Default velocity window.
pub const VELOCITY_WINDOW_HOURS: i64 = 24;
/// Default device-hopping window.
pub const DEVICE_WINDOW_HOURS: i64 = 48;

/// Errors raised while loading or validating a [`DetectorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {reason}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// The configuration text is not valid YAML for this schema.
    #[error("invalid config YAML: {0}")]
    Parse(String),

    /// A field holds a value the detector cannot use.
    #[error("invalid config field {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Pattern detector thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Channel whose deposits are checked for threshold skirting.
    pub cash_channel: String,
    /// Channel checked against high-risk destinations.
    pub wire_channel: String,
    /// Inclusive lower bound of the skirting amount band.
    pub skirting_band_low: f64,
    /// Exclusive upper bound of the skirting amount band.
    pub skirting_band_high: f64,
    /// Total in-band cash deposits that raise `THRESHOLD_SKIRTING`.
    pub skirting_min_count: usize,
    /// Window for `STRUCTURING_PATTERN`.
    pub structuring_window_hours: i64,
    /// In-band cash deposits within one window that raise `STRUCTURING_PATTERN`.
    pub structuring_min_count: usize,
    /// Window for `VELOCITY_SPIKE`.
    pub velocity_window_hours: i64,
    /// Transactions within one window that raise `VELOCITY_SPIKE`.
    pub velocity_min_count: usize,
    /// Window for `DEVICE_HOPPING`.
    pub device_window_hours: i64,
    /// Distinct devices within one window that raise `DEVICE_HOPPING`.
    pub device_min_distinct: usize,
    /// High-risk wire destinations, compared case-insensitively.
    pub high_risk_countries: BTreeSet<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cash_channel: DEFAULT_CASH_CHANNEL.to_string(),
            wire_channel: DEFAULT_WIRE_CHANNEL.to_string(),
            skirting_band_low: 9_000.0,
            skirting_band_high: 10_000.0,
            skirting_min_count: 3,
            structuring_window_hours: STRUCTURING_WINDOW_HOURS,
            structuring_min_count: 3,
            velocity_window_hours: VELOCITY_WINDOW_HOURS,
            velocity_min_count: 5,
            device_window_hours: DEVICE_WINDOW_HOURS,
            device_min_distinct: 3,
            high_risk_countries: DEFAULT_HIGH_RISK_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl DetectorConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed YAML or unknown keys,
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] when the file cannot be read, plus the
    /// errors of [`DetectorConfig::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded detector config");
        Ok(config)
    }

    /// Check that every threshold is usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| ConfigError::Invalid { field, reason };

        if self.cash_channel.trim().is_empty() {
            return Err(invalid("cash_channel", "must not be blank".to_string()));
        }
        if self.wire_channel.trim().is_empty() {
            return Err(invalid("wire_channel", "must not be blank".to_string()));
        }
        if !self.skirting_band_low.is_finite() || !self.skirting_band_high.is_finite() {
            return Err(invalid("skirting_band_low", "band bounds must be finite".to_string()));
        }
        if self.skirting_band_low >= self.skirting_band_high {
            return Err(invalid(
                "skirting_band_high",
                format!(
                    "must exceed skirting_band_low ({} >= {})",
                    self.skirting_band_low, self.skirting_band_high
                ),
            ));
        }
        for (field, hours) in [
            ("structuring_window_hours", self.structuring_window_hours),
            ("velocity_window_hours", self.velocity_window_hours),
            ("device_window_hours", self.device_window_hours),
        ] {
            if let Err(e) = Window::hours(hours) {
                return Err(invalid(field, e.to_string()));
            }
        }
        for (field, count) in [
            ("skirting_min_count", self.skirting_min_count),
            ("structuring_min_count", self.structuring_min_count),
            ("velocity_min_count", self.velocity_min_count),
            ("device_min_distinct", self.device_min_distinct),
        ] {
            if count == 0 {
                return Err(invalid(field, "must be at least 1".to_string()));
            }
        }
        Ok(())
    }

    /// Whether `country` is in the high-risk set, ignoring case and
    /// surrounding whitespace.
    pub fn is_high_risk(&self, country: &str) -> bool {
        let country = country.trim();
        self.high_risk_countries
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(country))
    }
}
