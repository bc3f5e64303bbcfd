//! # Fraud Signal Vocabulary
//!
//! The closed set of labels the transaction pattern detector can raise.
//! Labels serialize as their SCREAMING_SNAKE_CASE names, which is the form
//! the downstream risk scorer consumes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named fraud heuristic that fired for a transaction feed.
///
/// `Ord` follows declaration order so that a `BTreeSet<SignalLabel>`
/// serializes deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    /// Three or more near-threshold cash deposits anywhere in the feed.
    ThresholdSkirting,
    /// Unusually many transactions of any channel inside one window.
    VelocitySpike,
    /// Near-threshold cash deposits clustered inside one window.
    StructuringPattern,
    /// Outbound wire to a high-risk jurisdiction.
    GeoRisk,
    /// Many distinct devices active inside one window.
    DeviceHopping,
}

impl SignalLabel {
    /// Return all labels in declaration order.
    pub fn all() -> &'static [SignalLabel] {
        &[
            Self::ThresholdSkirting,
            Self::VelocitySpike,
            Self::StructuringPattern,
            Self::GeoRisk,
            Self::DeviceHopping,
        ]
    }

    /// The wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThresholdSkirting => "THRESHOLD_SKIRTING",
            Self::VelocitySpike => "VELOCITY_SPIKE",
            Self::StructuringPattern => "STRUCTURING_PATTERN",
            Self::GeoRisk => "GEO_RISK",
            Self::DeviceHopping => "DEVICE_HOPPING",
        }
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignalLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownSignalLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn serde_matches_as_str() {
        for label in SignalLabel::all() {
            let json = serde_json::to_string(label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
    }

    #[test]
    fn from_str_round_trips_every_label() {
        for label in SignalLabel::all() {
            assert_eq!(label.as_str().parse::<SignalLabel>().unwrap(), *label);
        }
        assert!("velocity_spike".parse::<SignalLabel>().is_err());
    }

    #[test]
    fn set_serializes_in_declaration_order() {
        let set: BTreeSet<SignalLabel> = [SignalLabel::DeviceHopping, SignalLabel::ThresholdSkirting]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["THRESHOLD_SKIRTING","DEVICE_HOPPING"]"#);
    }
}
