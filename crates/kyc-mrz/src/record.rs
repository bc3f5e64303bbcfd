//! # Decoded MRZ Record
//!
//! [`MrzRecord`] is produced once per MRZ input and never mutated. Derived
//! fields are `None` whenever the input was absent or too short to decode.

use kyc_core::CalendarDate;
use serde::Serialize;

/// Holder sex as encoded in the MRZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// `M`.
    Male,
    /// `F`.
    Female,
    /// `<`, or any character outside the MRZ sex alphabet.
    Unspecified,
}

impl Sex {
    /// Decode the MRZ sex character.
    pub fn from_mrz(c: char) -> Self {
        match c {
            'M' => Self::Male,
            'F' => Self::Female,
            _ => Self::Unspecified,
        }
    }

    /// The MRZ character for this value.
    pub fn code(&self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Unspecified => '<',
        }
    }
}

/// Name decoded from MRZ line 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzName {
    /// Primary identifier (surname), fillers replaced by spaces.
    pub surname: String,
    /// Secondary identifier (given names), fillers replaced by spaces.
    pub given_names: String,
}

impl MrzName {
    /// `"<given names> <surname>"`, collapsed. `None` when both are empty.
    pub fn full_name(&self) -> Option<String> {
        let joined = format!("{} {}", self.given_names, self.surname);
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }
}

/// Outcome of the four independent check-digit validations.
///
/// Kept separate so a caller debugging a rejection can see which field
/// failed; downstream policy only looks at [`MrzCheckReport::all_valid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzCheckReport {
    /// Document number check digit.
    pub document_number: bool,
    /// Birth date check digit.
    pub birth_date: bool,
    /// Expiry date check digit.
    pub expiry_date: bool,
    /// Composite check digit over line 2.
    pub composite: bool,
}

impl MrzCheckReport {
    /// Report for input that could not be decoded at all.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Conjunction of all four checks.
    pub fn all_valid(&self) -> bool {
        self.document_number && self.birth_date && self.expiry_date && self.composite
    }

    /// Names of the checks that did not pass, in layout order.
    pub fn failures(&self) -> Vec<&'static str> {
        [
            (self.document_number, "document_number"),
            (self.birth_date, "birth_date"),
            (self.expiry_date, "expiry_date"),
            (self.composite, "composite"),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, name)| name)
        .collect()
    }
}

/// A decoded TD3 machine-readable zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzRecord {
    /// Whether any MRZ text was supplied. A record can be present and still
    /// undecodable (one line, truncated line 2).
    pub present: bool,
    /// Document number with filler removed.
    pub document_number: Option<String>,
    /// Issuing state code from line 1.
    pub issuing_state: Option<String>,
    /// Nationality code from line 2.
    pub nationality: Option<String>,
    /// Date of birth.
    pub birth_date: Option<CalendarDate>,
    /// Holder sex.
    pub sex: Option<Sex>,
    /// Date of expiry.
    pub expiry_date: Option<CalendarDate>,
    /// Optional data / personal number with filler removed.
    pub personal_number: Option<String>,
    /// Holder name.
    pub name: Option<MrzName>,
    /// Check-digit outcomes.
    pub checks: MrzCheckReport,
}

impl MrzRecord {
    /// Record for an input that contained no MRZ text.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::undecodable()
        }
    }

    /// Record for MRZ text that was supplied but could not be decoded.
    pub fn undecodable() -> Self {
        Self {
            present: true,
            document_number: None,
            issuing_state: None,
            nationality: None,
            birth_date: None,
            sex: None,
            expiry_date: None,
            personal_number: None,
            name: None,
            checks: MrzCheckReport::failed(),
        }
    }

    /// Whether all four check digits verified.
    pub fn checks_valid(&self) -> bool {
        self.checks.all_valid()
    }

    /// `"<given names> <surname>"` when a name was decoded.
    pub fn full_name(&self) -> Option<String> {
        self.name.as_ref().and_then(MrzName::full_name)
    }
}
