//! # Visual Fields
//!
//! The sparse field map produced by the upstream document-analysis step.
//! Field names follow the analyzer's identity-document model
//! (`FullName`, `DateOfBirth`, `MachineReadableZone`, ...). The engine
//! reads this structure and never mutates it.

use std::collections::BTreeMap;

use kyc_core::CalendarDate;
use serde::{Deserialize, Serialize};

/// Well-known field names.
pub mod keys {
    /// Full name as printed.
    pub const FULL_NAME: &str = "FullName";
    /// Alternate full-name key.
    pub const NAME: &str = "Name";
    /// First name.
    pub const FIRST_NAME: &str = "FirstName";
    /// Last name.
    pub const LAST_NAME: &str = "LastName";
    /// Given name (singular).
    pub const GIVEN_NAME: &str = "GivenName";
    /// Given names (plural).
    pub const GIVEN_NAMES: &str = "GivenNames";
    /// Surname.
    pub const SURNAME: &str = "Surname";
    /// Document number.
    pub const DOCUMENT_NUMBER: &str = "DocumentNumber";
    /// Date of birth.
    pub const DATE_OF_BIRTH: &str = "DateOfBirth";
    /// Alternate date-of-birth key.
    pub const BIRTH_DATE: &str = "BirthDate";
    /// Date of expiry.
    pub const DATE_OF_EXPIRATION: &str = "DateOfExpiration";
    /// Issuing country or region.
    pub const COUNTRY_REGION: &str = "CountryRegion";
    /// Nationality.
    pub const NATIONALITY: &str = "Nationality";
    /// Raw MRZ text block.
    pub const MACHINE_READABLE_ZONE: &str = "MachineReadableZone";
}

/// One extracted field.
///
/// Analyzers populate different members depending on the field type; the
/// accessors on [`VisualFields`] decide which one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualField {
    /// Text exactly as it appears on the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Normalized string value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    /// Normalized date value, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    /// Per-field extraction confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Extracted fields for one analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualFields {
    /// Reference to the source document (URL, storage key).
    #[serde(default)]
    pub document_ref: Option<String>,
    /// Whether the analyzer found a document at all.
    #[serde(default = "default_true")]
    pub document_found: bool,
    /// Document-level confidence reported by the analyzer.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Full page text, used for quality hints.
    #[serde(default)]
    pub content: Option<String>,
    /// Extracted fields by name.
    #[serde(default)]
    pub fields: BTreeMap<String, VisualField>,
}

fn default_true() -> bool {
    true
}

impl Default for VisualFields {
    fn default() -> Self {
        Self {
            document_ref: None,
            document_found: true,
            confidence: None,
            content: None,
            fields: BTreeMap::new(),
        }
    }
}

impl VisualFields {
    /// An empty field set for a document that was found.
    pub fn new() -> Self {
        Self::default()
    }

    /// The result of an analysis that found no document.
    pub fn no_document(document_ref: Option<String>) -> Self {
        Self {
            document_ref,
            document_found: false,
            ..Self::default()
        }
    }

    /// Set a text field.
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(
            key.to_string(),
            VisualField {
                content: Some(value.to_string()),
                ..VisualField::default()
            },
        );
        self
    }

    /// Set a date field from a `YYYY-MM-DD` string.
    pub fn with_date(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(
            key.to_string(),
            VisualField {
                value_date: Some(value.to_string()),
                ..VisualField::default()
            },
        );
        self
    }

    /// Set the document-level confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Set the full page text.
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Set the source document reference.
    pub fn with_document_ref(mut self, document_ref: &str) -> Self {
        self.document_ref = Some(document_ref.to_string());
        self
    }

    /// Text of a field: `content` when non-blank, else `value_string` when
    /// non-blank. Blank or missing fields read as `None`.
    pub fn text(&self, key: &str) -> Option<&str> {
        let field = self.fields.get(key)?;
        [field.content.as_deref(), field.value_string.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }

    /// Raw date text of a field: `value_date`, else `value_string`, else
    /// `content`, first non-blank. Not yet validated.
    pub fn date_text(&self, key: &str) -> Option<&str> {
        let field = self.fields.get(key)?;
        [
            field.value_date.as_deref(),
            field.value_string.as_deref(),
            field.content.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
    }

    /// A date field parsed as strict `YYYY-MM-DD`. Other shapes read as `None`.
    pub fn date(&self, key: &str) -> Option<CalendarDate> {
        self.date_text(key)
            .and_then(|raw| CalendarDate::parse_iso(raw).ok())
    }

    /// The MRZ text block, if the analyzer extracted one.
    pub fn mrz_text(&self) -> Option<&str> {
        self.text(keys::MACHINE_READABLE_ZONE)
    }
}
