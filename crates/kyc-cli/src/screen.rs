//! # Screen Subcommand
//!
//! `kyc screen --request <json>`
//!
//! Runs both pipelines for one KYC start request and prints
//! `{"docSignals": ..., "fraudSignals": [...], "identityUsed": {...}}`.
//! The identity used for downstream screening is the document's name and
//! date of birth when the document was parsed, else the ones the request
//! supplied. An `mrz` sent without a `document` is still decoded, against
//! an empty visual extraction.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use kyc_core::{CalendarDate, Clock, SignalLabel, SystemClock};
use kyc_fraud::FraudDetector;
use kyc_identity::{extract_identity_signal_from_block, IdentitySignal, VisualFields};
use kyc_schema::SignalSchema;

use crate::fraud::load_detector;
use crate::identity::signal_for_mrz_text;
use crate::output::{print_json, read_json, ContractCheck};

/// Arguments for `kyc screen`.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// KYC start request as JSON. `-` reads stdin.
    #[arg(long)]
    pub request: PathBuf,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// A KYC start request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    /// Applicant name as entered.
    #[serde(default)]
    pub name: Option<String>,
    /// Applicant date of birth as entered.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Visual field extraction of the identity document.
    #[serde(default)]
    pub document: Option<VisualFields>,
    /// MRZ text block; overrides the document's `MachineReadableZone`.
    #[serde(default)]
    pub mrz: Option<String>,
    /// Raw transaction records.
    #[serde(default)]
    pub transactions: Vec<Value>,
    /// Evaluation date for expiry. Defaults to today, UTC.
    #[serde(default)]
    pub today: Option<CalendarDate>,
}

/// Where the screened identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentitySource {
    /// The parsed document.
    Document,
    /// The request body.
    Request,
}

/// Name and date of birth handed to downstream screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityUsed {
    /// Name.
    pub name: Option<String>,
    /// Date of birth, `YYYY-MM-DD` when taken from the document.
    pub dob: Option<String>,
    /// Which input supplied them.
    pub source: IdentitySource,
}

/// Combined result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResponse {
    /// Identity signal for the document.
    pub doc_signals: IdentitySignal,
    /// Fraud labels for the transactions.
    pub fraud_signals: BTreeSet<SignalLabel>,
    /// Identity chosen for screening.
    pub identity_used: IdentityUsed,
}

/// Execute `kyc screen`.
pub fn run_screen(args: &ScreenArgs, config: Option<&Path>) -> Result<u8> {
    let detector = load_detector(config)?;
    let raw = read_json(&args.request)?;
    let request: ScreenRequest = serde_json::from_value(raw)
        .with_context(|| format!("{} is not a KYC start request", args.request.display()))?;

    let response = screen(&request, &detector, &SystemClock);
    let value = serde_json::to_value(&response)?;
    let contract = ContractCheck::new();
    contract.check(SignalSchema::IdentitySignal, &value["docSignals"]);
    contract.check(
        SignalSchema::FraudSignals,
        &json!({ "signals": value["fraudSignals"] }),
    );
    print_json(&value, args.compact)?;
    Ok(0)
}

/// Run both pipelines for `request`.
pub fn screen(request: &ScreenRequest, detector: &FraudDetector, clock: &dyn Clock) -> ScreenResponse {
    let today = request.today.unwrap_or_else(|| clock.today());
    let visual = match (&request.document, &request.mrz) {
        (Some(document), _) => document.clone(),
        (None, Some(_)) => VisualFields::new(),
        (None, None) => VisualFields::no_document(None),
    };

    let doc_signals = match request.mrz.as_deref() {
        Some(text) => signal_for_mrz_text(&visual, text, today),
        None => extract_identity_signal_from_block(&visual, today),
    };
    let fraud_signals = detector.detect(&request.transactions);
    let identity_used = pick_identity(&doc_signals, request);

    tracing::info!(
        document_ok = doc_signals.ok,
        reasons = doc_signals.reasons.len(),
        fraud_signals = fraud_signals.len(),
        source = ?identity_used.source,
        "screened KYC request"
    );

    ScreenResponse {
        doc_signals,
        fraud_signals,
        identity_used,
    }
}

/// Prefer document values field by field; fall back to the request.
fn pick_identity(signal: &IdentitySignal, request: &ScreenRequest) -> IdentityUsed {
    let doc_name = signal.id_info.full_name.clone();
    let doc_dob = signal.id_info.dob.map(|d| d.to_iso_string());
    let source = if signal.ok && (doc_name.is_some() || doc_dob.is_some()) {
        IdentitySource::Document
    } else {
        IdentitySource::Request
    };
    IdentityUsed {
        name: doc_name.or_else(|| request.name.clone()),
        dob: doc_dob.or_else(|| request.birth_date.clone()),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc_core::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::at_date(CalendarDate::from_ymd(2026, 10, 16).unwrap())
    }

    fn request(json: Value) -> ScreenRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn full_request() {
        let req = request(json!({
            "name": "A. Eriksson",
            "birthDate": "1969-08-06",
            "document": {
                "documentRef": "blob://kyc/p-1.jpg",
                "confidence": 0.88,
                "fields": {"FullName": {"content": "Anna Maria Eriksson"}}
            },
            "mrz": "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\nL898902C<3<UTO6908061F9406236ZE184226B<<<<0<",
            "transactions": [
                {"ts": "2026-10-01T00:00:00Z", "channel": "wire_out", "country": "SY", "amt": 4000}
            ],
            "today": "1993-01-01"
        }));
        let resp = screen(&req, &FraudDetector::default(), &clock());
        assert!(resp.doc_signals.ok);
        assert!(resp.doc_signals.mrz_valid);
        assert!(!resp.doc_signals.expired);
        assert_eq!(resp.fraud_signals, BTreeSet::from([SignalLabel::GeoRisk]));
        assert_eq!(resp.identity_used.source, IdentitySource::Document);
        assert_eq!(resp.identity_used.name.as_deref(), Some("Anna Maria Eriksson"));
        assert_eq!(resp.identity_used.dob.as_deref(), Some("1969-08-06"));

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["docSignals"]["documentRef"], "blob://kyc/p-1.jpg");
        assert_eq!(value["fraudSignals"], json!(["GEO_RISK"]));
        assert_eq!(value["identityUsed"]["source"], "document");
    }

    #[test]
    fn no_document_falls_back_to_request() {
        let req = request(json!({"name": "Jan Novak", "birthDate": "1980-02-29"}));
        let resp = screen(&req, &FraudDetector::default(), &clock());
        assert!(!resp.doc_signals.ok);
        assert!(resp.fraud_signals.is_empty());
        assert_eq!(
            resp.identity_used,
            IdentityUsed {
                name: Some("Jan Novak".to_string()),
                dob: Some("1980-02-29".to_string()),
                source: IdentitySource::Request,
            }
        );
    }

    #[test]
    fn mrz_without_document_is_decoded() {
        let req = request(json!({
            "name": "Someone Else",
            "mrz": "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\nL898902C<3<UTO6908061F9406236ZE184226B<<<<0<",
            "today": "1993-01-01"
        }));
        let resp = screen(&req, &FraudDetector::default(), &clock());
        assert!(resp.doc_signals.ok);
        assert!(resp.doc_signals.mrz_valid);
        assert!(!resp.doc_signals.identity_mismatch);
        assert_eq!(resp.identity_used.source, IdentitySource::Document);
        assert_eq!(resp.identity_used.name.as_deref(), Some("ANNA MARIA ERIKSSON"));
        assert_eq!(resp.identity_used.dob.as_deref(), Some("1969-08-06"));
    }

    #[test]
    fn empty_request() {
        let resp = screen(&ScreenRequest::default(), &FraudDetector::default(), &clock());
        assert!(!resp.doc_signals.ok);
        assert_eq!(resp.identity_used.name, None);
    }
}
