//! # Fraud Subcommand
//!
//! `kyc fraud --transactions <json> [--report]`
//!
//! Prints `{"signals": [...]}` for a transaction feed. With `--report`,
//! the per-scan measurements are included under `report`. A feed that is
//! not valid JSON yields no signals, the same as the library entry point;
//! a feed file that cannot be read is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};

use kyc_fraud::{
    detect_fraud_signals_json_with, normalize_feed, parse_feed, DetectorConfig, FraudDetector,
};
use kyc_schema::SignalSchema;

use crate::output::{print_json, read_text, ContractCheck};

/// Arguments for `kyc fraud`.
#[derive(Args, Debug)]
pub struct FraudArgs {
    /// Transaction feed as JSON: an array, or an object with a
    /// `transactions` array. `-` reads stdin.
    #[arg(long)]
    pub transactions: PathBuf,

    /// Include per-scan measurements.
    #[arg(long)]
    pub report: bool,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Execute `kyc fraud`.
pub fn run_fraud(args: &FraudArgs, config: Option<&Path>) -> Result<u8> {
    let detector = load_detector(config)?;
    let value = fraud_signals(args, &detector)?;
    ContractCheck::new().check(SignalSchema::FraudSignals, &value);
    print_json(&value, args.compact)?;
    Ok(0)
}

/// Build a detector from an optional YAML config path.
pub fn load_detector(config: Option<&Path>) -> Result<FraudDetector> {
    let config = match config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("failed to load detector config {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    FraudDetector::new(config).context("detector config rejected")
}

/// The signal envelope for `args`.
pub fn fraud_signals(args: &FraudArgs, detector: &FraudDetector) -> Result<Value> {
    let feed = read_text(&args.transactions)?;
    if !args.report {
        let labels = detect_fraud_signals_json_with(detector, &feed);
        return Ok(json!({ "signals": labels }));
    }

    let records = parse_feed(&feed).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "transaction feed unreadable, no signals detected");
        Vec::new()
    });
    let report = detector.scan(&normalize_feed(&records));
    Ok(json!({ "signals": report.labels.clone(), "report": report }))
}
