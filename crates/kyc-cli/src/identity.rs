//! # Identity Subcommand
//!
//! `kyc identity --fields <json> [--mrz <file> | --line1 <l1> --line2 <l2>]`
//!
//! Reads a visual field extraction, decodes the MRZ from whichever source
//! was given (file, explicit lines, or the extraction's own
//! `MachineReadableZone` field) and prints the identity signal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kyc_core::{CalendarDate, Clock, SystemClock};
use kyc_identity::{
    extract_identity_signal, extract_identity_signal_from_block, IdentitySignal, VisualFields,
};
use kyc_schema::SignalSchema;

use crate::output::{print_json, read_json, read_text, ContractCheck};

/// Arguments for `kyc identity`.
#[derive(Args, Debug)]
pub struct IdentityArgs {
    /// Visual field extraction as JSON. `-` reads stdin.
    #[arg(long)]
    pub fields: PathBuf,

    /// Text file holding the two MRZ lines.
    #[arg(long, conflicts_with_all = ["line1", "line2"])]
    pub mrz: Option<PathBuf>,

    /// First MRZ line.
    #[arg(long, requires = "line2")]
    pub line1: Option<String>,

    /// Second MRZ line.
    #[arg(long, requires = "line1")]
    pub line2: Option<String>,

    /// Evaluate expiry as of this date (YYYY-MM-DD). Defaults to today, UTC.
    #[arg(long)]
    pub today: Option<CalendarDate>,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Execute `kyc identity`.
pub fn run_identity(args: &IdentityArgs) -> Result<u8> {
    let signal = identity_signal(args, &SystemClock)?;
    let value = serde_json::to_value(&signal)?;
    ContractCheck::new().check(SignalSchema::IdentitySignal, &value);
    print_json(&value, args.compact)?;
    Ok(0)
}

/// Build the identity signal for `args`, taking "today" from `clock`
/// unless `--today` was given.
pub fn identity_signal(args: &IdentityArgs, clock: &dyn Clock) -> Result<IdentitySignal> {
    let fields = read_json(&args.fields)?;
    let visual: VisualFields = serde_json::from_value(fields)
        .with_context(|| format!("{} is not a visual field extraction", args.fields.display()))?;
    let today = args.today.unwrap_or_else(|| clock.today());

    let signal = match (&args.mrz, &args.line1, &args.line2) {
        (Some(path), _, _) => signal_for_mrz_text(&visual, &read_text(path)?, today),
        (None, Some(l1), Some(l2)) => {
            extract_identity_signal(&visual, Some(l1.as_str()), Some(l2.as_str()), today)
        }
        _ => extract_identity_signal_from_block(&visual, today),
    };
    Ok(signal)
}

/// Identity signal for an MRZ given as one text block. A block without
/// two lines is passed through as line 1 so it reports as present but
/// undecodable.
pub fn signal_for_mrz_text(visual: &VisualFields, text: &str, today: CalendarDate) -> IdentitySignal {
    match kyc_mrz::split_mrz_block(text) {
        Some((l1, l2)) => extract_identity_signal(visual, Some(l1.as_str()), Some(l2.as_str()), today),
        None => extract_identity_signal(visual, Some(text.trim()), None, today),
    }
}
