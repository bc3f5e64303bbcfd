//! # kyc-cli — Command-Line Front End
//!
//! Provides the `kyc` command. Every subcommand prints exactly one JSON
//! document on stdout; logs go to stderr.
//!
//! ## Subcommands
//!
//! - `kyc identity`: identity signal for one document.
//! - `kyc fraud`: fraud labels for one transaction feed.
//! - `kyc screen`: both, for a combined KYC start request.
//!
//! ```bash
//! kyc identity --fields passport.json --mrz passport.mrz
//! kyc --config rules.yaml fraud --transactions feed.json --report
//! kyc -vv screen --request start.json
//! ```

pub mod fraud;
pub mod identity;
pub mod output;
pub mod screen;
