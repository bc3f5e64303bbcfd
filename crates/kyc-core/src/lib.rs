#![deny(missing_docs)]

//! # kyc-core — Foundational Types for the KYC Signal Engine
//!
//! This crate defines the types shared by the identity pipeline
//! (`kyc-mrz`, `kyc-identity`) and the transaction pipeline (`kyc-fraud`).
//! It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **UTC-only instants.** [`Timestamp`] normalizes every parsed instant
//!    to UTC. Transaction windows are measured on a single timeline.
//!
//! 2. **Calendar dates are not instants.** [`CalendarDate`] carries the
//!    date-of-birth and expiry fields. The two-digit-year century rule used
//!    by MRZ dates lives here and nowhere else.
//!
//! 3. **The wall clock is injected.** Anything that needs "today" receives
//!    it from a [`Clock`]; no component reads the system time on its own.
//!
//! 4. **Single [`SignalLabel`] enum.** The fraud vocabulary is closed.
//!    Adding a label forces every `match` in the workspace to handle it.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod signal;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use signal::SignalLabel;
pub use temporal::{CalendarDate, Clock, FixedClock, SystemClock, Timestamp};
