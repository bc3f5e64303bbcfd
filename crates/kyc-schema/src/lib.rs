//! # kyc-schema — Output Contracts
//!
//! JSON Schemas for the records the engine hands to downstream
//! decisioning, and a validator for them.
//!
//! - `identity-signal.schema.json`: one identity signal.
//! - `fraud-signals.schema.json`: the fraud label envelope
//!   `{"signals": [...], "report": {...}}`.
//!
//! ## Crate Policy
//!
//! - No internal dependencies outside tests.
//! - Schemas are bundled at compile time; there is no filesystem or
//!   network lookup at runtime.
//! - Field names in the schemas must track the serde names of the Rust
//!   types; the tests validate real serialized records.

pub mod validate;

pub use validate::{
    SchemaValidationError, SignalSchema, SignalSchemas, ValidationViolations, Violation,
};
