//! # Output Contract Validation
//!
//! Validates signal records against the bundled JSON Schemas
//! (Draft 2020-12). Schemas are compiled into the binary with
//! `include_str!` and compiled once when [`SignalSchemas`] is built.
//!
//! Validation is advisory at the call sites: the CLI logs violations and
//! still emits the record.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// A bundled output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalSchema {
    /// One identity signal.
    IdentitySignal,
    /// Fraud labels for one feed.
    FraudSignals,
}

impl SignalSchema {
    /// All bundled schemas.
    pub fn all() -> &'static [SignalSchema] {
        &[Self::IdentitySignal, Self::FraudSignals]
    }

    /// Schema file name under `schemas/`.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::IdentitySignal => "identity-signal.schema.json",
            Self::FraudSignals => "fraud-signals.schema.json",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Self::IdentitySignal => include_str!("../schemas/identity-signal.schema.json"),
            Self::FraudSignals => include_str!("../schemas/fraud-signals.schema.json"),
        }
    }
}

impl fmt::Display for SignalSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The record did not conform to the schema.
    #[error("validation failed against schema '{schema}':\n{violations}")]
    ValidationFailed {
        /// Schema validated against.
        schema: SignalSchema,
        /// Individual violations.
        violations: ValidationViolations,
    },

    /// A bundled schema is not valid JSON.
    #[error("schema load error for '{schema}': {reason}")]
    SchemaLoadError {
        /// Schema that failed to load.
        schema: SignalSchema,
        /// Parser message.
        reason: String,
    },

    /// A bundled schema could not be compiled.
    #[error("validator build error for schema '{schema}': {reason}")]
    ValidatorBuildError {
        /// Schema that failed to compile.
        schema: SignalSchema,
        /// Compiler message.
        reason: String,
    },
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Violations from one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether there are none.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations in report order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled validators for every bundled schema.
///
/// `Send + Sync`; build once and share.
pub struct SignalSchemas {
    identity: Validator,
    fraud: Validator,
}

impl fmt::Debug for SignalSchemas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSchemas")
            .field("schemas", &SignalSchema::all())
            .finish()
    }
}

impl SignalSchemas {
    /// Parse and compile the bundled schemas.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::SchemaLoadError`] or
    /// [`SchemaValidationError::ValidatorBuildError`] if a bundled schema is
    /// broken.
    pub fn new() -> Result<Self, SchemaValidationError> {
        Ok(Self {
            identity: compile(SignalSchema::IdentitySignal)?,
            fraud: compile(SignalSchema::FraudSignals)?,
        })
    }

    /// The parsed JSON of a bundled schema.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::SchemaLoadError`] if it is not valid JSON.
    pub fn schema_value(schema: SignalSchema) -> Result<Value, SchemaValidationError> {
        serde_json::from_str(schema.source()).map_err(|e| SchemaValidationError::SchemaLoadError {
            schema,
            reason: format!("invalid JSON: {e}"),
        })
    }

    /// Validate `instance` against `schema`.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::ValidationFailed`] listing every violation.
    pub fn validate(
        &self,
        schema: SignalSchema,
        instance: &Value,
    ) -> Result<(), SchemaValidationError> {
        let validator = match schema {
            SignalSchema::IdentitySignal => &self.identity,
            SignalSchema::FraudSignals => &self.fraud,
        };

        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema,
                violations: ValidationViolations { violations },
            })
        }
    }

    /// Validate an identity signal record.
    ///
    /// # Errors
    ///
    /// See [`SignalSchemas::validate`].
    pub fn validate_identity_signal(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate(SignalSchema::IdentitySignal, instance)
    }

    /// Validate a fraud signal envelope.
    ///
    /// # Errors
    ///
    /// See [`SignalSchemas::validate`].
    pub fn validate_fraud_signals(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate(SignalSchema::FraudSignals, instance)
    }
}

fn compile(schema: SignalSchema) -> Result<Validator, SchemaValidationError> {
    let value = SignalSchemas::schema_value(schema)?;
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(&value)
        .map_err(|e| SchemaValidationError::ValidatorBuildError {
            schema,
            reason: e.to_string(),
        })
}
