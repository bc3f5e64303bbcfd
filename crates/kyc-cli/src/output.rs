//! # Input and Output Helpers
//!
//! File reading with path context, JSON emission on stdout, and the
//! advisory schema check applied to every emitted record.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use kyc_schema::{SignalSchema, SignalSchemas};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Read a text file, or stdin when `path` is `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read and parse a JSON file, or stdin when `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Print one JSON document on stdout.
pub fn print_json(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{rendered}").context("failed to write to stdout")?;
    Ok(())
}

/// Advisory schema check for emitted records. The validators are
/// compiled once when the command starts and reused for every record it
/// prints.
pub struct ContractCheck {
    schemas: Option<SignalSchemas>,
}

impl ContractCheck {
    /// Compile the bundled schemas. A compilation failure is logged and
    /// every later check is skipped.
    pub fn new() -> Self {
        let schemas = match SignalSchemas::new() {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(error = %e, "output schemas unavailable, skipping contract checks");
                None
            }
        };
        Self { schemas }
    }

    /// Validate `value` against `schema`, logging a warning on violation.
    /// Never fails the command.
    pub fn check(&self, schema: SignalSchema, value: &Value) -> bool {
        let Some(schemas) = &self.schemas else {
            return false;
        };
        match schemas.validate(schema, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(schema = %schema, error = %e, "output does not match its schema");
                false
            }
        }
    }
}

impl Default for ContractCheck {
    fn default() -> Self {
        Self::new()
    }
}
