//! # Transaction Normalization
//!
//! Converts loosely typed feed records into [`Transaction`]s. Conversion is
//! per-record and never fails: a broken timestamp becomes `None`, a
//! non-numeric amount becomes `0.0`, a missing string field becomes
//! `None`. The record is always retained.
//!
//! Recognized keys: `ts` or `timestamp`, `amt` or `amount`, `country`,
//! `channel`, `device`.

use kyc_core::Timestamp;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One normalized transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Instant of the transaction; `None` when absent or unparsable.
    pub ts: Option<Timestamp>,
    /// Amount; `0.0` when absent or non-numeric.
    pub amount: f64,
    /// Counterparty or destination country code.
    pub country: Option<String>,
    /// Channel name, e.g. `cash_deposit`.
    pub channel: Option<String>,
    /// Device identifier.
    pub device: Option<String>,
}

impl Transaction {
    /// Sort key: undated transactions order as the Unix epoch.
    pub fn sort_key(&self) -> Timestamp {
        self.ts.unwrap_or(Timestamp::EPOCH)
    }

    /// Whether the channel equals `channel`, ignoring ASCII case.
    pub fn on_channel(&self, channel: &str) -> bool {
        self.channel
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(channel))
    }
}

/// Errors for a feed that cannot be read as a list of records.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed text is not JSON.
    #[error("transaction feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed parsed but holds no record list.
    #[error("transaction feed must be an array or an object with a \"transactions\" array, got {0}")]
    NotAList(&'static str),
}

/// Parse feed text into raw records.
///
/// Accepts a top-level array, or an object whose `transactions` member is
/// an array.
///
/// # Errors
///
/// [`FeedError`] when the text is not JSON or holds no record list.
pub fn parse_feed(feed: &str) -> Result<Vec<Value>, FeedError> {
    match serde_json::from_str::<Value>(feed)? {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("transactions") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(FeedError::NotAList("an object without a transactions array")),
        },
        other => Err(FeedError::NotAList(json_kind(&other))),
    }
}

/// Normalize every record and sort ascending by timestamp.
///
/// The sort is stable; undated records sort first.
pub fn normalize_feed(records: &[Value]) -> Vec<Transaction> {
    let mut txs: Vec<Transaction> = records.iter().map(normalize_record).collect();
    txs.sort_by_key(Transaction::sort_key);

    let undated = txs.iter().filter(|t| t.ts.is_none()).count();
    if undated > 0 {
        tracing::debug!(records = txs.len(), undated, "transactions without a usable timestamp");
    }
    txs
}

/// Normalize one record. Non-object records yield an all-default transaction.
pub fn normalize_record(record: &Value) -> Transaction {
    let field = |names: &[&str]| names.iter().find_map(|n| record.get(n));

    let ts = field(&["ts", "timestamp"]).and_then(|v| match v {
        Value::String(s) => match Timestamp::parse(s) {
            Ok(ts) => Some(ts),
            Err(err) => {
                tracing::trace!(error = %err, "unparsable transaction timestamp");
                None
            }
        },
        _ => None,
    });

    Transaction {
        ts,
        amount: field(&["amt", "amount"]).map_or(0.0, amount_of),
        country: field(&["country"]).and_then(string_of),
        channel: field(&["channel"]).and_then(string_of),
        device: field(&["device"]).and_then(string_of),
    }
}

fn amount_of(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|a| a.is_finite()).unwrap_or(0.0)
}

fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
