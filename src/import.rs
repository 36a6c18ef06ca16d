//! Import parsing and merge rules for JSON and CSV files.
//!
//! Parsing is deliberately lenient per record: a field that is absent,
//! wrong-typed, or unparsable is treated as missing and the record is
//! screened out during merge, rather than one bad row failing the file.
//! File-level problems (unsupported extension, unparsable JSON, nothing
//! usable) abort the whole import.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::csv;
use crate::currency::Currency;
use crate::errors::{Result, TrackerError};
use crate::ledger::transaction::{ImportedRecord, Transaction, TransactionKind};

/// Supported import file formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Result<ImportFormat> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(ImportFormat::Json),
            Some("csv") => Ok(ImportFormat::Csv),
            _ => Err(TrackerError::ImportFormat(
                "Unsupported file format".to_string(),
            )),
        }
    }
}

/// Parses import file content into records. Fails when the payload is
/// structurally unusable or yields not a single complete record.
pub fn parse_records(format: ImportFormat, content: &str) -> Result<Vec<ImportedRecord>> {
    let records = match format {
        ImportFormat::Json => parse_json(content)?,
        ImportFormat::Csv => csv::decode(content),
    };
    if !records.iter().any(ImportedRecord::is_complete) {
        return Err(TrackerError::ImportFormat(
            "No valid transactions found".to_string(),
        ));
    }
    Ok(records)
}

/// Outcome of merging imported records into an existing list.
#[derive(Debug)]
pub struct MergeOutcome {
    pub merged: Vec<Transaction>,
    pub accepted: usize,
}

/// Appends usable `incoming` records after `existing`: incomplete records
/// are discarded, as is any record whose id is already taken (by an
/// existing transaction or an earlier record in the same batch).
pub fn merge(
    existing: &[Transaction],
    incoming: Vec<ImportedRecord>,
    fallback_currency: Currency,
) -> MergeOutcome {
    let mut seen: HashSet<String> = existing.iter().map(|t| t.id.clone()).collect();
    let mut merged = existing.to_vec();
    let mut accepted = 0;
    for record in incoming {
        let transaction = match record.into_transaction(fallback_currency) {
            Some(transaction) => transaction,
            None => continue,
        };
        if !seen.insert(transaction.id.clone()) {
            continue;
        }
        merged.push(transaction);
        accepted += 1;
    }
    MergeOutcome { merged, accepted }
}

fn parse_json(content: &str) -> Result<Vec<ImportedRecord>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|err| TrackerError::ImportFormat(format!("Invalid file format: {err}")))?;
    let items = value
        .as_array()
        .ok_or_else(|| TrackerError::ImportFormat("Invalid file format".to_string()))?;
    Ok(items.iter().map(record_from_value).collect())
}

fn record_from_value(value: &Value) -> ImportedRecord {
    ImportedRecord {
        id: value.get("id").and_then(Value::as_str).and_then(non_empty),
        kind: value
            .get("type")
            .and_then(Value::as_str)
            .and_then(TransactionKind::parse),
        amount: value.get("amount").and_then(Value::as_f64),
        date: value
            .get("date")
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
        description: value
            .get("description")
            .and_then(Value::as_str)
            .and_then(non_empty),
        category: value
            .get("category")
            .and_then(Value::as_str)
            .and_then(non_empty),
        currency: value
            .get("currency")
            .and_then(Value::as_str)
            .and_then(Currency::parse),
        created_at: value
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|timestamp| timestamp.with_timezone(&Utc)),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
