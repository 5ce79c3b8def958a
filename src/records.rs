// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON and CSV record sources, plus the JSON writer used by `--save-to`.
//!
//! Sources validate record by record: a bad record becomes a [`RecordIssue`]
//! and the rest of the batch still loads. Only a file that yields no valid
//! record at all is an error.

use crate::error::{RecordError, SourceError};
use crate::models::BalanceRecord;
use csv::ReaderBuilder;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

static LEADING_INDEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s*").unwrap());

const CSV_NAME: &str = "Card Name";
const CSV_BALANCE: &str = "Current Balance";
const CSV_LIMIT: &str = "Credit Limit";
const CSV_MINIMUM: &str = "Minimum Payment";
const CSV_DUE: &str = "Payment Due Date";
const CSV_NOTES: &str = "Notes";
const CSV_APR: &str = "APR";

pub const CSV_REQUIRED_HEADERS: [&str; 5] = [CSV_NAME, CSV_BALANCE, CSV_LIMIT, CSV_MINIMUM, CSV_DUE];

#[derive(Debug, Clone, PartialEq)]
pub struct RecordIssue {
    /// 1-based card number for JSON, spreadsheet row number for CSV.
    pub position: usize,
    pub name: Option<String>,
    pub reason: RecordError,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<BalanceRecord>,
    pub issues: Vec<RecordIssue>,
    /// APR taken from a `default_apr` key in the file, if any.
    pub file_default_apr: Option<f64>,
}

impl LoadReport {
    fn skip(&mut self, position: usize, name: Option<String>, reason: RecordError) {
        warn!(
            "skipping record #{} ({}): {}",
            position,
            name.as_deref().unwrap_or("Unknown"),
            reason
        );
        self.issues.push(RecordIssue {
            position,
            name,
            reason,
        });
    }
}

/// Strip a leading column index and surrounding whitespace:
/// `"1   Current Balance"` becomes `"Current Balance"`.
pub fn normalize_header(header: &str) -> String {
    LEADING_INDEX.replace(header.trim(), "").into_owned()
}

fn header_key(header: &str) -> String {
    normalize_header(header)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn load_records(path: &Path, default_apr: f64) -> Result<LoadReport, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "json" => read_json(path, default_apr),
        "csv" => read_csv(path, default_apr),
        other => Err(SourceError::UnsupportedType(format!(".{}", other))),
    }
}

pub fn read_json(path: &Path, default_apr: f64) -> Result<LoadReport, SourceError> {
    let text = fs::read_to_string(path).map_err(|e| SourceError::from_io(e, path))?;
    parse_json_records(&text, default_apr)
}

pub fn parse_json_records(input: &str, default_apr: f64) -> Result<LoadReport, SourceError> {
    let data: Value = serde_json::from_str(input)?;
    let mut report = LoadReport::default();

    let cards = match &data {
        Value::Array(items) => items,
        Value::Object(obj) => {
            let cards = obj
                .get("cards")
                .and_then(Value::as_array)
                .ok_or(SourceError::UnexpectedShape)?;
            if let Some(v) = obj.get("default_apr") {
                let apr = number(v, "default_apr")
                    .ok()
                    .filter(|a| *a >= 0.0)
                    .ok_or_else(|| SourceError::InvalidDefaultApr(text(v)))?;
                report.file_default_apr = Some(apr);
            }
            cards
        }
        _ => return Err(SourceError::UnexpectedShape),
    };
    if cards.is_empty() {
        return Err(SourceError::Empty("JSON"));
    }
    info!("found {} cards in JSON input", cards.len());

    let apr_fallback = report.file_default_apr.unwrap_or(default_apr);
    for (pos, card) in cards.iter().enumerate() {
        let position = pos + 1;
        let name = card
            .get("card_name")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        let Some(obj) = card.as_object() else {
            report.skip(
                position,
                None,
                RecordError::MissingFields(vec![
                    "card_name".into(),
                    "current_balance".into(),
                    "minimum_payment".into(),
                ]),
            );
            continue;
        };
        match json_record(obj, apr_fallback) {
            Ok(rec) => report.records.push(rec),
            Err(e) => report.skip(position, name, e),
        }
    }

    if report.records.is_empty() {
        return Err(SourceError::NoValidRecords {
            kind: "JSON",
            issues: report.issues,
        });
    }
    Ok(report)
}

fn json_record(obj: &Map<String, Value>, default_apr: f64) -> Result<BalanceRecord, RecordError> {
    let missing: Vec<String> = ["card_name", "current_balance", "minimum_payment"]
        .iter()
        .filter(|f| !obj.contains_key(**f))
        .map(|f| f.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RecordError::MissingFields(missing));
    }

    let name = text(&obj["card_name"]);
    let balance = number(&obj["current_balance"], "current_balance")?;
    let minimum = number(&obj["minimum_payment"], "minimum_payment")?;
    let due = obj.get("payment_due_date").map(text).unwrap_or_default();
    let apr = match obj.get("apr") {
        Some(v) => number(v, "apr")?,
        None => default_apr,
    };
    let limit = match obj.get("credit_limit") {
        Some(v) => number(v, "credit_limit")?,
        None => 0.0,
    };
    let notes = obj.get("notes").map(text).unwrap_or_default();

    Ok(BalanceRecord::new(&name, balance, minimum, &due, apr)?
        .with_credit_limit(limit)?
        .with_notes(&notes))
}

fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number(v: &Value, field: &'static str) -> Result<f64, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        field,
        value: text(v),
    };
    match v {
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        Value::String(s) => parse_number(s, field),
        _ => Err(invalid()),
    }
}

fn parse_number(s: &str, field: &'static str) -> Result<f64, RecordError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            field,
            value: s.trim().to_string(),
        })
}

pub fn read_csv(path: &Path, default_apr: f64) -> Result<LoadReport, SourceError> {
    let file = fs::File::open(path).map_err(|e| SourceError::from_io(e, path))?;
    parse_csv_records(file, default_apr)
}

pub fn parse_csv_records<R: Read>(input: R, default_apr: f64) -> Result<LoadReport, SourceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = rdr.headers()?.clone();
    let keys: Vec<String> = headers.iter().map(header_key).collect();
    info!(
        "CSV headers: {} (normalized: {})",
        headers.iter().collect::<Vec<_>>().join(", "),
        headers
            .iter()
            .map(normalize_header)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let column = |name: &str| keys.iter().position(|k| *k == name.to_lowercase());

    let mut cols = [0usize; 5];
    let mut missing = Vec::new();
    for (slot, header) in cols.iter_mut().zip(CSV_REQUIRED_HEADERS) {
        match column(header) {
            Some(c) => *slot = c,
            None => missing.push(header.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(SourceError::MissingHeaders(missing));
    }
    let [name_col, balance_col, limit_col, min_col, due_col] = cols;
    let notes_col = column(CSV_NOTES);
    let apr_col = column(CSV_APR);

    let mut report = LoadReport::default();
    let mut seen = 0usize;
    for (i, row) in rdr.records().enumerate() {
        // row 1 is the header line
        let position = i + 2;
        let row = row?;
        seen += 1;
        let cell = |c: usize| row.get(c).unwrap_or("").trim();

        let parsed = (|| -> Result<BalanceRecord, RecordError> {
            let balance = parse_number(cell(balance_col), "Current Balance")?;
            let limit = match cell(limit_col) {
                "" => 0.0,
                s => parse_number(s, "Credit Limit")?,
            };
            let minimum = parse_number(cell(min_col), "Minimum Payment")?;
            let apr = match apr_col.map(cell) {
                None | Some("") => default_apr,
                Some(s) => parse_number(s, "APR")?,
            };
            let notes = notes_col.map(cell).unwrap_or("");
            Ok(
                BalanceRecord::new(cell(name_col), balance, minimum, cell(due_col), apr)?
                    .with_credit_limit(limit)?
                    .with_notes(notes),
            )
        })();

        match parsed {
            Ok(rec) => report.records.push(rec),
            Err(e) => {
                let name = Some(cell(name_col).to_string()).filter(|n| !n.is_empty());
                report.skip(position, name, e);
            }
        }
    }
    info!("read {} CSV rows, {} valid", seen, report.records.len());

    if report.records.is_empty() {
        return Err(SourceError::NoValidRecords {
            kind: "CSV",
            issues: report.issues,
        });
    }
    Ok(report)
}

/// Write records as a pretty JSON array, appending `.json` when missing.
/// Returns the path actually written.
pub fn save_records(path: &Path, records: &[BalanceRecord]) -> Result<PathBuf, SourceError> {
    let has_ext = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_lowercase().ends_with(".json"));
    let out = if has_ext {
        path.to_path_buf()
    } else {
        let mut s = path.as_os_str().to_owned();
        s.push(".json");
        PathBuf::from(s)
    };
    let body = serde_json::to_string_pretty(records)?;
    fs::write(&out, body).map_err(|e| SourceError::from_io(e, &out))?;
    info!("saved {} records to {}", records.len(), out.display());
    Ok(out)
}
