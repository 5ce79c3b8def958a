// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod check;
pub mod config;
pub mod export;
pub mod formats;
pub mod plan;

use crate::config::Settings;
use crate::models::BalanceRecord;
use crate::records::{LoadReport, RecordIssue, load_records};
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use std::path::Path;

/// `--apr` when given, otherwise the configured default.
pub fn default_apr(sub: &clap::ArgMatches, settings: &Settings) -> f64 {
    sub.get_one::<f64>("apr")
        .copied()
        .unwrap_or(settings.default_apr)
}

pub fn issues_table(issues: &[RecordIssue]) -> comfy_table::Table {
    let rows = issues
        .iter()
        .map(|i| {
            vec![
                i.position.to_string(),
                i.name.clone().unwrap_or_else(|| "Unknown".into()),
                i.reason.to_string(),
            ]
        })
        .collect();
    pretty_table(&["#", "Card", "Problem"], rows)
}

/// Load a card file. Progress and skipped records go to stderr so `--json` output stays clean.
pub fn read_file(path: &str, default_apr: f64) -> Result<Vec<BalanceRecord>> {
    let path = path.trim();
    eprintln!("Reading credit card data from: {}", path);
    let LoadReport {
        records,
        issues,
        file_default_apr,
    } = load_records(Path::new(path), default_apr)
        .with_context(|| format!("Load cards from {}", path))?;
    if let Some(apr) = file_default_apr {
        eprintln!("Using APR from file: {}%", apr);
    }
    if !issues.is_empty() {
        eprintln!("Skipped {} invalid record(s):", issues.len());
        eprintln!("{}", issues_table(&issues));
    }
    eprintln!("Loaded {} credit cards from file", records.len());
    Ok(records)
}
