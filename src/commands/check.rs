// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{default_apr, issues_table};
use crate::config::Settings;
use crate::error::SourceError;
use crate::records::{RecordIssue, load_records};
use crate::schedule::required_minimum;
use crate::utils::fmt_money;
use anyhow::Result;
use std::path::Path;

/// Outcome of validating a card file without planning anything.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub valid: usize,
    pub issues: Vec<RecordIssue>,
    pub total_debt: f64,
    pub total_minimums: f64,
}

pub fn check_file(path: &Path, default_apr: f64) -> Result<CheckReport> {
    match load_records(path, default_apr) {
        Ok(report) => Ok(CheckReport {
            valid: report.records.len(),
            total_debt: report.records.iter().map(|r| r.balance).sum(),
            total_minimums: required_minimum(&report.records),
            issues: report.issues,
        }),
        Err(SourceError::NoValidRecords { issues, .. }) => Ok(CheckReport {
            issues,
            ..CheckReport::default()
        }),
        Err(e) => Err(e.into()),
    }
}

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let path = sub.get_one::<String>("file").unwrap().trim();
    let report = check_file(Path::new(path), default_apr(sub, settings))?;

    if report.issues.is_empty() {
        println!("check: no issues found in {}", path);
    } else {
        println!("{}", issues_table(&report.issues));
    }
    println!(
        "{} valid card(s), {} skipped; total debt {}, minimums ${:.2}",
        report.valid,
        report.issues.len(),
        fmt_money(report.total_debt),
        report.total_minimums
    );
    Ok(())
}
