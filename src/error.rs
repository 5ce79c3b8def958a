// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::records::RecordIssue;
use std::path::PathBuf;
use thiserror::Error;

/// A single record failed validation. Sources skip the record and keep going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("card name cannot be empty")]
    EmptyName,

    #[error("current balance must be greater than or equal to 0")]
    NegativeBalance,

    #[error("minimum payment must be greater than or equal to 0")]
    NegativeMinimum,

    #[error("minimum payment ({minimum:.2}) cannot be greater than current balance ({balance:.2})")]
    MinimumExceedsBalance { minimum: f64, balance: f64 },

    #[error("APR must be a finite number greater than or equal to 0")]
    InvalidApr,

    #[error("credit limit must be greater than or equal to 0")]
    NegativeCreditLimit,
}

/// Whole-file failures raised by the JSON and CSV record sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied reading file: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Unsupported file type: '{0}'. Supported types: .csv, .json")]
    UnsupportedType(String),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSON must be either an array of cards or an object with a 'cards' array")]
    UnexpectedShape,

    #[error("default_apr must be a non-negative number, got '{0}'")]
    InvalidDefaultApr(String),

    #[error("No credit card data found in {0} file")]
    Empty(&'static str),

    #[error("Missing required CSV headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid credit card data found in {kind} file")]
    NoValidRecords {
        kind: &'static str,
        issues: Vec<RecordIssue>,
    },
}

impl SourceError {
    pub(crate) fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                SourceError::PermissionDenied(path.to_path_buf())
            }
            _ => SourceError::Io(err),
        }
    }
}

/// Why the engine refused to produce a schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error(
        "Total monthly payment (${budget:.2}) is less than minimum payments required (${required:.2})"
    )]
    BudgetBelowMinimum { budget: f64, required: f64 },

    #[error("Payment schedule exceeds {limit} months. Please check your inputs.")]
    RunawaySchedule { limit: usize },

    #[error("Monthly budget must be a finite number, got {0}")]
    InvalidBudget(f64),
}
