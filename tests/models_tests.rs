// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paydown::config::{ColorChoice, Settings};
use paydown::error::RecordError;
use paydown::models::BalanceRecord;
use paydown::utils::{fmt_money, parse_money};
use std::fs;
use tempfile::tempdir;

#[test]
fn record_validation() {
    assert_eq!(
        BalanceRecord::new("   ", 100.0, 10.0, "1st", 18.0),
        Err(RecordError::EmptyName)
    );
    assert_eq!(
        BalanceRecord::new("A", -1.0, 0.0, "1st", 18.0),
        Err(RecordError::NegativeBalance)
    );
    assert_eq!(
        BalanceRecord::new("A", 100.0, -5.0, "1st", 18.0),
        Err(RecordError::NegativeMinimum)
    );
    assert_eq!(
        BalanceRecord::new("A", 100.0, 150.0, "1st", 18.0),
        Err(RecordError::MinimumExceedsBalance {
            minimum: 150.0,
            balance: 100.0
        })
    );
    assert_eq!(
        BalanceRecord::new("A", 100.0, 10.0, "1st", f64::NAN),
        Err(RecordError::InvalidApr)
    );
    assert_eq!(
        BalanceRecord::new("A", 100.0, 10.0, "1st", 18.0)
            .unwrap()
            .with_credit_limit(-1.0),
        Err(RecordError::NegativeCreditLimit)
    );
}

#[test]
fn record_defaults_and_derived_values() {
    let r = BalanceRecord::new("  Visa ", 1000.0, 50.0, " ", 18.0).unwrap();
    assert_eq!(r.name, "Visa");
    assert_eq!(r.due_day, "15th");
    assert!((r.monthly_rate() - 0.015).abs() < 1e-12);
    assert_eq!(r.available_credit(r.balance), None);
    assert_eq!(
        r.to_string(),
        "Visa (balance $1000.00, min payment $50.00, APR 18%)"
    );

    let r = r.with_credit_limit(2500.0).unwrap();
    assert_eq!(r.available_credit(r.balance), Some(1500.0));
}

#[test]
fn money_formatting() {
    assert_eq!(fmt_money(1234.5), "$1,234.50");
    assert_eq!(fmt_money(0.0), "$0.00");
    assert_eq!(fmt_money(999.999), "$1,000.00");
    assert_eq!(fmt_money(1_000_000.0), "$1,000,000.00");
    assert_eq!(fmt_money(-12.3), "-$12.30");
}

#[test]
fn money_parsing() {
    assert_eq!(parse_money("$1,250.00").unwrap(), 1250.0);
    assert_eq!(parse_money(" 300 ").unwrap(), 300.0);
    assert!(parse_money("-5").is_err());
    assert!(parse_money("abc").is_err());
    assert!(parse_money("").is_err());
}

#[test]
fn settings_load_defaults_and_partial_files() {
    let dir = tempdir().unwrap();
    let missing = Settings::load(Some(&dir.path().join("none.json"))).unwrap();
    assert_eq!(missing, Settings::default());
    assert_eq!(missing.default_apr, 18.0);

    let partial = dir.path().join("config.json");
    fs::write(&partial, r#"{"default_apr": 21.0, "color": "never"}"#).unwrap();
    let s = Settings::load(Some(&partial)).unwrap();
    assert_eq!(s.default_apr, 21.0);
    assert_eq!(s.default_due_day, "15th");
    assert_eq!(s.color, ColorChoice::Never);

    fs::write(&partial, r#"{"default_apr": -1.0}"#).unwrap();
    assert!(Settings::load(Some(&partial)).is_err());

    fs::write(&partial, "not json").unwrap();
    assert!(Settings::load(Some(&partial)).is_err());
}
