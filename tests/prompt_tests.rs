// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paydown::config::Settings;
use paydown::prompt::{Prompter, collect_records};
use std::io::Cursor;

#[test]
fn amount_asks_again_until_valid() {
    let mut out = Vec::new();
    let v = {
        let mut p = Prompter::new(Cursor::new("abc\n-5\n$1,250.50\n"), &mut out);
        p.amount("Current balance", None).unwrap()
    };
    assert_eq!(v, 1250.5);
    let shown = String::from_utf8(out).unwrap();
    assert_eq!(shown.matches("Please enter a valid non-negative number.").count(), 2);
}

#[test]
fn defaults_apply_to_empty_answers() {
    let mut out = Vec::new();
    let mut p = Prompter::new(Cursor::new("\n\n"), &mut out);
    assert_eq!(p.amount("APR", Some(18.0)).unwrap(), 18.0);
    assert_eq!(p.text("Due", Some("15th")).unwrap(), "15th");
}

#[test]
fn confirm_accepts_yes_and_no_words() {
    let mut out = Vec::new();
    let mut p = Prompter::new(Cursor::new("maybe\nYES\nn\n\n"), &mut out);
    assert!(p.confirm("Go?").unwrap());
    assert!(!p.confirm("Go?").unwrap());
    assert!(!p.confirm("Go?").unwrap());
}

#[test]
fn closed_input_is_an_error() {
    let mut out = Vec::new();
    let mut p = Prompter::new(Cursor::new(""), &mut out);
    let err = p.text("Card name", None).unwrap_err();
    assert!(err.to_string().contains("Input closed"));
}

#[test]
fn collect_records_rechecks_limit_and_minimum() {
    let input = [
        "Visa",  // name
        "500",   // credit limit
        "800",   // over the limit
        "400",   // balance
        "450",   // minimum over balance
        "40",    // minimum
        "3rd",   // due
        "",      // APR default
        "daily", // notes
        "y",     // another
        "Store", "", "120", "15", "", "24.99", "", "n",
    ]
    .join("\n")
        + "\n";
    let mut out = Vec::new();
    let records = {
        let mut p = Prompter::new(Cursor::new(input), &mut out);
        let settings = Settings {
            default_apr: 21.0,
            ..Settings::default()
        };
        collect_records(&mut p, &settings).unwrap()
    };
    assert_eq!(records.len(), 2);

    let visa = &records[0];
    assert_eq!(visa.balance, 400.0);
    assert_eq!(visa.minimum_payment, 40.0);
    assert_eq!(visa.credit_limit, 500.0);
    assert_eq!(visa.due_day, "3rd");
    assert_eq!(visa.apr(), 21.0);
    assert_eq!(visa.notes, "daily");

    let store = &records[1];
    assert_eq!(store.credit_limit, 0.0);
    assert_eq!(store.due_day, "15th");
    assert_eq!(store.apr(), 24.99);

    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Current balance cannot exceed credit limit."));
    assert!(shown.contains("Minimum payment cannot be greater than balance."));
    assert!(shown.contains("Available Credit: $100.00"));
}
