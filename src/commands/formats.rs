// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::records::CSV_REQUIRED_HEADERS;
use anyhow::Result;
use serde_json::json;
use std::fmt::Write as _;

pub fn handle() -> Result<()> {
    println!("{}", help_text()?);
    Ok(())
}

pub fn help_text() -> Result<String> {
    let array = json!([
        {
            "card_name": "Chase Freedom",
            "current_balance": 3500.00,
            "credit_limit": 5000.00,
            "minimum_payment": 75.00,
            "payment_due_date": "15th",
            "apr": 19.99,
            "notes": "Main rewards card"
        },
        {
            "card_name": "Capital One",
            "current_balance": 1200.00,
            "credit_limit": 2000.00,
            "minimum_payment": 35.00,
            "payment_due_date": "28th",
            "notes": ""
        }
    ]);
    let with_default = json!({
        "default_apr": 18.0,
        "cards": [
            {
                "card_name": "Discover",
                "current_balance": 875.50,
                "credit_limit": 1500.00,
                "minimum_payment": 25.00,
                "payment_due_date": "5th",
                "notes": "Cashback card"
            }
        ]
    });

    let mut out = String::new();
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "SUPPORTED FILE FORMATS")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "JSON FORMAT (recommended):\n")?;
    writeln!(out, "{}\n", serde_json::to_string_pretty(&array)?)?;
    writeln!(out, "Alternative JSON format with a file-wide default APR:\n")?;
    writeln!(out, "{}\n", serde_json::to_string_pretty(&with_default)?)?;
    writeln!(out, "CSV FORMAT:\n")?;
    writeln!(out, "{},Notes,APR", CSV_REQUIRED_HEADERS.join(","))?;
    writeln!(out, "Chase Freedom,3500.00,5000.00,75.00,15th,Main rewards card,19.99")?;
    writeln!(out, "Capital One,1200.00,2000.00,35.00,28th,,")?;
    writeln!(out, "Discover,875.50,1500.00,25.00,5th,Cashback card,\n")?;
    writeln!(
        out,
        "Headers may carry a leading column number (\"1  Card Name\") and are matched case-insensitively."
    )?;
    writeln!(out, "Notes and APR columns are optional; a blank APR uses --apr or the configured default.\n")?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "  paydown plan --file cards.json")?;
    writeln!(out, "  paydown plan -f cards.csv -b 500 --details")?;
    writeln!(out, "  paydown plan --save-to my-cards.json")?;
    writeln!(out, "  paydown calendar -f cards.json --month 2024-07")?;
    writeln!(out, "  paydown export -f cards.json -b 500 --format csv --out schedule.csv\n")?;
    writeln!(out, "JSON FIELD REFERENCE:")?;
    writeln!(out, "  card_name (required): Name of the credit card")?;
    writeln!(out, "  current_balance (required): Current balance amount")?;
    writeln!(out, "  minimum_payment (required): Minimum monthly payment")?;
    writeln!(out, "  credit_limit (optional): Credit limit, defaults to 0")?;
    writeln!(out, "  payment_due_date (optional): Due date, defaults to '15th'")?;
    writeln!(out, "  apr (optional): Annual Percentage Rate, defaults to 18.0")?;
    write!(out, "  notes (optional): Free text, defaults to empty")?;
    Ok(out)
}
