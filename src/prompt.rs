// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented prompts for entering cards by hand.

use crate::config::Settings;
use crate::models::BalanceRecord;
use crate::utils::parse_money;
use anyhow::{Result, anyhow};
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, msg: &str) -> Result<()> {
        writeln!(self.out, "{}", msg)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Input closed before all answers were given"));
        }
        Ok(line.trim().to_string())
    }

    /// Free text; an empty answer takes `default` when one is given.
    pub fn text(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        loop {
            match default {
                Some(d) if !d.is_empty() => write!(self.out, "{} [{}]: ", label, d)?,
                _ => write!(self.out, "{}: ", label)?,
            }
            let answer = self.read_line()?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
    }

    /// Non-negative amount; asks again until the answer parses.
    pub fn amount(&mut self, label: &str, default: Option<f64>) -> Result<f64> {
        loop {
            match default {
                Some(d) => write!(self.out, "{} [{}]: ", label, d)?,
                None => write!(self.out, "{}: ", label)?,
            }
            let answer = self.read_line()?;
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
                continue;
            }
            match parse_money(&answer) {
                Ok(v) => return Ok(v),
                Err(_) => self.say("Please enter a valid non-negative number.")?,
            }
        }
    }

    /// y/yes or n/no; empty means no.
    pub fn confirm(&mut self, label: &str) -> Result<bool> {
        loop {
            write!(self.out, "{} [y/N]: ", label)?;
            match self.read_line()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }
}

/// Ask for cards until the user declines to add another.
pub fn collect_records<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    settings: &Settings,
) -> Result<Vec<BalanceRecord>> {
    let mut records = Vec::new();
    loop {
        p.say(&format!("\nEnter details for credit card #{}:", records.len() + 1))?;
        let name = p.text("Card name", None)?;
        let credit_limit = p.amount("Credit limit", Some(0.0))?;

        let balance = loop {
            let b = p.amount("Current balance", None)?;
            if credit_limit > 0.0 && b > credit_limit {
                p.say("Current balance cannot exceed credit limit.")?;
                continue;
            }
            break b;
        };
        let minimum = loop {
            let m = p.amount("Minimum payment", None)?;
            if balance > 0.0 && m > balance {
                p.say("Minimum payment cannot be greater than balance.")?;
                continue;
            }
            break m;
        };
        let due = p.text(
            "Payment due date (e.g., 15th of month)",
            Some(&settings.default_due_day),
        )?;
        let apr = p.amount("Annual Percentage Rate (APR)", Some(settings.default_apr))?;
        let notes = p.text("Notes (optional)", Some(""))?;

        let record = BalanceRecord::new(&name, balance, minimum, &due, apr)?
            .with_credit_limit(credit_limit)?
            .with_notes(&notes);

        p.say(&format!("\nAdded: {}", record))?;
        if let Some(avail) = record.available_credit(record.balance) {
            p.say(&format!(
                "   Credit Limit: ${:.2}, Available Credit: ${:.2}",
                record.credit_limit, avail
            ))?;
        }
        if !record.notes.is_empty() {
            p.say(&format!("   Notes: {}", record.notes))?;
        }
        records.push(record);

        if !p.confirm("\nAdd another credit card?")? {
            break;
        }
    }
    Ok(records)
}
