// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{default_apr, read_file};
use crate::config::Settings;
use crate::models::{BalanceRecord, Schedule};
use crate::prompt::{Prompter, collect_records};
use crate::records::save_records;
use crate::schedule::{compute_schedule, required_minimum};
use crate::utils::{fmt_money, maybe_print_json, parse_money, pretty_table};
use anyhow::{Context, Result, bail};
use comfy_table::Table;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run(sub, settings, &mut prompter, &mut io::stdout())
}

/// Entry point with the prompt streams and report output injected, so the
/// interactive path can be driven from tests. Save notices go to stderr.
pub fn run<R: BufRead, W: Write, O: Write>(
    sub: &clap::ArgMatches,
    settings: &Settings,
    p: &mut Prompter<R, W>,
    out: &mut O,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let machine = json_flag || jsonl_flag;
    let file = sub.get_one::<String>("file");
    let settings = Settings {
        default_apr: default_apr(sub, settings),
        ..settings.clone()
    };

    let records = match file {
        Some(path) => read_file(path, settings.default_apr)?,
        None => {
            p.say("Credit Card Debt Paydown Planner")?;
            p.say(&"=".repeat(40))?;
            p.say("Pay minimums on every card, put everything else on the smallest balance.")?;
            p.say("Tip: use --file to load cards from a CSV or JSON file.")?;
            collect_records(p, &settings)?
        }
    };
    if records.is_empty() {
        bail!("No credit cards entered.");
    }

    if records.iter().all(|r| r.balance <= 0.0) {
        if machine {
            maybe_print_json(out, json_flag, jsonl_flag, &Schedule::default())?;
        } else {
            writeln!(out, "\nAll credit cards have a $0 balance! No payment schedule needed.")?;
        }
        return save_step(sub, p, &records, file.is_none() && !machine);
    }

    let required = required_minimum(&records);
    if !machine {
        writeln!(out, "\n{}", "=".repeat(50))?;
        writeln!(out, "CREDIT CARD SUMMARY")?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "{}", summary_table(&records))?;
        let total_debt: f64 = records.iter().map(|r| r.balance).sum();
        writeln!(out, "\nTotal Debt: {}", fmt_money(total_debt))?;
        writeln!(out, "Total Minimum Payments: ${:.2}", required)?;
    }

    let budget = match sub.get_one::<String>("budget") {
        Some(b) => parse_money(b)?,
        None => prompt_budget(p, required)?,
    };
    let schedule = compute_schedule(&records, budget)?;

    if machine {
        if jsonl_flag {
            maybe_print_json(out, false, true, &schedule.periods)?;
        } else {
            maybe_print_json(out, true, false, &schedule)?;
        }
    } else {
        writeln!(out, "{}", overview(&schedule, budget))?;
        let show = sub.get_flag("details")
            || (file.is_none() && p.confirm("\nShow detailed month-by-month schedule?")?);
        if show {
            writeln!(out, "{}", details_table(&schedule, &records))?;
        }
        writeln!(
            out,
            "\nCongratulations! You'll be debt-free in {} months!",
            schedule.total_periods
        )?;
        writeln!(out, "Once you're done, consider putting what you paid toward debt into savings.")?;
    }

    save_step(sub, p, &records, file.is_none() && !machine)
}

fn prompt_budget<R: BufRead, W: Write>(p: &mut Prompter<R, W>, required: f64) -> Result<f64> {
    loop {
        let label = format!(
            "How much can you pay toward credit cards each month?\n(Minimum required: ${:.2})",
            required
        );
        let v = p.amount(&label, None)?;
        if v < required {
            p.say(&format!(
                "Amount must be at least ${:.2} to cover minimum payments.",
                required
            ))?;
            continue;
        }
        return Ok(v);
    }
}

fn save_step<R: BufRead, W: Write>(
    sub: &clap::ArgMatches,
    p: &mut Prompter<R, W>,
    records: &[BalanceRecord],
    offer: bool,
) -> Result<()> {
    if let Some(out) = sub.get_one::<String>("save_to") {
        return save(out, records);
    }
    if offer && p.confirm("\nWould you like to save this card data to a JSON file for future use?")? {
        let name = p.text("Enter filename", Some("card-balances.json"))?;
        save(&name, records)?;
    }
    Ok(())
}

fn save(out: &str, records: &[BalanceRecord]) -> Result<()> {
    let path = save_records(Path::new(out.trim()), records)
        .with_context(|| format!("Save cards to {}", out.trim()))?;
    eprintln!("Credit card data saved to: {}", path.display());
    eprintln!("You can use this file with: paydown plan --file {}", path.display());
    Ok(())
}

/// Cards ordered by balance, smallest first, the order the snowball works through them.
pub fn summary_table(records: &[BalanceRecord]) -> Table {
    let mut order: Vec<&BalanceRecord> = records.iter().collect();
    order.sort_by(|a, b| a.balance.total_cmp(&b.balance));
    let rows = order
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let (limit, avail) = match r.available_credit(r.balance) {
                Some(a) => (fmt_money(r.credit_limit), fmt_money(a)),
                None => ("-".to_string(), "-".to_string()),
            };
            vec![
                (i + 1).to_string(),
                r.name.clone(),
                fmt_money(r.balance),
                format!("${:.2}", r.minimum_payment),
                format!("{}%", r.apr()),
                limit,
                avail,
            ]
        })
        .collect();
    pretty_table(
        &["#", "Card", "Balance", "Min Payment", "APR", "Credit Limit", "Available"],
        rows,
    )
}

pub fn overview(schedule: &Schedule, budget: f64) -> String {
    let (years, months) = schedule.years_and_months();
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(80));
    let _ = writeln!(out, "DEBT PAYOFF SCHEDULE (Debt Snowball Method)");
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(
        out,
        "Strategy: Pay minimums on all cards, extra payment goes to smallest balance"
    );
    let _ = writeln!(out, "Monthly Budget: ${:.2}", budget);
    let _ = writeln!(
        out,
        "Payoff Time: {} months ({} years, {} months)",
        schedule.total_periods, years, months
    );
    let _ = writeln!(out, "Total Interest Paid: ${:.2}", schedule.total_interest);
    let _ = write!(out, "Total Amount Paid: {}", fmt_money(schedule.total_paid));
    out
}

/// One row per payment, followed by a total row for each month.
pub fn details_table(schedule: &Schedule, records: &[BalanceRecord]) -> Table {
    let mut rows = Vec::new();
    for entry in &schedule.periods {
        for line in entry.payments.iter().filter(|l| l.payment > 0.0) {
            let avail = records
                .get(line.account)
                .and_then(|r| r.available_credit(line.balance_after))
                .map(fmt_money)
                .unwrap_or_else(|| "-".to_string());
            rows.push(vec![
                entry.period.to_string(),
                line.name.clone(),
                format!("${:.2}", line.payment),
                format!("${:.2}", line.interest),
                format!("${:.2}", line.principal),
                fmt_money(line.balance_after),
                avail,
            ]);
        }
        let status = if entry.remaining().next().is_none() {
            "All cards paid off!".to_string()
        } else {
            format!("Month {} total", entry.period)
        };
        rows.push(vec![
            String::new(),
            status,
            format!("${:.2}", entry.total_paid),
            format!("${:.2}", entry.total_interest),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    pretty_table(
        &[
            "Month",
            "Card",
            "Payment",
            "Interest",
            "Principal",
            "Balance",
            "Available",
        ],
        rows,
    )
}
