// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{default_apr, read_file};
use crate::config::Settings;
use crate::models::Schedule;
use crate::schedule::compute_schedule;
use crate::utils::parse_money;
use anyhow::{Context, Result, anyhow};

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let path = sub.get_one::<String>("file").unwrap();
    let budget = parse_money(sub.get_one::<String>("budget").unwrap())?;
    let records = read_file(path, default_apr(sub, settings))?;
    let schedule = compute_schedule(&records, budget)?;

    match fmt.as_str() {
        "csv" => write_csv(out, &schedule)?,
        _ => std::fs::write(out, serde_json::to_string_pretty(&schedule)?)
            .with_context(|| format!("Write {}", out))?,
    }
    println!(
        "Exported {}-month schedule to {}",
        schedule.total_periods, out
    );
    Ok(())
}

fn write_csv(out: &str, schedule: &Schedule) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record([
        "month",
        "card",
        "payment",
        "interest",
        "principal",
        "balance_before",
        "balance_after",
    ])?;
    for entry in &schedule.periods {
        for line in &entry.payments {
            wtr.write_record([
                entry.period.to_string(),
                line.name.clone(),
                format!("{:.2}", line.payment),
                format!("{:.2}", line.interest),
                format!("{:.2}", line.principal),
                format!("{:.2}", line.balance_before),
                format!("{:.2}", line.balance_after),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
