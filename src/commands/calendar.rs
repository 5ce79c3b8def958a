// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{default_apr, read_file};
use crate::calendar::{CalendarMonth, DueDates, render_plain, render_table};
use crate::config::Settings;
use crate::prompt::{Prompter, collect_records};
use crate::utils::use_color;
use anyhow::{Result, bail};
use std::io;

pub fn handle(sub: &clap::ArgMatches, settings: &Settings) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => CalendarMonth::parse(m)?,
        None => CalendarMonth::current(),
    };
    let settings = Settings {
        default_apr: default_apr(sub, settings),
        ..settings.clone()
    };
    let records = match sub.get_one::<String>("file") {
        Some(path) => read_file(path, settings.default_apr)?,
        None => {
            let stdin = io::stdin();
            let mut p = Prompter::new(stdin.lock(), io::stdout());
            collect_records(&mut p, &settings)?
        }
    };
    if records.is_empty() {
        bail!("No credit cards entered.");
    }

    let due = DueDates::collect(&records);
    if use_color(settings.color) && !due.is_empty() {
        println!("\nPAYMENT CALENDAR - {}", month.title());
        for table in render_table(month, &due, true) {
            println!("{}", table);
        }
    } else {
        println!("\n{}", render_plain(month, &due));
    }
    Ok(())
}
