// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::Path;

use paydown::{cli, commands, config::ColorChoice, config::Settings};

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    init_logging(matches.get_count("verbose"))?;

    let mut settings = Settings::load(matches.get_one::<String>("config").map(Path::new))?;
    if let Some(choice) = matches.get_one::<ColorChoice>("color") {
        settings.color = *choice;
    }

    match matches.subcommand() {
        Some(("plan", sub)) => commands::plan::handle(sub, &settings)?,
        Some(("calendar", sub)) => commands::calendar::handle(sub, &settings)?,
        Some(("export", sub)) => commands::export::handle(sub, &settings)?,
        Some(("check", sub)) => commands::check::handle(sub, &settings)?,
        Some(("formats", _)) => commands::formats::handle()?,
        Some(("config", sub)) => commands::config::handle(sub, &settings)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
