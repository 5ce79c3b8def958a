// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ColorChoice;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .help("CSV or JSON file containing credit card details")
}

fn budget_arg() -> Arg {
    Arg::new("budget")
        .short('b')
        .long("budget")
        .help("Monthly budget for credit card payments")
}

fn apr_arg() -> Arg {
    Arg::new("apr")
        .long("apr")
        .value_parser(value_parser!(f64))
        .help("APR for cards that do not specify one (default from config, 18.0)")
}

pub fn build_cli() -> Command {
    Command::new("paydown")
        .version(crate_version!())
        .about("Credit card debt paydown planner using the debt snowball method")
        .arg(
            Arg::new("color")
                .long("color")
                .global(true)
                .value_parser(value_parser!(ColorChoice))
                .help("Colour output: auto, always or never"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a config.json to use instead of the default"),
        )
        .subcommand(
            Command::new("plan")
                .about("Build a debt snowball payoff schedule")
                .arg(file_arg())
                .arg(budget_arg())
                .arg(apr_arg())
                .arg(
                    Arg::new("details")
                        .short('d')
                        .long("details")
                        .action(ArgAction::SetTrue)
                        .help("Show the month-by-month schedule"),
                )
                .arg(
                    Arg::new("save_to")
                        .short('s')
                        .long("save-to")
                        .help("Save entered card data to a JSON file (e.g., card-balances.json)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("jsonl")
                        .help("Print the schedule as JSON"),
                )
                .arg(
                    Arg::new("jsonl")
                        .long("jsonl")
                        .action(ArgAction::SetTrue)
                        .help("Print one JSON line per month"),
                ),
        )
        .subcommand(
            Command::new("calendar")
                .about("Show a calendar of payment due dates")
                .arg(file_arg())
                .arg(apr_arg())
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Month to show (YYYY-MM), defaults to the current month"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write the payoff schedule to a CSV or JSON file")
                .arg(file_arg().required(true))
                .arg(budget_arg().required(true))
                .arg(apr_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a card file and list records that would be skipped")
                .arg(file_arg().required(true))
                .arg(apr_arg()),
        )
        .subcommand(Command::new("formats").about("Describe the CSV and JSON file formats"))
        .subcommand(
            Command::new("config")
                .about("Inspect configuration")
                .subcommand(Command::new("path").about("Print the default config file location"))
                .subcommand(Command::new("show").about("Print the effective settings")),
        )
}
