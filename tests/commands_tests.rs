// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paydown::commands::{check, export, formats, plan};
use paydown::config::Settings;
use paydown::error::ScheduleError;
use paydown::models::Schedule;
use paydown::prompt::Prompter;
use paydown::records::load_records;
use paydown::schedule::compute_schedule;
use paydown::{cli, records};
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use tempfile::tempdir;

const CARDS: &str = r#"[
    {"card_name": "Visa", "current_balance": 1000.0, "minimum_payment": 50.0, "apr": 18.0},
    {"card_name": "Store", "current_balance": 300.0, "minimum_payment": 25.0, "apr": 24.0}
]"#;

fn write_cards(dir: &Path) -> String {
    let path = dir.join("cards.json");
    fs::write(&path, CARDS).unwrap();
    path.to_string_lossy().to_string()
}

fn run_export(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["paydown", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        export::handle(export_m, &Settings::default())
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_writes_csv_rows_per_payment() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let out_path = dir.path().join("schedule.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&["-f", &cards, "-b", "200", "--out", &out_str]).unwrap();

    let text = fs::read_to_string(&out_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "month,card,payment,interest,principal,balance_before,balance_after"
    );
    // Store is the smaller balance and takes the 125 extra
    assert_eq!(lines.next().unwrap(), "1,Store,150.00,6.00,144.00,300.00,156.00");
    assert_eq!(lines.next().unwrap(), "1,Visa,50.00,15.00,35.00,1000.00,965.00");

    let recs = records::parse_json_records(CARDS, 18.0).unwrap().records;
    let schedule = compute_schedule(&recs, 200.0).unwrap();
    let rows: usize = schedule.periods.iter().map(|p| p.payments.len()).sum();
    assert_eq!(text.lines().count(), rows + 1);
}

#[test]
fn export_writes_json_schedule() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let out_path = dir.path().join("schedule.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&["-f", &cards, "-b", "$200", "--format", "json", "--out", &out_str]).unwrap();

    let exported: Schedule = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(exported.total_periods, exported.periods.len());
    assert_eq!(exported.periods[0].payments[0].name, "Store");
    assert!(exported.periods.last().unwrap().remaining().next().is_none());
}

#[test]
fn export_rejects_unknown_format_before_writing() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let out_path = dir.path().join("schedule.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&["-f", &cards, "-b", "200", "--format", "xml", "--out", &out_str])
        .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}

#[test]
fn export_surfaces_budget_shortfall() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let out_path = dir.path().join("schedule.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&["-f", &cards, "-b", "50", "--out", &out_str]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ScheduleError>(),
        Some(&ScheduleError::BudgetBelowMinimum {
            budget: 50.0,
            required: 75.0
        })
    );
    assert!(!out_path.exists());
}

#[test]
fn check_reports_valid_and_skipped_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.csv");
    fs::write(
        &path,
        "Card Name,Current Balance,Credit Limit,Minimum Payment,Payment Due Date\n\
         Visa,1000,2000,50,15th\n\
         ,200,0,10,1st\n\
         Store,300,0,25,5th\n",
    )
    .unwrap();
    let report = check::check_file(&path, 18.0).unwrap();
    assert_eq!(report.valid, 2);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].position, 3);
    assert_eq!(report.total_debt, 1300.0);
    assert_eq!(report.total_minimums, 75.0);

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"[{"card_name": "Only Name"}, {"current_balance": 5}]"#).unwrap();
    let report = check::check_file(&bad, 18.0).unwrap();
    assert_eq!(report.valid, 0);
    assert_eq!(report.issues.len(), 2);

    assert!(check::check_file(&dir.path().join("missing.json"), 18.0).is_err());
}

#[test]
fn formats_text_lists_csv_headers_and_json_keys() {
    let text = formats::help_text().unwrap();
    assert!(text.contains(
        "Card Name,Current Balance,Credit Limit,Minimum Payment,Payment Due Date,Notes,APR"
    ));
    assert!(text.contains("\"default_apr\""));
    assert!(text.contains("\"card_name\""));
}

fn plan_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["paydown", "plan"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    matches.subcommand_matches("plan").unwrap().clone()
}

#[test]
fn plan_interactive_entry_saves_to_file() {
    let dir = tempdir().unwrap();
    let save_to = dir.path().join("entered");
    let save_str = save_to.to_string_lossy().to_string();
    let sub = plan_matches(&["--save-to", &save_str]);

    // name, limit, balance, minimum, due, apr, notes, another?, budget, details?
    let input = "Visa\n2000\n1000\n50\n\n\n\nn\n100\nn\n";
    let mut out = Vec::new();
    let mut report = Vec::new();
    {
        let mut p = Prompter::new(Cursor::new(input), &mut out);
        plan::run(&sub, &Settings::default(), &mut p, &mut report).unwrap();
    }
    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Enter details for credit card #1:"));
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("CREDIT CARD SUMMARY"));
    assert!(report.contains("Congratulations! You'll be debt-free in"));
    assert!(shown.contains("Minimum required: $50.00"));

    let saved = load_records(&dir.path().join("entered.json"), 18.0).unwrap();
    assert_eq!(saved.records.len(), 1);
    assert_eq!(saved.records[0].name, "Visa");
    assert_eq!(saved.records[0].credit_limit, 2000.0);
    assert_eq!(saved.records[0].due_day, "15th");
}

#[test]
fn plan_from_file_asks_for_budget_until_it_covers_minimums() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let sub = plan_matches(&["-f", &cards]);

    let mut out = Vec::new();
    {
        let mut p = Prompter::new(Cursor::new("50\n150\n"), &mut out);
        plan::run(&sub, &Settings::default(), &mut p, &mut io::sink()).unwrap();
    }
    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Amount must be at least $75.00 to cover minimum payments."));
}

#[test]
fn plan_with_budget_below_minimums_fails() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let sub = plan_matches(&["-f", &cards, "-b", "60", "--json"]);

    let mut out = Vec::new();
    let mut p = Prompter::new(Cursor::new(""), &mut out);
    let err = plan::run(&sub, &Settings::default(), &mut p, &mut io::sink()).unwrap_err();
    assert!(err.to_string().contains("less than minimum payments required"));
}

#[test]
fn plan_with_only_paid_off_cards_needs_no_budget() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paid.json");
    fs::write(
        &path,
        r#"[{"card_name": "Paid", "current_balance": 0, "minimum_payment": 0}]"#,
    )
    .unwrap();
    let file = path.to_string_lossy().to_string();
    let copy = dir.path().join("copy.json");
    let copy_str = copy.to_string_lossy().to_string();
    let sub = plan_matches(&["-f", &file, "--save-to", &copy_str]);

    let mut out = Vec::new();
    let mut p = Prompter::new(Cursor::new(""), &mut out);
    plan::run(&sub, &Settings::default(), &mut p, &mut io::sink()).unwrap();
    assert_eq!(load_records(&copy, 18.0).unwrap().records[0].name, "Paid");
}

#[test]
fn overview_and_details_render_schedule() {
    let recs = records::parse_json_records(CARDS, 18.0).unwrap().records;
    let schedule = compute_schedule(&recs, 200.0).unwrap();

    let text = plan::overview(&schedule, 200.0);
    assert!(text.contains("Monthly Budget: $200.00"));
    assert!(text.contains(&format!("Payoff Time: {} months", schedule.total_periods)));

    let details = plan::details_table(&schedule, &recs).to_string();
    assert!(details.contains("Store"));
    assert!(details.contains("All cards paid off!"));

    let summary = plan::summary_table(&recs).to_string();
    let store = summary.find("Store").unwrap();
    let visa = summary.find("Visa").unwrap();
    assert!(store < visa);
}

#[test]
fn plan_json_output_stays_parseable_when_saving() {
    let dir = tempdir().unwrap();
    let cards = write_cards(dir.path());
    let copy = dir.path().join("saved");
    let copy_str = copy.to_string_lossy().to_string();

    let sub = plan_matches(&["-f", &cards, "-b", "200", "--json", "-s", &copy_str]);
    let mut report = Vec::new();
    let mut p = Prompter::new(Cursor::new(""), Vec::new());
    plan::run(&sub, &Settings::default(), &mut p, &mut report).unwrap();

    let parsed: Schedule = serde_json::from_slice(&report).unwrap();
    assert_eq!(parsed.periods[0].payments[0].name, "Store");
    assert!(dir.path().join("saved.json").exists());

    let sub = plan_matches(&["-f", &cards, "-b", "200", "--jsonl", "-s", &copy_str]);
    let mut report = Vec::new();
    plan::run(&sub, &Settings::default(), &mut p, &mut report).unwrap();
    let text = String::from_utf8(report).unwrap();
    assert_eq!(text.lines().count(), parsed.total_periods);
    for line in text.lines() {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }
}
