// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month calendar of payment due days. Display only; the engine never reads `due_day`.

use crate::models::BalanceRecord;
use crate::utils::fmt_money;
use anyhow::{Result, anyhow};
use chrono::{Datelike, Local, Month, NaiveDate};
use comfy_table::{Cell, CellAlignment, Color, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write as _;

pub const DEFAULT_DAY: u32 = 15;

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(st|nd|rd|th)\b").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

const PALETTE: [Color; 14] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
    Color::DarkYellow,
    Color::Grey,
    Color::DarkGrey,
    Color::Yellow,
];

/// `"15th"` -> 15, `"due on the 3rd"` -> 3. Anything unusable falls back to the 15th.
pub fn parse_due_day(due: &str) -> u32 {
    let lowered = due.trim().to_lowercase();
    let cleaned = ORDINAL.replace_all(&lowered, "");
    DIGITS
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|d| (1..=31).contains(d))
        .unwrap_or(DEFAULT_DAY)
}

pub fn day_suffix(day: u32) -> &'static str {
    if (10..=20).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month {}. Must be between 1 and 12.", month));
        }
        if !(1900..=2100).contains(&year) {
            return Err(anyhow!("Invalid year {}. Must be between 1900 and 2100.", year));
        }
        Ok(Self { year, month })
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self> {
        let bad = || anyhow!("Invalid date format '{}'. Use YYYY-MM (e.g., 2024-07)", s);
        let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        Self::new(year, month)
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    pub fn days(&self) -> u32 {
        let (ny, nm) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Monday-first weeks; 0 pads days outside the month.
    pub fn weeks(&self) -> Vec<[u32; 7]> {
        let offset = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.weekday().num_days_from_monday() as usize)
            .unwrap_or(0);
        let mut weeks = Vec::new();
        let mut week = [0u32; 7];
        let mut col = offset;
        for day in 1..=self.days() {
            week[col] = day;
            col += 1;
            if col == 7 {
                weeks.push(week);
                week = [0; 7];
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }
        weeks
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueEntry {
    /// Position of the card in the input, shown 1-based in the legend.
    pub account: usize,
    pub name: String,
    pub payment: f64,
    pub balance: f64,
    pub color: Color,
}

/// Records with a positive balance grouped by parsed due day.
#[derive(Debug, Clone, Default)]
pub struct DueDates {
    days: BTreeMap<u32, Vec<DueEntry>>,
    legend: Vec<(String, Color)>,
}

impl DueDates {
    pub fn collect(records: &[BalanceRecord]) -> Self {
        let mut due = DueDates::default();
        for (account, rec) in records.iter().enumerate().filter(|(_, r)| r.balance > 0.0) {
            let color = PALETTE[due.legend.len() % PALETTE.len()];
            due.legend.push((rec.name.clone(), color));
            due.days
                .entry(parse_due_day(&rec.due_day))
                .or_default()
                .push(DueEntry {
                    account,
                    name: rec.name.clone(),
                    payment: rec.minimum_payment,
                    balance: rec.balance,
                    color,
                });
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn on(&self, day: u32) -> &[DueEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Card names in colour-assignment order.
    pub fn legend(&self) -> &[(String, Color)] {
        &self.legend
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[DueEntry])> {
        self.days.iter().map(|(d, e)| (*d, e.as_slice()))
    }
}

fn day_lines(out: &mut String, due: &DueDates) {
    for (day, entries) in due.iter() {
        let _ = writeln!(out, "• {}{}:", day, day_suffix(day));
        for e in entries {
            let _ = writeln!(
                out,
                "  - {}: ${:.2} (Balance: {})",
                e.name,
                e.payment,
                fmt_money(e.balance)
            );
        }
        if entries.len() > 1 {
            let total: f64 = entries.iter().map(|e| e.payment).sum();
            let _ = writeln!(out, "  Total due: ${:.2}", total);
        }
        out.push('\n');
    }
}

/// ASCII calendar with due days marked `*`.
pub fn render_plain(month: CalendarMonth, due: &DueDates) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PAYMENT CALENDAR - {}", month.title());
    let _ = writeln!(out, "{}", "═".repeat(50));
    if due.is_empty() {
        out.push_str("No payment due dates found for cards with balances.\n");
        return out;
    }
    let _ = writeln!(out, "      {}", month.title());
    out.push_str("Mo Tu We Th Fr Sa Su\n");
    for week in month.weeks() {
        let mut line = String::new();
        for day in week {
            if day == 0 {
                line.push_str("   ");
            } else {
                let mark = if due.on(day).is_empty() { ' ' } else { '*' };
                let _ = write!(line, "{:>2}{}", day, mark);
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out.push_str("\nPayment Due Dates:\n");
    let _ = writeln!(out, "{}", "─".repeat(20));
    day_lines(&mut out, due);
    out
}

/// Coloured calendar grid, colour key and per-day legend. Days shared by several cards get a `*`.
pub fn render_table(month: CalendarMonth, due: &DueDates, force_styling: bool) -> Vec<Table> {
    let mut grid = Table::new();
    grid.load_preset(UTF8_FULL);
    if force_styling {
        grid.enforce_styling();
    }
    grid.set_header(
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|d| Cell::new(*d).set_alignment(CellAlignment::Center)),
    );
    for week in month.weeks() {
        grid.add_row(week.iter().map(|&day| {
            let entries = due.on(day);
            match entries.first() {
                _ if day == 0 => Cell::new(""),
                None => Cell::new(format!("{:>2}", day)).set_alignment(CellAlignment::Center),
                Some(first) => {
                    let mark = if entries.len() > 1 { "*" } else { " " };
                    Cell::new(format!("{:>2}{}", day, mark))
                        .set_alignment(CellAlignment::Center)
                        .fg(Color::White)
                        .bg(first.color)
                }
            }
        }));
    }

    let mut colors = Table::new();
    colors.load_preset(UTF8_FULL);
    if force_styling {
        colors.enforce_styling();
    }
    colors.set_header(vec!["Colour", "Card"]);
    for (name, color) in due.legend() {
        colors.add_row(vec![Cell::new("   ").bg(*color), Cell::new(name)]);
    }

    let mut legend = Table::new();
    legend.load_preset(UTF8_FULL);
    if force_styling {
        legend.enforce_styling();
    }
    legend.set_header(vec!["Due", "#", "Card", "Min Payment", "Balance"]);
    for (day, entries) in due.iter() {
        for e in entries {
            legend.add_row(vec![
                Cell::new(format!("{}{}", day, day_suffix(day))),
                Cell::new(e.account + 1),
                Cell::new(&e.name).fg(Color::White).bg(e.color),
                Cell::new(format!("${:.2}", e.payment)),
                Cell::new(fmt_money(e.balance)),
            ]);
        }
        if entries.len() > 1 {
            let total: f64 = entries.iter().map(|e| e.payment).sum();
            legend.add_row(vec![
                Cell::new(""),
                Cell::new(""),
                Cell::new("Total due"),
                Cell::new(format!("${:.2}", total)),
                Cell::new(""),
            ]);
        }
    }

    vec![grid, colors, legend]
}
