// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_APR: f64 = 18.0;
pub const DEFAULT_DUE_DAY: &str = "15th";

/// One revolving account. Serializes to the JSON shape used by `--file` and `--save-to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRecord {
    #[serde(rename = "card_name")]
    pub name: String,
    #[serde(rename = "current_balance")]
    pub balance: f64,
    pub minimum_payment: f64,
    #[serde(rename = "payment_due_date")]
    pub due_day: String,
    apr: f64,
    pub credit_limit: f64,
    pub notes: String,
    #[serde(skip)]
    monthly_rate: f64,
}

impl BalanceRecord {
    /// Validating constructor shared by every record source.
    pub fn new(
        name: &str,
        balance: f64,
        minimum_payment: f64,
        due_day: &str,
        apr: f64,
    ) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if !balance.is_finite() || balance < 0.0 {
            return Err(RecordError::NegativeBalance);
        }
        if !minimum_payment.is_finite() || minimum_payment < 0.0 {
            return Err(RecordError::NegativeMinimum);
        }
        if balance > 0.0 && minimum_payment > balance {
            return Err(RecordError::MinimumExceedsBalance {
                minimum: minimum_payment,
                balance,
            });
        }
        if !apr.is_finite() || apr < 0.0 {
            return Err(RecordError::InvalidApr);
        }
        let due_day = match due_day.trim() {
            "" => DEFAULT_DUE_DAY,
            d => d,
        };
        Ok(Self {
            name: name.to_string(),
            balance,
            minimum_payment,
            due_day: due_day.to_string(),
            apr,
            credit_limit: 0.0,
            notes: String::new(),
            monthly_rate: apr / 100.0 / 12.0,
        })
    }

    pub fn with_credit_limit(mut self, credit_limit: f64) -> Result<Self, RecordError> {
        if !credit_limit.is_finite() || credit_limit < 0.0 {
            return Err(RecordError::NegativeCreditLimit);
        }
        self.credit_limit = credit_limit;
        Ok(self)
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.trim().to_string();
        self
    }

    pub fn apr(&self) -> f64 {
        self.apr
    }

    /// Periodic rate, `apr / 100 / 12`, fixed at construction.
    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// `None` when no credit limit was recorded.
    pub fn available_credit(&self, balance: f64) -> Option<f64> {
        (self.credit_limit > 0.0).then(|| self.credit_limit - balance)
    }
}

impl fmt::Display for BalanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (balance ${:.2}, min payment ${:.2}, APR {}%)",
            self.name, self.balance, self.minimum_payment, self.apr
        )
    }
}

/// One account's activity within one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLine {
    /// Position of the record in the input sequence.
    pub account: usize,
    pub name: String,
    pub interest: f64,
    pub payment: f64,
    pub principal: f64,
    pub balance_before: f64,
    pub balance_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub period: usize,
    pub payments: Vec<PaymentLine>,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl PeriodEntry {
    /// Lines whose account still owes money at the end of the period.
    pub fn remaining(&self) -> impl Iterator<Item = &PaymentLine> {
        self.payments.iter().filter(|p| p.balance_after > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub periods: Vec<PeriodEntry>,
    pub total_periods: usize,
    pub total_interest: f64,
    pub total_paid: f64,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Payoff time split into (years, months).
    pub fn years_and_months(&self) -> (usize, usize) {
        (self.total_periods / 12, self.total_periods % 12)
    }
}
