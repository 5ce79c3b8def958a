// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ScheduleError;
use crate::models::{BalanceRecord, PaymentLine, PeriodEntry, Schedule};
use log::{debug, trace, warn};

/// Schedules that reach this many months are rejected as runaway.
pub const MAX_PERIODS: usize = 1000;

pub fn monthly_interest(balance: f64, monthly_rate: f64) -> f64 {
    balance * monthly_rate
}

/// Sum of minimum payments over records that still owe money.
pub fn required_minimum(records: &[BalanceRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.balance > 0.0)
        .map(|r| r.minimum_payment)
        .sum()
}

/// Build a debt snowball schedule.
///
/// Every active account gets its minimum (bumped to cover interest if needed),
/// then everything left of `monthly_budget` goes to the first unpaid account of
/// the working set. The working set is sorted by starting balance once and never
/// re-sorted, so the target is always the smallest-starting-balance account
/// still open, ties broken by input order.
///
/// `records` is not modified; balances are tracked in a per-run vector indexed
/// like `records`.
pub fn compute_schedule(
    records: &[BalanceRecord],
    monthly_budget: f64,
) -> Result<Schedule, ScheduleError> {
    if !monthly_budget.is_finite() {
        return Err(ScheduleError::InvalidBudget(monthly_budget));
    }

    let mut active: Vec<usize> = (0..records.len())
        .filter(|&i| records[i].balance > 0.0)
        .collect();
    let required = active.iter().map(|&i| records[i].minimum_payment).sum::<f64>();

    if monthly_budget < required {
        return Err(ScheduleError::BudgetBelowMinimum {
            budget: monthly_budget,
            required,
        });
    }
    if active.is_empty() {
        debug!("no positive balances, nothing to schedule");
        return Ok(Schedule::default());
    }

    // stable: equal balances keep input order
    active.sort_by(|&a, &b| records[a].balance.total_cmp(&records[b].balance));

    let extra_budget = monthly_budget - required;
    let mut balances: Vec<f64> = records.iter().map(|r| r.balance).collect();
    let mut schedule = Schedule::default();

    debug!(
        "scheduling {} accounts: budget {:.2}, minimums {:.2}, extra {:.2}",
        active.len(),
        monthly_budget,
        required,
        extra_budget
    );

    while !active.is_empty() {
        let period = schedule.periods.len() + 1;
        let mut payments = Vec::with_capacity(active.len());

        for &idx in &active {
            let record = &records[idx];
            let balance_before = balances[idx];
            let interest = monthly_interest(balance_before, record.monthly_rate());

            let mut payment = record.minimum_payment;
            if payment < interest {
                payment = interest;
            }
            let mut principal = (payment - interest).max(0.0);
            // a minimum above what is owed only pays off the balance, so
            // total paid stays interest plus starting debt
            if principal > balance_before {
                principal = balance_before;
                payment = interest + principal;
            }
            let balance_after = (balance_before - principal).max(0.0);
            balances[idx] = balance_after;

            payments.push(PaymentLine {
                account: idx,
                name: record.name.clone(),
                interest,
                payment,
                principal,
                balance_before,
                balance_after,
            });
        }

        if extra_budget > 0.0 {
            let target = active[0];
            if balances[target] > 0.0 {
                let applied = extra_budget.min(balances[target]);
                balances[target] -= applied;
                let line = &mut payments[0];
                line.payment += applied;
                line.principal += applied;
                line.balance_after = balances[target];
            }
        }

        active.retain(|&i| balances[i] > 0.0);

        let total_paid = payments.iter().map(|p| p.payment).sum::<f64>();
        let total_interest = payments.iter().map(|p| p.interest).sum::<f64>();
        trace!(
            "period {}: paid {:.2}, interest {:.2}, {} accounts open",
            period,
            total_paid,
            total_interest,
            active.len()
        );

        schedule.total_paid += total_paid;
        schedule.total_interest += total_interest;
        schedule.periods.push(PeriodEntry {
            period,
            payments,
            total_paid,
            total_interest,
        });

        if period >= MAX_PERIODS {
            warn!("schedule reached {} periods, giving up", MAX_PERIODS);
            return Err(ScheduleError::RunawaySchedule { limit: MAX_PERIODS });
        }
    }

    schedule.total_periods = schedule.periods.len();
    debug!(
        "paid off in {} periods, interest {:.2}, total {:.2}",
        schedule.total_periods, schedule.total_interest, schedule.total_paid
    );
    Ok(schedule)
}
