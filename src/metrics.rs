// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over a snapshot. Nothing here touches storage; the only
//! mutation is the alert cooldown stamp and the goal cache, both explicit
//! `&mut` parameters.

use crate::ledger::total;
use crate::models::{AlertsConfig, BudgetSnapshot, Classification, Field, Goal, ListKind};
use crate::month::MonthKey;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `part` as a percentage of `whole`, saturating instead of overflowing.
/// Callers guarantee `whole > 0`.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .map(|q| q.saturating_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub bills: Decimal,
    pub savings: Decimal,
    pub debt: Decimal,
}

impl Totals {
    pub fn get(&self, list: ListKind) -> Decimal {
        match list {
            ListKind::Income => self.income,
            ListKind::Bills => self.bills,
            ListKind::Expenses => self.expenses,
            ListKind::Savings => self.savings,
            ListKind::Debt => self.debt,
        }
    }
}

fn field_totals(snap: &BudgetSnapshot, field: Field) -> Totals {
    Totals {
        income: total(snap, ListKind::Income, field),
        expenses: total(snap, ListKind::Expenses, field),
        bills: total(snap, ListKind::Bills, field),
        savings: total(snap, ListKind::Savings, field),
        debt: total(snap, ListKind::Debt, field),
    }
}

/// Actual amounts per list.
pub fn totals(snap: &BudgetSnapshot) -> Totals {
    field_totals(snap, Field::Actual)
}

pub fn planned_totals(snap: &BudgetSnapshot) -> Totals {
    field_totals(snap, Field::Planned)
}

/// What is left of income after every outgoing list. May be negative.
pub fn balance(t: &Totals) -> Decimal {
    t.income
        .saturating_sub(t.expenses)
        .saturating_sub(t.bills)
        .saturating_sub(t.savings)
        .saturating_sub(t.debt)
}

/// Share of plan used. Nothing planned counts as on track (100).
pub fn progress_percent(planned: Decimal, actual: Decimal) -> Decimal {
    if planned > Decimal::ZERO {
        percent_of(actual, planned)
    } else {
        HUNDRED
    }
}

pub fn savings_rate(t: &Totals) -> Decimal {
    if t.income > Decimal::ZERO {
        percent_of(t.savings, t.income)
    } else {
        Decimal::ZERO
    }
}

/// Half-gauge input: saved share and the remainder, floored at zero.
pub fn savings_gauge(t: &Totals) -> [Decimal; 2] {
    let rate = savings_rate(t);
    [rate, (HUNDRED - rate).max(Decimal::ZERO)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    WithinBudget,
    OverBudget,
    TargetMet,
    BelowTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleBucket {
    pub name: &'static str,
    pub actual: Decimal,
    pub target: Decimal,
    pub share_of_income: Decimal,
    pub status: RuleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSplit {
    pub income: Decimal,
    pub needs: RuleBucket,
    pub wants: RuleBucket,
    pub savings: RuleBucket,
}

fn share(part: Decimal, income: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        percent_of(part, income)
    } else {
        Decimal::ZERO
    }
}

/// 50/30/20 breakdown. Needs and wants are ceilings; savings is a floor.
pub fn rule_split(snap: &BudgetSnapshot) -> RuleSplit {
    let t = totals(snap);
    let essential_expenses: Decimal = snap
        .expenses
        .iter()
        .filter(|it| it.category == Classification::Needs)
        .fold(Decimal::ZERO, |acc, it| acc.saturating_add(it.actual));
    let needs = t.bills.saturating_add(essential_expenses);
    let wants = t.expenses.saturating_sub(essential_expenses);
    let income = t.income;

    let ceiling = |name: &'static str, actual: Decimal, pct: i64| {
        let target = income / HUNDRED * Decimal::from(pct);
        RuleBucket {
            name,
            actual,
            target,
            share_of_income: share(actual, income),
            status: if actual > target {
                RuleStatus::OverBudget
            } else {
                RuleStatus::WithinBudget
            },
        }
    };
    let savings_target = income / HUNDRED * Decimal::from(20);

    RuleSplit {
        income,
        needs: ceiling("Needs", needs, 50),
        wants: ceiling("Wants", wants, 30),
        savings: RuleBucket {
            name: "Savings",
            actual: t.savings,
            target: savings_target,
            share_of_income: share(t.savings, income),
            status: if t.savings >= savings_target {
                RuleStatus::TargetMet
            } else {
                RuleStatus::BelowTarget
            },
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertEvent {
    /// Expenses plus bills reached the configured share of income
    SpendingThreshold { percent: Decimal },
    /// Bills alone reached their configured share of income
    BillsThreshold { percent: Decimal },
    /// A list's actual exceeds its plan by more than 20%
    OverPlanned { list: ListKind, percent_over: Decimal },
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertEvent::SpendingThreshold { percent } => write!(
                f,
                "Alert: you have used {}% of your income on expenses+bills",
                percent.round()
            ),
            AlertEvent::BillsThreshold { percent } => write!(
                f,
                "Alert: bills take {}% of your income",
                percent.round()
            ),
            AlertEvent::OverPlanned { list, percent_over } => write!(
                f,
                "Warning: {} exceeded planned by {}%",
                list,
                percent_over.round()
            ),
        }
    }
}

/// Evaluates alert conditions at `now`.
///
/// Income thresholds are suppressed while `cfg.cooldown_until` is in the
/// future and, when they fire, push the cooldown forward. Over-plan warnings
/// are not subject to the cooldown.
pub fn alert_conditions(
    snap: &BudgetSnapshot,
    cfg: &mut AlertsConfig,
    now: DateTime<Utc>,
) -> Vec<AlertEvent> {
    let mut events = Vec::new();
    if !cfg.notify_when_over_budget {
        return events;
    }
    let actual = totals(snap);
    let planned = planned_totals(snap);

    let cooling = cfg.cooldown_until.is_some_and(|until| now < until);
    if actual.income > Decimal::ZERO && !cooling {
        let spend_pct = percent_of(actual.expenses.saturating_add(actual.bills), actual.income);
        let bills_pct = percent_of(actual.bills, actual.income);
        let mut fired = false;
        if spend_pct >= cfg.thresholds.expenses_percent {
            events.push(AlertEvent::SpendingThreshold { percent: spend_pct });
            fired = true;
        }
        if bills_pct >= cfg.thresholds.bills_percent {
            events.push(AlertEvent::BillsThreshold { percent: bills_pct });
            fired = true;
        }
        if fired {
            cfg.cooldown_until = Duration::try_minutes(cfg.cooldown_minutes)
                .and_then(|d| now.checked_add_signed(d))
                .or(Some(DateTime::<Utc>::MAX_UTC));
        }
    }

    let limit = Decimal::new(12, 1);
    for list in ListKind::OUTGOING {
        let (p, a) = (planned.get(list), actual.get(list));
        if p > Decimal::ZERO && a > p.saturating_mul(limit) {
            events.push(AlertEvent::OverPlanned {
                list,
                percent_over: percent_of(a, p).saturating_sub(HUNDRED),
            });
        }
    }
    events
}

/// Refreshes the cached `current` of every goal from this month's savings.
pub fn refresh_goals(goals: &mut [Goal], savings_total: Decimal) {
    for g in goals.iter_mut() {
        g.current = g.target.min(savings_total);
    }
}

pub fn goal_progress(goal: &Goal) -> Decimal {
    if goal.target > Decimal::ZERO {
        percent_of(goal.current, goal.target).min(HUNDRED)
    } else {
        Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Decimal>,
}

/// Chart input: one label per x position, one series per plotted line/bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

pub const TREND_WINDOW: usize = 6;

/// Income, expenses, bills and savings over the most recent saved months.
pub fn trend_series(months: &[(MonthKey, BudgetSnapshot)]) -> ChartSeries {
    let mut ordered: Vec<&(MonthKey, BudgetSnapshot)> = months.iter().collect();
    ordered.sort_by(|a, b| a.0.chronological_cmp(&b.0));
    let skip = ordered.len().saturating_sub(TREND_WINDOW);
    let window: Vec<(String, Totals)> = ordered
        .into_iter()
        .skip(skip)
        .map(|(k, s)| (k.label(), totals(s)))
        .collect();

    let lists = [
        ListKind::Income,
        ListKind::Expenses,
        ListKind::Bills,
        ListKind::Savings,
    ];
    ChartSeries {
        labels: window.iter().map(|(l, _)| l.clone()).collect(),
        series: lists
            .iter()
            .map(|l| Series {
                name: l.label().to_string(),
                values: window.iter().map(|(_, t)| t.get(*l)).collect(),
            })
            .collect(),
    }
}

/// Planned against actual for each outgoing list.
pub fn budget_vs_actual(snap: &BudgetSnapshot) -> ChartSeries {
    let planned = planned_totals(snap);
    let actual = totals(snap);
    ChartSeries {
        labels: ListKind::OUTGOING.iter().map(|l| l.label().to_string()).collect(),
        series: vec![
            Series {
                name: "Planned".into(),
                values: ListKind::OUTGOING.iter().map(|l| planned.get(*l)).collect(),
            },
            Series {
                name: "Actual".into(),
                values: ListKind::OUTGOING.iter().map(|l| actual.get(*l)).collect(),
            },
        ],
    }
}

/// Side-by-side actual totals of two months across all five lists.
pub fn compare_months(
    a: (&MonthKey, &BudgetSnapshot),
    b: (&MonthKey, &BudgetSnapshot),
) -> ChartSeries {
    let order = [
        ListKind::Income,
        ListKind::Expenses,
        ListKind::Bills,
        ListKind::Savings,
        ListKind::Debt,
    ];
    let column = |(k, s): (&MonthKey, &BudgetSnapshot)| {
        let t = totals(s);
        Series {
            name: k.label(),
            values: order.iter().map(|l| t.get(*l)).collect(),
        }
    };
    ChartSeries {
        labels: order.iter().map(|l| l.label().to_string()).collect(),
        series: vec![column(a), column(b)],
    }
}
