// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_session;
use crate::metrics::{self, ChartSeries, RuleBucket, RuleStatus};
use crate::report;
use crate::session::Session;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let session = open_session(conn, m)?;
    match m.subcommand() {
        Some(("summary", sub)) => summary(&session, sub)?,
        Some(("rule", sub)) => rule(&session, sub)?,
        Some(("savings-rate", sub)) => savings_rate(&session, sub)?,
        Some(("trends", sub)) => trends(&session, sub)?,
        Some(("budget-vs-actual", sub)) => budget_vs_actual(&session, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let r = report::build(
        session.user(),
        session.month(),
        session.currency(),
        &session.snapshot,
        chrono::Utc::now().date_naive(),
    );
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    let ccy = session.currency();
    println!("Budget Report · {} · {} · {}", r.user, r.month, r.generated_on);
    let totals = vec![
        vec!["Income".to_string(), fmt_money(&r.totals.income, ccy)],
        vec!["Expenses".to_string(), fmt_money(&r.totals.expenses, ccy)],
        vec!["Bills".to_string(), fmt_money(&r.totals.bills, ccy)],
        vec!["Savings".to_string(), fmt_money(&r.totals.savings, ccy)],
        vec!["Debt".to_string(), fmt_money(&r.totals.debt, ccy)],
        vec!["Balance".to_string(), fmt_money(&r.balance, ccy)],
        vec!["Savings rate".to_string(), fmt_pct(&r.savings_rate)],
    ];
    println!("{}", pretty_table(&["", "Amount"], totals));
    let lines = r
        .lines
        .iter()
        .map(|l| {
            vec![
                l.list.label().to_string(),
                l.name.clone(),
                fmt_money(&l.planned, ccy),
                fmt_money(&l.actual, ccy),
                fmt_pct(&l.progress),
                l.classification.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["List", "Item", "Planned", "Actual", "Progress", "Type"],
            lines
        )
    );
    Ok(())
}

fn status_label(s: RuleStatus) -> &'static str {
    match s {
        RuleStatus::WithinBudget => "within budget",
        RuleStatus::OverBudget => "OVER budget",
        RuleStatus::TargetMet => "target met",
        RuleStatus::BelowTarget => "below target",
    }
}

fn rule(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let split = metrics::rule_split(&session.snapshot);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &split)? {
        return Ok(());
    }
    let ccy = session.currency();
    let row = |b: &RuleBucket| {
        vec![
            b.name.to_string(),
            fmt_money(&b.target, ccy),
            fmt_money(&b.actual, ccy),
            fmt_pct(&b.share_of_income),
            status_label(b.status).to_string(),
        ]
    };
    println!("Income: {}", fmt_money(&split.income, ccy));
    println!(
        "{}",
        pretty_table(
            &["Bucket", "Target", "Actual", "% of income", "Status"],
            vec![row(&split.needs), row(&split.wants), row(&split.savings)],
        )
    );
    Ok(())
}

fn savings_rate(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let t = metrics::totals(&session.snapshot);
    let [rate, rest] = metrics::savings_gauge(&t);
    let v = json!({ "savingsRate": rate, "rest": rest });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        println!("Savings rate: {}", fmt_pct(&rate));
    }
    Ok(())
}

fn print_chart(chart: &ChartSeries, first: &str) {
    let mut headers = vec![first];
    headers.extend(chart.series.iter().map(|s| s.name.as_str()));
    let rows = chart
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            row.extend(chart.series.iter().map(|s| format!("{:.2}", s.values[i])));
            row
        })
        .collect();
    println!("{}", pretty_table(&headers, rows));
}

fn trends(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let months = session.store().saved_snapshots(session.user())?;
    let chart = metrics::trend_series(&months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &chart)? {
        if chart.labels.is_empty() {
            println!("No saved months yet");
            return Ok(());
        }
        print_chart(&chart, "Month");
    }
    Ok(())
}

fn budget_vs_actual(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let chart = metrics::budget_vs_actual(&session.snapshot);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &chart)? {
        print_chart(&chart, "List");
    }
    Ok(())
}
