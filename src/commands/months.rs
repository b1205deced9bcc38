// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::selected_month;
use crate::auth;
use crate::metrics::{self, progress_percent};
use crate::models::ListKind;
use crate::month::MonthKey;
use crate::store::BudgetStore;
use crate::utils::{fmt_pct, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let store = BudgetStore::new(conn);
    match m.subcommand() {
        Some(("list", sub)) => list(&store, &user, sub)?,
        Some(("show", sub)) => show(&store, &user, sub)?,
        Some(("rm", sub)) => remove(&store, &user, sub)?,
        Some(("compare", sub)) => compare(&store, &user, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct MonthRow {
    key: String,
    label: String,
    income: String,
    expenses: String,
    balance: String,
}

fn list(store: &BudgetStore<'_>, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let mut data: Vec<MonthRow> = store
        .saved_snapshots(user)?
        .into_iter()
        .map(|(k, snap)| {
            let t = metrics::totals(&snap);
            MonthRow {
                key: k.to_string(),
                label: k.label(),
                income: format!("{:.2}", t.income),
                expenses: format!("{:.2}", t.expenses),
                balance: format!("{:.2}", metrics::balance(&t)),
            }
        })
        .collect();
    data.reverse();
    if data.is_empty() {
        println!("No saved months");
        return Ok(());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.label, r.key, r.income, r.expenses, r.balance])
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Key", "Income", "Expenses", "Balance"], rows)
        );
    }
    Ok(())
}

fn show(store: &BudgetStore<'_>, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let month = selected_month(sub)?;
    let snap = store
        .load(user, &month)?
        .with_context(|| format!("Month {} has no saved data", month.label()))?;
    let planned = metrics::planned_totals(&snap);
    let actual = metrics::totals(&snap);
    let data: Vec<Vec<String>> = ListKind::ALL
        .iter()
        .map(|l| {
            vec![
                l.label().to_string(),
                format!("{:.2}", planned.get(*l)),
                format!("{:.2}", actual.get(*l)),
                fmt_pct(&progress_percent(planned.get(*l), actual.get(*l))),
            ]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", month.label());
        println!(
            "{}",
            pretty_table(&["List", "Planned", "Actual", "Progress"], data)
        );
    }
    Ok(())
}

fn remove(store: &BudgetStore<'_>, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let key = MonthKey::from_month_str(sub.get_one::<String>("key").unwrap())?;
    store.delete(user, &key)?;
    println!("Month {} deleted", key.label());
    Ok(())
}

fn compare(store: &BudgetStore<'_>, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let ka = MonthKey::from_month_str(sub.get_one::<String>("a").unwrap())?;
    let kb = MonthKey::from_month_str(sub.get_one::<String>("b").unwrap())?;
    let (Some(a), Some(b)) = (store.load(user, &ka)?, store.load(user, &kb)?) else {
        anyhow::bail!("One or both months not found");
    };
    let chart = metrics::compare_months((&ka, &a), (&kb, &b));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &chart)? {
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
        let (la, lb) = (ka.label(), kb.label());
        println!("{}", pretty_table(&["List", la.as_str(), lb.as_str()], rows));
    }
    Ok(())
}
