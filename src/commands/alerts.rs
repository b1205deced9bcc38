// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_session;
use crate::metrics;
use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("check", sub)) => check(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let cfg = store::alerts_config(conn)?;
    let rows: Vec<Vec<String>> = vec![
        vec![
            "expenses+bills threshold".into(),
            format!("{}%", cfg.thresholds.expenses_percent),
        ],
        vec![
            "bills threshold".into(),
            format!("{}%", cfg.thresholds.bills_percent),
        ],
        vec![
            "notify".into(),
            if cfg.notify_when_over_budget { "on" } else { "off" }.into(),
        ],
        vec!["cooldown".into(), format!("{} min", cfg.cooldown_minutes)],
        vec![
            "silenced until".into(),
            cfg.cooldown_until
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".into()),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut cfg = store::alerts_config(conn)?;
    if let Some(v) = sub.get_one::<String>("expenses_percent") {
        cfg.thresholds.expenses_percent = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("bills_percent") {
        cfg.thresholds.bills_percent = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<i64>("cooldown_minutes") {
        cfg.cooldown_minutes = (*v).max(0);
    }
    if let Some(v) = sub.get_one::<String>("notify") {
        cfg.notify_when_over_budget = v == "on";
    }
    store::save_alerts_config(conn, &cfg)?;
    println!("Alert settings saved");
    Ok(())
}

fn check(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = open_session(conn, sub)?;
    let mut cfg = store::alerts_config(conn)?;
    let before = cfg.cooldown_until;
    let events = metrics::alert_conditions(&session.snapshot, &mut cfg, chrono::Utc::now());
    if cfg.cooldown_until != before {
        store::save_alerts_config(conn, &cfg)?;
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &events)? {
        if events.is_empty() {
            println!("No alerts");
        }
        for e in &events {
            println!("{}", e);
        }
    }
    Ok(())
}
