// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{commit_and_report, open_session};
use crate::ledger;
use crate::metrics::progress_percent;
use crate::models::{Classification, Field, ListKind};
use crate::session::Session;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let mut session = open_session(conn, m)?;
    match m.subcommand() {
        Some(("add", sub)) => add(&mut session, sub)?,
        Some(("rename", sub)) => rename(&mut session, sub)?,
        Some(("rm", sub)) => remove(&mut session, sub)?,
        Some(("set", sub)) => set(&mut session, sub)?,
        Some(("check", sub)) => check(&mut session, sub)?,
        Some(("tags", sub)) => tags(&mut session, sub)?,
        Some(("classify", sub)) => classify(&mut session, sub)?,
        Some(("list", sub)) => list(&session, sub)?,
        _ => {}
    }
    Ok(())
}

fn list_of(sub: &clap::ArgMatches) -> Result<ListKind> {
    Ok(sub.get_one::<String>("list").unwrap().parse()?)
}

fn not_found(list: ListKind, id: &str) {
    println!("No item '{}' in {} (nothing changed)", id, list);
}

fn add(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let name = sub.get_one::<String>("name").unwrap();
    match ledger::add_item(&mut session.snapshot, list, name) {
        Some(item) => println!(
            "Added '{}' to {} as {} (id {})",
            item.name, list, item.category, item.id
        ),
        None => println!("Item name is empty; nothing added"),
    }
    commit_and_report(session)?;
    Ok(())
}

fn rename(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    if ledger::rename_item(&mut session.snapshot, list, id, name) {
        println!("Renamed {} to '{}'", id, name.trim());
    } else {
        not_found(list, id);
    }
    commit_and_report(session)?;
    Ok(())
}

fn remove(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    match ledger::delete_item(&mut session.snapshot, list, id) {
        Some(item) => println!("Deleted '{}'", item.name),
        None => not_found(list, id),
    }
    commit_and_report(session)?;
    Ok(())
}

fn set(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    let field: Field = sub.get_one::<String>("field").unwrap().parse()?;
    let raw = sub.get_one::<String>("value").unwrap();
    if !ledger::set_field(&mut session.snapshot, list, id, field, raw) {
        not_found(list, id);
    }
    commit_and_report(session)?;
    Ok(())
}

fn check(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    let on = !sub.get_flag("off");
    if !ledger::set_checked(&mut session.snapshot, list, id, on) {
        not_found(list, id);
    }
    commit_and_report(session)?;
    Ok(())
}

fn tags(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    let tags: Vec<String> = sub
        .get_many::<String>("tags")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    if !ledger::set_tags(&mut session.snapshot, list, id, &tags) {
        not_found(list, id);
    }
    commit_and_report(session)?;
    Ok(())
}

fn classify(session: &mut Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let list = list_of(sub)?;
    let id = sub.get_one::<String>("id").unwrap();
    let to = sub
        .get_one::<String>("as")
        .map(|s| s.parse::<Classification>())
        .transpose()?;
    if !ledger::reclassify(&mut session.snapshot, list, id, to) {
        not_found(list, id);
    }
    commit_and_report(session)?;
    Ok(())
}

#[derive(Serialize)]
pub struct ItemRow {
    pub list: ListKind,
    pub id: String,
    pub name: String,
    pub planned: String,
    pub actual: String,
    pub progress: String,
    pub checked: bool,
    pub tags: String,
    pub classification: Classification,
}

pub fn item_rows(session: &Session<'_>, only: Option<ListKind>) -> Vec<ItemRow> {
    session
        .snapshot
        .items()
        .filter(|(l, _)| only.is_none_or(|o| o == *l))
        .map(|(list, it)| ItemRow {
            list,
            id: it.id.clone(),
            name: it.name.clone(),
            planned: format!("{:.2}", it.planned),
            actual: format!("{:.2}", it.actual),
            progress: fmt_pct(&progress_percent(it.planned, it.actual)),
            checked: it.checked,
            tags: it.tags.join(";"),
            classification: it.category,
        })
        .collect()
}

fn list(session: &Session<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let only = sub
        .get_one::<String>("list")
        .map(|s| s.parse::<ListKind>())
        .transpose()?;
    let data = item_rows(session, only);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = session.currency();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.list.to_string(),
                    r.id.clone(),
                    r.name.clone(),
                    format!("{}{}", ccy, r.planned),
                    format!("{}{}", ccy, r.actual),
                    r.progress.clone(),
                    if r.checked { "✓".into() } else { String::new() },
                    r.tags.clone(),
                    r.classification.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["List", "ID", "Name", "Planned", "Actual", "Progress", "Paid", "Tags", "Type"],
                rows,
            )
        );
        let t = crate::metrics::totals(&session.snapshot);
        println!(
            "{} · left {}",
            session.month().label(),
            fmt_money(&crate::metrics::balance(&t), ccy)
        );
    }
    Ok(())
}
