// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{commit_and_report, open_session};
use crate::auth;
use crate::models::Frequency;
use crate::recurring;
use crate::store::BudgetStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("apply", sub)) => apply_now(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let store = BudgetStore::new(conn);
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let list = sub.get_one::<String>("list").unwrap();
    let frequency: Frequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let next = match sub.get_one::<String>("next") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let auto_apply = !sub.get_flag("manual");
    let template = recurring::new_template(name, amount, list, frequency, next, auto_apply)?;

    let mut all = store.recurring(&user)?;
    println!(
        "Recurring transaction added: '{}' {} {} into {} from {} (id {})",
        template.name,
        template.amount,
        template.frequency.as_str(),
        template.category,
        template.next_due_date,
        template.id
    );
    all.push(template);
    store.save_recurring(&user, &all)?;
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let all = BudgetStore::new(conn).recurring(&user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &all)? {
        let rows = all
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.name.clone(),
                    format!("{:.2}", t.amount),
                    t.category.clone(),
                    t.frequency.as_str().to_string(),
                    t.next_due_date.to_string(),
                    if t.auto_apply { "auto" } else { "manual" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Amount", "List", "Frequency", "Next due", "Mode"],
                rows
            )
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let store = BudgetStore::new(conn);
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut all = store.recurring(&user)?;
    let before = all.len();
    all.retain(|t| t.id != id);
    if all.len() == before {
        println!("No recurring transaction '{}'", id);
        return Ok(());
    }
    store.save_recurring(&user, &all)?;
    println!("Removed recurring transaction {}", id);
    Ok(())
}

fn apply_now(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut session = open_session(conn, sub)?;
    let store = session.store();
    let id = sub.get_one::<String>("id").unwrap().trim();
    let mut all = store.recurring(session.user())?;
    let Some(template) = all.iter_mut().find(|t| t.id == id) else {
        println!("No recurring transaction '{}'", id);
        return Ok(());
    };
    let outcome = recurring::apply(template, &mut session.snapshot)?;
    store.save_recurring(session.user(), &all)?;
    println!(
        "{} '{}' in {}; next due {}",
        if outcome.created { "Created" } else { "Topped up" },
        outcome.name,
        outcome.list,
        outcome.next_due_date
    );
    commit_and_report(&mut session)?;
    Ok(())
}
