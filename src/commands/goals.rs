// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_session;
use crate::metrics::{self, goal_progress};
use crate::models::Goal;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let session = open_session(conn, m)?;
    let store = session.store();
    let user = session.user();
    let mut goals = store.goals(user)?;
    let savings = metrics::totals(&session.snapshot).savings;

    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            if name.is_empty() {
                bail!("Goal name is empty");
            }
            if target <= Decimal::ZERO {
                bail!("Invalid target '{}': must be greater than zero", target);
            }
            goals.push(Goal {
                name: name.clone(),
                target,
                current: Decimal::ZERO,
                created_at: chrono::Utc::now(),
            });
            metrics::refresh_goals(&mut goals, savings);
            store.save_goals(user, &goals)?;
            println!("Goal added: {}", name);
        }
        Some(("list", sub)) => {
            metrics::refresh_goals(&mut goals, savings);
            store.save_goals(user, &goals)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
                if goals.is_empty() {
                    println!("No goals yet");
                    return Ok(());
                }
                let ccy = session.currency();
                let rows = goals
                    .iter()
                    .enumerate()
                    .map(|(i, g)| {
                        vec![
                            (i + 1).to_string(),
                            g.name.clone(),
                            fmt_money(&g.current, ccy),
                            fmt_money(&g.target, ccy),
                            fmt_pct(&goal_progress(g)),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["#", "Goal", "Saved", "Target", "Progress"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let idx = *sub.get_one::<usize>("index").unwrap();
            if idx == 0 || idx > goals.len() {
                println!("No goal at position {}", idx);
                return Ok(());
            }
            let removed = goals.remove(idx - 1);
            store.save_goals(user, &goals)?;
            println!("Goal deleted: {}", removed.name);
        }
        _ => {}
    }
    Ok(())
}
