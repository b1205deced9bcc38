// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::backup;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(conn, sub),
        _ => Ok(()),
    }
}

fn import_backup(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    let summary = backup::import_all(conn, &user, &raw)
        .with_context(|| format!("Restore backup {}", path))?;
    println!(
        "Backup restored from {}: {} month(s), {} goal(s), {} recurring",
        path,
        summary.months,
        summary.goals.map_or("unchanged".to_string(), |n| n.to_string()),
        summary.recurring.map_or("unchanged".to_string(), |n| n.to_string()),
    );
    Ok(())
}
