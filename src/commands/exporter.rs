// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_session;
use crate::backup;
use crate::csv_export;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(conn, sub),
        Some(("backup", sub)) => export_backup(conn, sub),
        _ => Ok(()),
    }
}

fn export_csv(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = open_session(conn, sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    csv_export::export_csv(&session.snapshot, Path::new(out))
        .with_context(|| format!("Write CSV {}", out))?;
    println!("Exported {} to {}", session.month().label(), out);
    Ok(())
}

fn export_backup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let session = open_session(conn, sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let doc = backup::export_all(conn, session.user(), session.month())?;
    std::fs::write(out, serde_json::to_string_pretty(&doc)?)
        .with_context(|| format!("Write backup {}", out))?;
    println!("Backup of {} written to {}", session.user(), out);
    Ok(())
}
