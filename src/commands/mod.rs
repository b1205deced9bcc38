// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod account;
pub mod alerts;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod items;
pub mod months;
pub mod recurring;
pub mod reports;
pub mod settings;

use crate::auth;
use crate::month::MonthKey;
use crate::session::{Recompute, Session};
use crate::utils::fmt_money;
use anyhow::Result;
use rusqlite::Connection;

/// Month selected with the global `--month` flag, or the undated sheet.
pub fn selected_month(m: &clap::ArgMatches) -> Result<MonthKey> {
    match m.try_get_one::<String>("month").ok().flatten() {
        Some(raw) => Ok(MonthKey::from_month_str(raw)?),
        None => Ok(MonthKey::current()),
    }
}

/// Starts a session for the logged-in user on the selected month, applying
/// any recurring templates that have come due.
pub fn open_session<'c>(conn: &'c Connection, m: &clap::ArgMatches) -> Result<Session<'c>> {
    let user = auth::require_user(conn)?;
    let month = selected_month(m)?;
    let today = chrono::Utc::now().date_naive();
    let (session, applied) = Session::begin(conn, &user, month, today)?;
    for a in &applied {
        println!(
            "Applied recurring '{}' to {} (next due {})",
            a.name, a.list, a.next_due_date
        );
    }
    Ok(session)
}

/// Commits the session and prints the one-line balance plus any alerts.
pub fn commit_and_report(session: &mut Session<'_>) -> Result<Recompute> {
    let r = session.commit(chrono::Utc::now())?;
    println!(
        "Saved {} · balance {}",
        session.month().label(),
        fmt_money(&r.balance, session.currency())
    );
    for a in &r.alerts {
        eprintln!("{}", a);
    }
    Ok(r)
}
