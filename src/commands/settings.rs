// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::store::{self, BudgetStore};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let user = auth::require_user(conn)?;
            let store = BudgetStore::new(conn);
            match sub.get_one::<String>("symbol").map(|s| s.trim()) {
                Some("") => bail!("Currency symbol is empty"),
                Some(ccy) => {
                    store.set_currency(&user, ccy)?;
                    println!("Currency set to {}", ccy);
                }
                None => println!("{}", store.currency(&user)?),
            }
        }
        Some(("dark-mode", sub)) => {
            let on = match sub.get_one::<String>("state").unwrap().as_str() {
                "on" => true,
                "off" => false,
                _ => !store::dark_mode(conn)?,
            };
            store::set_dark_mode(conn, on)?;
            println!("{} mode enabled", if on { "Dark" } else { "Light" });
        }
        _ => {}
    }
    Ok(())
}
