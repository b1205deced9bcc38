// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use anyhow::Result;
use rusqlite::Connection;

pub fn signup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = auth::signup(conn, email, password)?;
    println!("Account created for {}. Please login.", user);
    Ok(())
}

pub fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = auth::login(conn, email, password)?;
    println!("Logged in as {}", user);
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    auth::logout(conn)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    match auth::current_user(conn)? {
        Some(u) => println!("{}", u),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn passwd(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_user(conn)?;
    let old = sub.get_one::<String>("old").unwrap();
    let new = sub.get_one::<String>("new").unwrap();
    auth::change_password(conn, &user, old, new)?;
    println!("Password updated for {}", user);
    Ok(())
}
