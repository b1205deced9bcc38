// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local sign-up and login.
//!
//! Users are identified by their normalised email, which also namespaces every
//! per-user key in the store. Passwords are kept as a salted SHA-256 digest.
//! This is a local convenience lock, not an authentication system.

use crate::error::{BudgetError, Result};
use crate::store::{self, SESSION_USER_KEY, USERS_KEY};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub salt: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    fn new(password: &str) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let password_hash = digest(&salt, password);
        Self {
            salt,
            password_hash,
            created_at: Utc::now(),
        }
    }

    fn verify(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.password_hash
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut h = Sha256::new();
    h.update(salt.as_bytes());
    h.update(password.as_bytes());
    hex::encode(h.finalize())
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn users(conn: &Connection) -> Result<BTreeMap<String, Credential>> {
    Ok(store::get_json(conn, USERS_KEY)?.unwrap_or_default())
}

fn save_users(conn: &Connection, users: &BTreeMap<String, Credential>) -> Result<()> {
    store::set_json(conn, USERS_KEY, users)
}

pub fn signup(conn: &Connection, email: &str, password: &str) -> Result<String> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(BudgetError::InvalidInput(
            "email and password are required".into(),
        ));
    }
    let mut all = users(conn)?;
    if all.contains_key(&email) {
        return Err(BudgetError::UserExists(email));
    }
    all.insert(email.clone(), Credential::new(password));
    save_users(conn, &all)?;
    tracing::info!(user = %email, "account created");
    Ok(email)
}

/// Verifies credentials and records the user as the active session.
pub fn login(conn: &Connection, email: &str, password: &str) -> Result<String> {
    let email = normalize_email(email);
    let all = users(conn)?;
    match all.get(&email) {
        Some(c) if c.verify(password) => {
            store::set_raw(conn, SESSION_USER_KEY, &email)?;
            Ok(email)
        }
        _ => Err(BudgetError::LoginFailed(email)),
    }
}

pub fn change_password(conn: &Connection, email: &str, old: &str, new: &str) -> Result<()> {
    let email = normalize_email(email);
    if new.is_empty() {
        return Err(BudgetError::InvalidInput("new password is empty".into()));
    }
    let mut all = users(conn)?;
    let Some(cred) = all.get_mut(&email) else {
        return Err(BudgetError::LoginFailed(email));
    };
    if !cred.verify(old) {
        return Err(BudgetError::LoginFailed(email));
    }
    let created_at = cred.created_at;
    *cred = Credential {
        created_at,
        ..Credential::new(new)
    };
    save_users(conn, &all)
}

pub fn logout(conn: &Connection) -> Result<()> {
    store::remove_raw(conn, SESSION_USER_KEY)
}

pub fn current_user(conn: &Connection) -> Result<Option<String>> {
    Ok(store::get_raw(conn, SESSION_USER_KEY)?.filter(|u| !u.is_empty()))
}

pub fn require_user(conn: &Connection) -> Result<String> {
    current_user(conn)?.ok_or(BudgetError::NotLoggedIn)
}
