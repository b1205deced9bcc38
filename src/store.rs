// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence.
//!
//! Every record lives in the `kv` table under a string key. Per-user records
//! are namespaced as `user_{email}_{name}`; a handful of preferences are
//! global. Reads never fail on a missing key, and a value that no longer
//! decodes is logged and treated as absent so callers fall back to defaults.

use crate::error::Result;
use crate::models::{AlertsConfig, BudgetSnapshot, Goal, RecurringTemplate};
use crate::month::MonthKey;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

pub const USERS_KEY: &str = "budget_users";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const ALERTS_CONFIG_KEY: &str = "budget_alerts_config_v1";
pub const SESSION_USER_KEY: &str = "session_user";

const SAVED_MONTHS: &str = "savedMonthsList";
const RECURRING: &str = "recurring";
const GOALS: &str = "goals";
const CURRENCY: &str = "currency";

pub const DEFAULT_CURRENCY: &str = "₹";

pub fn user_key(email: &str, name: &str) -> String {
    format!("user_{}_{}", email, name)
}

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
        .optional()?;
    Ok(v)
}

pub fn set_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove_raw(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key=?1", params![key])?;
    Ok(())
}

/// Decodes the JSON stored at `key`; corrupt payloads come back as `None`.
pub fn get_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let Some(raw) = get_raw(conn, key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(v) => Ok(Some(v)),
        Err(err) => {
            tracing::warn!(key, %err, "discarding unreadable stored value");
            Ok(None)
        }
    }
}

pub fn set_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    set_raw(conn, key, &raw)
}

pub fn dark_mode(conn: &Connection) -> Result<bool> {
    Ok(get_raw(conn, DARK_MODE_KEY)?.as_deref() == Some("true"))
}

pub fn set_dark_mode(conn: &Connection, on: bool) -> Result<()> {
    set_raw(conn, DARK_MODE_KEY, if on { "true" } else { "false" })
}

pub fn alerts_config(conn: &Connection) -> Result<AlertsConfig> {
    Ok(get_json(conn, ALERTS_CONFIG_KEY)?.unwrap_or_default())
}

pub fn save_alerts_config(conn: &Connection, cfg: &AlertsConfig) -> Result<()> {
    set_json(conn, ALERTS_CONFIG_KEY, cfg)
}

/// Per-user view over the key-value table.
#[derive(Clone, Copy)]
pub struct BudgetStore<'c> {
    conn: &'c Connection,
}

impl<'c> BudgetStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }

    /// Persisted snapshot for the month, or a fresh starter snapshot that is
    /// not written until the caller saves it.
    pub fn get(&self, user: &str, month: &MonthKey) -> Result<BudgetSnapshot> {
        Ok(self.load(user, month)?.unwrap_or_else(BudgetSnapshot::starter))
    }

    /// Exact lookup without defaulting.
    pub fn load(&self, user: &str, month: &MonthKey) -> Result<Option<BudgetSnapshot>> {
        get_json(self.conn, &user_key(user, month.as_str()))
    }

    pub fn put(&self, user: &str, month: &MonthKey, snapshot: &BudgetSnapshot) -> Result<()> {
        set_json(self.conn, &user_key(user, month.as_str()), snapshot)?;
        let mut months = self.list_months(user)?;
        if !months.contains(month) {
            months.push(month.clone());
            set_json(self.conn, &user_key(user, SAVED_MONTHS), &months)?;
        }
        Ok(())
    }

    pub fn list_months(&self, user: &str) -> Result<Vec<MonthKey>> {
        Ok(get_json(self.conn, &user_key(user, SAVED_MONTHS))?.unwrap_or_default())
    }

    /// Removes the snapshot and its index entry. Unknown months are ignored.
    pub fn delete(&self, user: &str, month: &MonthKey) -> Result<()> {
        remove_raw(self.conn, &user_key(user, month.as_str()))?;
        let mut months = self.list_months(user)?;
        let before = months.len();
        months.retain(|m| m != month);
        if months.len() != before {
            set_json(self.conn, &user_key(user, SAVED_MONTHS), &months)?;
        }
        Ok(())
    }

    /// Every indexed month that still decodes, in chronological order.
    pub fn saved_snapshots(&self, user: &str) -> Result<Vec<(MonthKey, BudgetSnapshot)>> {
        let mut months = self.list_months(user)?;
        months.sort_by(|a, b| a.chronological_cmp(b));
        let mut out = Vec::with_capacity(months.len());
        for m in months {
            if let Some(snap) = self.load(user, &m)? {
                out.push((m, snap));
            }
        }
        Ok(out)
    }

    pub fn recurring(&self, user: &str) -> Result<Vec<RecurringTemplate>> {
        Ok(get_json(self.conn, &user_key(user, RECURRING))?.unwrap_or_default())
    }

    pub fn save_recurring(&self, user: &str, list: &[RecurringTemplate]) -> Result<()> {
        set_json(self.conn, &user_key(user, RECURRING), list)
    }

    pub fn goals(&self, user: &str) -> Result<Vec<Goal>> {
        Ok(get_json(self.conn, &user_key(user, GOALS))?.unwrap_or_default())
    }

    pub fn save_goals(&self, user: &str, goals: &[Goal]) -> Result<()> {
        set_json(self.conn, &user_key(user, GOALS), goals)
    }

    pub fn currency(&self, user: &str) -> Result<String> {
        Ok(get_raw(self.conn, &user_key(user, CURRENCY))?
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }

    pub fn set_currency(&self, user: &str, currency: &str) -> Result<()> {
        set_raw(self.conn, &user_key(user, CURRENCY), currency)
    }
}
