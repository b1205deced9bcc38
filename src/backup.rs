// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-account backup document.
//!
//! Import validates the required top-level fields before touching storage and
//! then writes inside one SQLite transaction. Fields missing from the
//! document leave the corresponding stored records as they are.

use crate::error::{BudgetError, Result};
use crate::models::{AlertsConfig, BudgetSnapshot, Goal, RecurringTemplate};
use crate::month::MonthKey;
use crate::store::{self, BudgetStore};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const BACKUP_VERSION: u32 = 1;
const REQUIRED: [&str; 3] = ["version", "user", "currentSnapshot"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub user: String,
    pub current_snapshot: BudgetSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_month: Option<MonthKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_templates: Option<Vec<RecurringTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_months: Option<BTreeMap<MonthKey, BudgetSnapshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<AlertsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub months: usize,
    pub goals: Option<usize>,
    pub recurring: Option<usize>,
    pub currency: bool,
    pub alerts: bool,
}

/// Collects everything stored for `user`. `current` names the month whose
/// snapshot is exported as `currentSnapshot`.
pub fn export_all(conn: &Connection, user: &str, current: &MonthKey) -> Result<BackupDocument> {
    let store = BudgetStore::new(conn);
    let mut all_months = BTreeMap::new();
    for m in store.list_months(user)? {
        match store.load(user, &m)? {
            Some(snap) => {
                all_months.insert(m, snap);
            }
            None => tracing::warn!(month = %m, "indexed month has no readable snapshot"),
        }
    }
    Ok(BackupDocument {
        version: BACKUP_VERSION,
        user: user.to_string(),
        current_snapshot: store.get(user, current)?,
        current_month: Some(current.clone()),
        created_at: Some(Utc::now()),
        currency: Some(store.currency(user)?),
        goals: Some(store.goals(user)?),
        recurring_templates: Some(store.recurring(user)?),
        all_months: Some(all_months),
        alerts: Some(store::alerts_config(conn)?),
    })
}

/// Checks shape and required fields, returning the typed document.
pub fn parse_document(raw: &str) -> Result<BackupDocument> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| BudgetError::InvalidBackup(format!("not valid JSON: {}", e)))?;
    let obj = value
        .as_object()
        .ok_or_else(|| BudgetError::InvalidBackup("top level is not an object".into()))?;
    let missing: Vec<&str> = REQUIRED
        .iter()
        .copied()
        .filter(|k| obj.get(*k).is_none_or(|v| v.is_null()))
        .collect();
    if !missing.is_empty() {
        return Err(BudgetError::InvalidBackup(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )));
    }
    serde_json::from_value(value).map_err(|e| BudgetError::InvalidBackup(e.to_string()))
}

/// Restores a backup into `user`'s namespace as a sparse merge. The set of
/// months written is exactly `allMonths` when the document carries one.
pub fn import_all(conn: &mut Connection, user: &str, raw: &str) -> Result<ImportSummary> {
    let doc = parse_document(raw)?;
    if doc.user != user {
        tracing::info!(from = %doc.user, into = %user, "importing backup from another account");
    }

    let tx = conn.transaction()?;
    let mut summary = ImportSummary::default();
    {
        let store = BudgetStore::new(&tx);
        let current = doc.current_month.clone().unwrap_or_else(MonthKey::current);
        // With a month map present, the current sheet is only restored when it
        // was a saved month at export time; an unsaved starter sheet is skipped.
        let restore_current = doc
            .all_months
            .as_ref()
            .is_none_or(|months| months.contains_key(&current));
        if restore_current {
            store.put(user, &current, &doc.current_snapshot)?;
            summary.months += 1;
        }

        if let Some(months) = &doc.all_months {
            for (k, snap) in months {
                if *k == current {
                    continue;
                }
                store.put(user, k, snap)?;
                summary.months += 1;
            }
        }
        if let Some(goals) = &doc.goals {
            store.save_goals(user, goals)?;
            summary.goals = Some(goals.len());
        }
        if let Some(list) = &doc.recurring_templates {
            store.save_recurring(user, list)?;
            summary.recurring = Some(list.len());
        }
        if let Some(ccy) = doc.currency.as_deref().filter(|c| !c.trim().is_empty()) {
            store.set_currency(user, ccy)?;
            summary.currency = true;
        }
        if let Some(cfg) = &doc.alerts {
            store::save_alerts_config(&tx, cfg)?;
            summary.alerts = true;
        }
    }
    tx.commit()?;
    tracing::info!(user, months = summary.months, "backup restored");
    Ok(summary)
}
