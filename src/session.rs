// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The active user's working context and the recompute cycle.
//!
//! A `Session` owns the snapshot being edited. Callers mutate
//! `session.snapshot` through the ledger functions and then call
//! [`Session::commit`], which re-derives every figure, refreshes goal caches,
//! persists, and evaluates alerts before returning.

use crate::error::Result;
use crate::metrics::{self, AlertEvent, Totals};
use crate::models::BudgetSnapshot;
use crate::month::MonthKey;
use crate::recurring::{self, ApplyOutcome};
use crate::store::{self, BudgetStore};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub struct Session<'c> {
    store: BudgetStore<'c>,
    user: String,
    month: MonthKey,
    currency: String,
    pub snapshot: BudgetSnapshot,
}

/// Figures produced by one recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recompute {
    pub totals: Totals,
    pub balance: Decimal,
    pub savings_rate: Decimal,
    pub alerts: Vec<AlertEvent>,
}

impl<'c> Session<'c> {
    /// Loads the month for `user` without side effects.
    pub fn open(conn: &'c Connection, user: &str, month: MonthKey) -> Result<Self> {
        let store = BudgetStore::new(conn);
        let snapshot = store.get(user, &month)?;
        let currency = store.currency(user)?;
        Ok(Self {
            store,
            user: user.to_string(),
            month,
            currency,
            snapshot,
        })
    }

    /// Opens the month and runs the auto-apply pass for due recurring
    /// templates. Anything applied is persisted immediately.
    pub fn begin(
        conn: &'c Connection,
        user: &str,
        month: MonthKey,
        today: NaiveDate,
    ) -> Result<(Self, Vec<ApplyOutcome>)> {
        let mut session = Self::open(conn, user, month)?;
        let mut templates = session.store.recurring(user)?;
        let applied = recurring::auto_apply_due(&mut templates, &mut session.snapshot, today);
        if !applied.is_empty() {
            session.store.save_recurring(user, &templates)?;
            session.persist()?;
        }
        Ok((session, applied))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn month(&self) -> &MonthKey {
        &self.month
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn store(&self) -> BudgetStore<'c> {
        self.store
    }

    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.trim().to_string();
    }

    /// Switches to another month, loading (or defaulting) its snapshot.
    pub fn switch_month(&mut self, month: MonthKey) -> Result<()> {
        self.snapshot = self.store.get(&self.user, &month)?;
        self.month = month;
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.store.put(&self.user, &self.month, &self.snapshot)?;
        self.store.set_currency(&self.user, &self.currency)?;
        tracing::debug!(user = %self.user, month = %self.month, "snapshot persisted");
        Ok(())
    }

    /// Recompute-and-persist after an edit.
    pub fn commit(&mut self, now: DateTime<Utc>) -> Result<Recompute> {
        let totals = metrics::totals(&self.snapshot);

        let mut goals = self.store.goals(&self.user)?;
        if !goals.is_empty() {
            metrics::refresh_goals(&mut goals, totals.savings);
            self.store.save_goals(&self.user, &goals)?;
        }

        self.persist()?;

        let conn = self.store.conn();
        let mut cfg = store::alerts_config(conn)?;
        let before = cfg.cooldown_until;
        let alerts = metrics::alert_conditions(&self.snapshot, &mut cfg, now);
        if cfg.cooldown_until != before {
            store::save_alerts_config(conn, &cfg)?;
        }

        Ok(Recompute {
            balance: metrics::balance(&totals),
            savings_rate: metrics::savings_rate(&totals),
            totals,
            alerts,
        })
    }
}
