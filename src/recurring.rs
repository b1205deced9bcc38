// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring templates and their application to a snapshot.
//!
//! Applying a template advances its due date by exactly one period, measured
//! from the previous due date. A template that is several periods behind
//! needs several apply calls to catch up.

use crate::classifier::classify;
use crate::error::{BudgetError, Result};
use crate::models::{new_item_id, BudgetSnapshot, Frequency, LineItem, ListKind, RecurringTemplate};
use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

impl Frequency {
    /// Next due date one period after `from`. Month and year steps clamp to
    /// the last day of a shorter target month.
    pub fn advance(self, from: NaiveDate) -> Result<NaiveDate> {
        let next = match self {
            Frequency::Daily => from.checked_add_days(Days::new(1)),
            Frequency::Weekly => from.checked_add_days(Days::new(7)),
            Frequency::Monthly => from.checked_add_months(Months::new(1)),
            Frequency::Yearly => from.checked_add_months(Months::new(12)),
        };
        next.ok_or_else(|| BudgetError::InvalidInput(format!("date overflow after {}", from)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyOutcome {
    pub template_id: String,
    pub name: String,
    pub list: ListKind,
    pub item_id: String,
    /// `false` when the amount was added to an existing item of the same name
    pub created: bool,
    pub next_due_date: NaiveDate,
}

/// Builds a validated template; the target list must exist.
pub fn new_template(
    name: &str,
    amount: Decimal,
    category: &str,
    frequency: Frequency,
    next_due_date: NaiveDate,
    auto_apply: bool,
) -> Result<RecurringTemplate> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::InvalidInput("recurring name is empty".into()));
    }
    let list: ListKind = category.parse()?;
    Ok(RecurringTemplate {
        id: new_item_id(),
        name: name.to_string(),
        amount: amount.max(Decimal::ZERO),
        category: list.as_str().to_string(),
        frequency,
        next_due_date,
        auto_apply,
    })
}

/// Unconditional apply ("apply now"). An unknown target list leaves both the
/// template and the snapshot untouched.
pub fn apply(template: &mut RecurringTemplate, snap: &mut BudgetSnapshot) -> Result<ApplyOutcome> {
    let list: ListKind = template.category.parse()?;
    let next = template.frequency.advance(template.next_due_date)?;

    let wanted = template.name.trim().to_lowercase();
    let items = snap.list_mut(list);
    let (item_id, created) = match items
        .iter_mut()
        .find(|it| it.name.trim().to_lowercase() == wanted)
    {
        Some(existing) => {
            existing.actual = existing.actual.saturating_add(template.amount);
            (existing.id.clone(), false)
        }
        None => {
            let mut item = LineItem::new(template.name.trim(), classify(&template.name, list));
            item.planned = template.amount;
            item.actual = template.amount;
            item.checked = true;
            let id = item.id.clone();
            items.push(item);
            (id, true)
        }
    };

    template.next_due_date = next;
    Ok(ApplyOutcome {
        template_id: template.id.clone(),
        name: template.name.clone(),
        list,
        item_id,
        created,
        next_due_date: next,
    })
}

/// Applies only an auto-apply template whose due date has arrived.
pub fn apply_if_due(
    template: &mut RecurringTemplate,
    snap: &mut BudgetSnapshot,
    today: NaiveDate,
) -> Result<Option<ApplyOutcome>> {
    if !template.auto_apply || template.next_due_date > today {
        return Ok(None);
    }
    apply(template, snap).map(Some)
}

/// Session-start pass over all templates. Templates with a bad target list
/// are logged and skipped; the rest still apply.
pub fn auto_apply_due(
    templates: &mut [RecurringTemplate],
    snap: &mut BudgetSnapshot,
    today: NaiveDate,
) -> Vec<ApplyOutcome> {
    let mut applied = Vec::new();
    for t in templates.iter_mut() {
        match apply_if_due(t, snap, today) {
            Ok(Some(outcome)) => {
                tracing::info!(
                    template = %outcome.name,
                    list = %outcome.list,
                    next = %outcome.next_due_date,
                    "applied recurring transaction"
                );
                applied.push(outcome);
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(template = %t.name, %err, "skipping recurring transaction"),
        }
    }
    applied
}
