// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Item-level edits on a snapshot.
//!
//! Lookups that miss are no-ops reported through the return value; the
//! session persists the snapshot after every call regardless.

use crate::classifier::classify;
use crate::models::{BudgetSnapshot, Classification, Field, LineItem, ListKind};
use crate::utils::parse_amount_lenient;
use rust_decimal::Decimal;

fn find_mut<'a>(snap: &'a mut BudgetSnapshot, list: ListKind, id: &str) -> Option<&'a mut LineItem> {
    snap.list_mut(list).iter_mut().find(|it| it.id == id)
}

/// Adds an item classified from its name. Blank names are ignored.
pub fn add_item(snap: &mut BudgetSnapshot, list: ListKind, name: &str) -> Option<LineItem> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let item = LineItem::new(name, classify(name, list));
    snap.list_mut(list).push(item.clone());
    Some(item)
}

/// Renames and reclassifies. A blank name leaves the item as it was.
pub fn rename_item(snap: &mut BudgetSnapshot, list: ListKind, id: &str, new_name: &str) -> bool {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return false;
    }
    match find_mut(snap, list, id) {
        Some(item) => {
            item.name = new_name.to_string();
            item.category = classify(new_name, list);
            true
        }
        None => false,
    }
}

pub fn delete_item(snap: &mut BudgetSnapshot, list: ListKind, id: &str) -> Option<LineItem> {
    let items = snap.list_mut(list);
    let idx = items.iter().position(|it| it.id == id)?;
    Some(items.remove(idx))
}

/// Stores a planned/actual amount; unparseable or negative input becomes zero.
pub fn set_field(snap: &mut BudgetSnapshot, list: ListKind, id: &str, field: Field, raw: &str) -> bool {
    let value = parse_amount_lenient(raw);
    match find_mut(snap, list, id) {
        Some(item) => {
            match field {
                Field::Planned => item.planned = value,
                Field::Actual => item.actual = value,
            }
            true
        }
        None => false,
    }
}

pub fn set_checked(snap: &mut BudgetSnapshot, list: ListKind, id: &str, value: bool) -> bool {
    match find_mut(snap, list, id) {
        Some(item) => {
            item.checked = value;
            true
        }
        None => false,
    }
}

/// Replaces the tag list; tags are trimmed and empties dropped.
pub fn set_tags(snap: &mut BudgetSnapshot, list: ListKind, id: &str, tags: &[String]) -> bool {
    match find_mut(snap, list, id) {
        Some(item) => {
            item.tags = tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string())
                .collect();
            true
        }
        None => false,
    }
}

/// Pins a classification, or re-derives it from the name when `to` is `None`.
pub fn reclassify(
    snap: &mut BudgetSnapshot,
    list: ListKind,
    id: &str,
    to: Option<Classification>,
) -> bool {
    match find_mut(snap, list, id) {
        Some(item) => {
            item.category = to.unwrap_or_else(|| classify(&item.name, list));
            true
        }
        None => false,
    }
}

/// Sum of one field over a list; saturates at `Decimal::MAX` rather than overflowing.
pub fn total(snap: &BudgetSnapshot, list: ListKind, field: Field) -> Decimal {
    snap.list(list)
        .iter()
        .fold(Decimal::ZERO, |acc, it| acc.saturating_add(it.field(field)))
}
