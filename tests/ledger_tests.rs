// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::classifier::classify;
use budgetbook::ledger;
use budgetbook::metrics::{self, progress_percent};
use budgetbook::models::{BudgetSnapshot, Classification, Field, ListKind};
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn actual_sum(snap: &BudgetSnapshot, list: ListKind) -> Decimal {
    snap.list(list).iter().map(|it| it.actual).sum()
}

#[test]
fn totals_follow_every_edit() {
    let mut snap = BudgetSnapshot::default();
    let groceries = ledger::add_item(&mut snap, ListKind::Expenses, "Groceries").unwrap();
    let movies = ledger::add_item(&mut snap, ListKind::Expenses, "Movies").unwrap();
    assert_eq!(groceries.category, Classification::Needs);
    assert_eq!(movies.category, Classification::Wants);

    assert!(ledger::set_field(&mut snap, ListKind::Expenses, &groceries.id, Field::Actual, "₹1,250.50"));
    assert!(ledger::set_field(&mut snap, ListKind::Expenses, &movies.id, Field::Actual, "300"));
    assert_eq!(metrics::totals(&snap).expenses, d("1550.50"));
    assert_eq!(metrics::totals(&snap).expenses, actual_sum(&snap, ListKind::Expenses));

    ledger::delete_item(&mut snap, ListKind::Expenses, &movies.id).unwrap();
    assert_eq!(metrics::totals(&snap).expenses, d("1250.50"));

    assert!(ledger::set_field(&mut snap, ListKind::Expenses, &groceries.id, Field::Actual, "-40"));
    assert_eq!(metrics::totals(&snap).expenses, Decimal::ZERO);
    assert!(ledger::set_field(&mut snap, ListKind::Expenses, &groceries.id, Field::Planned, "abc"));
    assert_eq!(metrics::planned_totals(&snap).expenses, Decimal::ZERO);
}

#[test]
fn blank_names_and_missing_ids_are_noops() {
    let mut snap = BudgetSnapshot::default();
    assert!(ledger::add_item(&mut snap, ListKind::Bills, "   ").is_none());
    assert!(snap.bills.is_empty());

    let rent = ledger::add_item(&mut snap, ListKind::Bills, "Rent").unwrap();
    let before = snap.clone();
    assert!(!ledger::rename_item(&mut snap, ListKind::Bills, &rent.id, "  "));
    assert!(!ledger::rename_item(&mut snap, ListKind::Bills, "id_missing", "Water"));
    assert!(ledger::delete_item(&mut snap, ListKind::Bills, "id_missing").is_none());
    assert!(!ledger::set_field(&mut snap, ListKind::Income, &rent.id, Field::Actual, "10"));
    assert!(!ledger::set_checked(&mut snap, ListKind::Bills, "id_missing", true));
    assert_eq!(snap, before);
}

#[test]
fn rename_reclassifies() {
    let mut snap = BudgetSnapshot::default();
    let item = ledger::add_item(&mut snap, ListKind::Expenses, "Stuff").unwrap();
    assert_eq!(item.category, Classification::Wants);
    assert!(ledger::rename_item(&mut snap, ListKind::Expenses, &item.id, "Electricity"));
    assert_eq!(snap.expenses[0].name, "Electricity");
    assert_eq!(snap.expenses[0].category, Classification::Needs);
}

#[test]
fn reclassify_pins_or_rederives() {
    let mut snap = BudgetSnapshot::default();
    let item = ledger::add_item(&mut snap, ListKind::Expenses, "Gym").unwrap();
    assert!(ledger::reclassify(&mut snap, ListKind::Expenses, &item.id, Some(Classification::Needs)));
    assert_eq!(snap.expenses[0].category, Classification::Needs);
    assert!(ledger::reclassify(&mut snap, ListKind::Expenses, &item.id, None));
    assert_eq!(snap.expenses[0].category, Classification::Wants);
}

#[test]
fn tags_are_trimmed() {
    let mut snap = BudgetSnapshot::default();
    let item = ledger::add_item(&mut snap, ListKind::Expenses, "Swiggy").unwrap();
    let tags = vec![" food ".to_string(), String::new(), "delivery".to_string()];
    assert!(ledger::set_tags(&mut snap, ListKind::Expenses, &item.id, &tags));
    assert_eq!(snap.expenses[0].tags, vec!["food", "delivery"]);
    assert!(ledger::set_checked(&mut snap, ListKind::Expenses, &item.id, true));
    assert!(snap.expenses[0].checked);
}

#[test]
fn item_ids_are_short_and_unique() {
    let mut snap = BudgetSnapshot::default();
    let a = ledger::add_item(&mut snap, ListKind::Debt, "Car loan").unwrap();
    let b = ledger::add_item(&mut snap, ListKind::Debt, "Car loan").unwrap();
    assert!(a.id.starts_with("id_"));
    assert_eq!(a.id.len(), 10);
    assert_ne!(a.id, b.id);
}

#[test]
fn classification_is_deterministic() {
    for list in ListKind::ALL {
        for name in ["Loan savings plan", "Netflix", "Rent", "Misc", ""] {
            assert_eq!(classify(name, list), classify(name, list));
        }
    }
    assert_eq!(classify("loan savings plan", ListKind::Debt), Classification::Savings);
    assert_eq!(classify("Credit card", ListKind::Bills), Classification::Debt);
}

#[test]
fn progress_percent_edges() {
    assert_eq!(progress_percent(Decimal::ZERO, d("25")), d("100"));
    assert_eq!(progress_percent(d("200"), d("50")), d("25"));
    assert_eq!(progress_percent(d("200"), Decimal::ZERO), Decimal::ZERO);
}
