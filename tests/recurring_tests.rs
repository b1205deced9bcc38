// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::db::init_schema;
use budgetbook::error::BudgetError;
use budgetbook::models::{BudgetSnapshot, Frequency, ListKind};
use budgetbook::month::MonthKey;
use budgetbook::recurring::{self, new_template};
use budgetbook::session::Session;
use budgetbook::store::BudgetStore;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rent(due: &str) -> budgetbook::models::RecurringTemplate {
    new_template("Rent", Decimal::from(1200), "bills", Frequency::Monthly, day(due), true).unwrap()
}

#[test]
fn monthly_template_applies_and_advances() {
    let mut snap = BudgetSnapshot::default();
    let mut t = rent("2024-01-15");

    let out = recurring::apply_if_due(&mut t, &mut snap, day("2024-02-01"))
        .unwrap()
        .unwrap();
    assert!(out.created);
    assert_eq!(out.list, ListKind::Bills);
    assert_eq!(t.next_due_date, day("2024-02-15"));
    assert_eq!(snap.bills.len(), 1);
    let item = &snap.bills[0];
    assert_eq!(item.name, "Rent");
    assert_eq!(item.planned, Decimal::from(1200));
    assert_eq!(item.actual, Decimal::from(1200));
    assert!(item.checked);
}

#[test]
fn overdue_template_advances_one_period_per_call() {
    let mut snap = BudgetSnapshot::default();
    let mut t = rent("2023-11-15");
    recurring::apply_if_due(&mut t, &mut snap, day("2024-02-01")).unwrap();
    assert_eq!(t.next_due_date, day("2023-12-15"));
    assert_eq!(snap.bills.len(), 1);
}

#[test]
fn existing_item_is_topped_up() {
    let mut snap = BudgetSnapshot::default();
    budgetbook::ledger::add_item(&mut snap, ListKind::Bills, "rent ").unwrap();
    snap.bills[0].actual = Decimal::from(100);

    let mut t = rent("2024-01-15");
    let out = recurring::apply(&mut t, &mut snap).unwrap();
    assert!(!out.created);
    assert_eq!(snap.bills.len(), 1);
    assert_eq!(snap.bills[0].actual, Decimal::from(1300));
    assert_eq!(out.item_id, snap.bills[0].id);
}

#[test]
fn not_due_or_manual_is_skipped() {
    let mut snap = BudgetSnapshot::default();
    let mut t = rent("2024-03-01");
    assert!(recurring::apply_if_due(&mut t, &mut snap, day("2024-02-29")).unwrap().is_none());
    assert_eq!(t.next_due_date, day("2024-03-01"));

    t.auto_apply = false;
    assert!(recurring::apply_if_due(&mut t, &mut snap, day("2024-04-01")).unwrap().is_none());
    assert!(snap.bills.is_empty());
}

#[test]
fn unknown_category_leaves_template_untouched() {
    let mut snap = BudgetSnapshot::default();
    let mut t = rent("2024-01-15");
    t.category = "groceries".into();
    let before = t.clone();

    let err = recurring::apply(&mut t, &mut snap).unwrap_err();
    assert!(matches!(err, BudgetError::CategoryNotFound(ref c) if c == "groceries"));
    assert_eq!(t, before);
    assert_eq!(snap, BudgetSnapshot::default());
}

#[test]
fn auto_apply_skips_broken_templates() {
    let mut snap = BudgetSnapshot::default();
    let mut broken = rent("2024-01-01");
    broken.category = "nowhere".into();
    let mut templates = vec![broken, rent("2024-01-15"), rent("2024-06-01")];

    let applied = recurring::auto_apply_due(&mut templates, &mut snap, day("2024-02-01"));
    assert_eq!(applied.len(), 1);
    assert_eq!(templates[0].next_due_date, day("2024-01-01"));
    assert_eq!(templates[1].next_due_date, day("2024-02-15"));
    assert_eq!(templates[2].next_due_date, day("2024-06-01"));
}

#[test]
fn new_template_validates_input() {
    assert!(new_template(" ", Decimal::ONE, "bills", Frequency::Weekly, day("2024-01-01"), true).is_err());
    assert!(matches!(
        new_template("Gym", Decimal::ONE, "fun", Frequency::Weekly, day("2024-01-01"), true),
        Err(BudgetError::CategoryNotFound(_))
    ));
    let t = new_template("Gym", Decimal::from(-5), "Expenses", Frequency::Weekly, day("2024-01-01"), true)
        .unwrap();
    assert_eq!(t.category, "expenses");
    assert_eq!(t.amount, Decimal::ZERO);
}

#[test]
fn session_begin_persists_applied_templates() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let store = BudgetStore::new(&conn);
    let month = MonthKey::for_month(2024, 1);
    store.put("a@x.com", &month, &BudgetSnapshot::default()).unwrap();
    store.save_recurring("a@x.com", &[rent("2024-01-15")]).unwrap();

    let (session, applied) =
        Session::begin(&conn, "a@x.com", month.clone(), day("2024-02-01")).unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(session.snapshot.bills.len(), 1);

    let saved = store.load("a@x.com", &month).unwrap().unwrap();
    assert_eq!(saved.bills[0].name, "Rent");
    assert_eq!(store.recurring("a@x.com").unwrap()[0].next_due_date, day("2024-02-15"));

    let (_, again) = Session::begin(&conn, "a@x.com", month, day("2024-02-01")).unwrap();
    assert!(again.is_empty());
}
