// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::backup::{self, BackupDocument};
use budgetbook::db::init_schema;
use budgetbook::error::BudgetError;
use budgetbook::ledger;
use budgetbook::models::{BudgetSnapshot, Field, Frequency, Goal, ListKind};
use budgetbook::month::MonthKey;
use budgetbook::recurring::new_template;
use budgetbook::store::{self, BudgetStore};
use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

const USER: &str = "a@x.com";

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn snapshot(income: &str) -> BudgetSnapshot {
    let mut snap = BudgetSnapshot::default();
    let it = ledger::add_item(&mut snap, ListKind::Income, "Salary").unwrap();
    ledger::set_field(&mut snap, ListKind::Income, &it.id, Field::Actual, income);
    let rent = ledger::add_item(&mut snap, ListKind::Bills, "Rent").unwrap();
    ledger::set_field(&mut snap, ListKind::Bills, &rent.id, Field::Planned, "1200.50");
    ledger::set_tags(&mut snap, ListKind::Bills, &rent.id, &["home".to_string()]);
    snap
}

fn seed(conn: &Connection) -> (MonthKey, MonthKey) {
    let store = BudgetStore::new(conn);
    let jan = MonthKey::for_month(2024, 0);
    let feb = MonthKey::for_month(2024, 1);
    store.put(USER, &jan, &snapshot("10,000")).unwrap();
    store.put(USER, &feb, &snapshot("9500")).unwrap();
    store
        .save_goals(
            USER,
            &[Goal {
                name: "Trip".into(),
                target: Decimal::from(800),
                current: Decimal::ZERO,
                created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            }],
        )
        .unwrap();
    let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    store
        .save_recurring(
            USER,
            &[new_template("Netflix", Decimal::from(199), "expenses", Frequency::Monthly, due, true).unwrap()],
        )
        .unwrap();
    store.set_currency(USER, "$").unwrap();
    (jan, feb)
}

fn sorted_months(store: &BudgetStore<'_>) -> Vec<MonthKey> {
    let mut months = store.list_months(USER).unwrap();
    months.sort();
    months
}

#[test]
fn export_then_import_restores_everything() {
    let src = setup();
    let (jan, feb) = seed(&src);
    let doc = backup::export_all(&src, USER, &jan).unwrap();
    let raw = serde_json::to_string_pretty(&doc).unwrap();

    let mut dst = setup();
    let summary = backup::import_all(&mut dst, USER, &raw).unwrap();
    assert_eq!(summary.months, 2);
    assert_eq!(summary.goals, Some(1));
    assert_eq!(summary.recurring, Some(1));

    let (a, b) = (BudgetStore::new(&src), BudgetStore::new(&dst));
    assert_eq!(sorted_months(&a), sorted_months(&b));
    for k in [&jan, &feb] {
        assert_eq!(a.load(USER, k).unwrap(), b.load(USER, k).unwrap());
    }
    assert_eq!(a.goals(USER).unwrap(), b.goals(USER).unwrap());
    assert_eq!(a.recurring(USER).unwrap(), b.recurring(USER).unwrap());
    assert_eq!(b.currency(USER).unwrap(), "$");
    assert_eq!(store::alerts_config(&dst).unwrap(), store::alerts_config(&src).unwrap());
}

#[test]
fn export_uses_camel_case_fields() {
    let conn = setup();
    let (jan, _) = seed(&conn);
    let doc = backup::export_all(&conn, USER, &jan).unwrap();
    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["version"], 1);
    assert_eq!(v["user"], USER);
    assert!(v["currentSnapshot"]["income"].is_array());
    assert!(v["allMonths"]["budget_2024_1"].is_object());
    assert!(v["recurringTemplates"][0]["nextDueDate"].is_string());
}

#[test]
fn missing_required_field_is_rejected_without_writes() {
    let mut conn = setup();
    let (jan, _) = seed(&conn);
    let before = BudgetStore::new(&conn).load(USER, &jan).unwrap();

    let raw = r#"{"version":1,"user":"a@x.com","goals":[]}"#;
    let err = backup::import_all(&mut conn, USER, raw).unwrap_err();
    match err {
        BudgetError::InvalidBackup(msg) => assert!(msg.contains("currentSnapshot")),
        other => panic!("unexpected error: {other}"),
    }

    let store = BudgetStore::new(&conn);
    assert_eq!(store.load(USER, &jan).unwrap(), before);
    assert_eq!(store.goals(USER).unwrap().len(), 1);
    assert!(matches!(
        backup::import_all(&mut conn, USER, "not json"),
        Err(BudgetError::InvalidBackup(_))
    ));
}

#[test]
fn absent_sections_are_left_alone() {
    let mut conn = setup();
    let (jan, _) = seed(&conn);
    let doc = BackupDocument {
        version: 1,
        user: USER.into(),
        current_snapshot: snapshot("42"),
        current_month: Some(MonthKey::for_month(2024, 5)),
        created_at: None,
        currency: None,
        goals: None,
        recurring_templates: None,
        all_months: None,
        alerts: None,
    };
    let raw = serde_json::to_string(&doc).unwrap();
    let summary = backup::import_all(&mut conn, USER, &raw).unwrap();
    assert_eq!(summary.months, 1);
    assert_eq!(summary.goals, None);

    let store = BudgetStore::new(&conn);
    assert_eq!(store.goals(USER).unwrap()[0].name, "Trip");
    assert_eq!(store.recurring(USER).unwrap().len(), 1);
    assert_eq!(store.currency(USER).unwrap(), "$");
    assert!(store.load(USER, &jan).unwrap().is_some());
    assert_eq!(store.list_months(USER).unwrap().len(), 3);
}

#[test]
fn import_without_month_targets_current_sheet() {
    let mut conn = setup();
    let raw = serde_json::json!({
        "version": 1,
        "user": "someone@else.com",
        "currentSnapshot": { "income": [], "bills": [] }
    })
    .to_string();
    backup::import_all(&mut conn, USER, &raw).unwrap();

    let store = BudgetStore::new(&conn);
    assert_eq!(store.list_months(USER).unwrap(), vec![MonthKey::current()]);
    assert!(store.load("someone@else.com", &MonthKey::current()).unwrap().is_none());
}

#[test]
fn legacy_next_date_field_is_accepted() {
    let raw = r#"{
        "version": 1,
        "user": "a@x.com",
        "currentSnapshot": {},
        "recurringTemplates": [
            {"id":"id_abc1234","name":"Gym","amount":"30","category":"expenses","frequency":"weekly","nextDate":"2024-01-08"}
        ]
    }"#;
    let doc = backup::parse_document(raw).unwrap();
    let t = &doc.recurring_templates.unwrap()[0];
    assert_eq!(t.next_due_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    assert!(t.auto_apply);
}

#[test]
fn unsaved_current_sheet_is_not_restored() {
    let src = setup();
    let (jan, feb) = seed(&src);
    let doc = backup::export_all(&src, USER, &MonthKey::current()).unwrap();
    assert_eq!(doc.current_snapshot.income[0].name, "Realtor income");
    let raw = serde_json::to_string(&doc).unwrap();

    let mut dst = setup();
    let summary = backup::import_all(&mut dst, USER, &raw).unwrap();
    assert_eq!(summary.months, 2);

    let b = BudgetStore::new(&dst);
    assert_eq!(sorted_months(&BudgetStore::new(&src)), sorted_months(&b));
    assert!(b.load(USER, &MonthKey::current()).unwrap().is_none());
    assert!(b.load(USER, &jan).unwrap().is_some());
    assert!(b.load(USER, &feb).unwrap().is_some());
}
