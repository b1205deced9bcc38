// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::csv_export::{export_csv, write_csv, HEADER};
use budgetbook::ledger;
use budgetbook::models::{BudgetSnapshot, Field, ListKind};
use tempfile::tempdir;

fn snapshot() -> BudgetSnapshot {
    let mut snap = BudgetSnapshot::default();
    let pay = ledger::add_item(&mut snap, ListKind::Income, "Salary").unwrap();
    ledger::set_field(&mut snap, ListKind::Income, &pay.id, Field::Actual, "5000");
    let rent = ledger::add_item(&mut snap, ListKind::Bills, "Rent, \"big\" flat").unwrap();
    ledger::set_field(&mut snap, ListKind::Bills, &rent.id, Field::Planned, "2000");
    ledger::set_field(&mut snap, ListKind::Bills, &rent.id, Field::Actual, "2100");
    ledger::set_checked(&mut snap, ListKind::Bills, &rent.id, true);
    ledger::set_tags(&mut snap, ListKind::Bills, &rent.id, &["home".to_string(), "fixed".to_string()]);
    snap
}

#[test]
fn csv_quotes_awkward_names() {
    let mut buf = Vec::new();
    write_csv(&snapshot(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with(&HEADER.join(",")));
    assert!(text.contains("\"Rent, \"\"big\"\" flat\""));
    assert!(text.contains("Summary,Planned,Actual"));
}

#[test]
fn csv_file_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.csv");
    export_csv(&snapshot(), &path).unwrap();

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&path)
        .unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][0], "income");
    assert_eq!(&rows[1][0], "bills");
    assert_eq!(&rows[1][1], "Rent, \"big\" flat");
    assert_eq!(&rows[1][3], "2100");
    assert_eq!(&rows[1][4], "yes");
    assert_eq!(&rows[1][5], "home;fixed");
    assert_eq!(&rows[1][6], "needs");

    let balance = rows.iter().find(|r| &r[0] == "Balance").unwrap();
    assert_eq!(&balance[1], "-2000");
    assert_eq!(&balance[2], "2900");
}
