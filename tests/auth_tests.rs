// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::auth;
use budgetbook::db::init_schema;
use budgetbook::error::BudgetError;
use budgetbook::store;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[test]
fn signup_then_login() {
    let conn = setup();
    assert_eq!(auth::signup(&conn, " A@X.com ", "pw1").unwrap(), "a@x.com");
    assert!(auth::current_user(&conn).unwrap().is_none());

    assert_eq!(auth::login(&conn, "a@x.com", "pw1").unwrap(), "a@x.com");
    assert_eq!(auth::require_user(&conn).unwrap(), "a@x.com");

    auth::logout(&conn).unwrap();
    assert!(matches!(auth::require_user(&conn), Err(BudgetError::NotLoggedIn)));
}

#[test]
fn duplicate_and_bad_credentials() {
    let conn = setup();
    auth::signup(&conn, "a@x.com", "pw1").unwrap();
    assert!(matches!(
        auth::signup(&conn, "A@x.com", "other"),
        Err(BudgetError::UserExists(_))
    ));
    assert!(matches!(
        auth::login(&conn, "a@x.com", "wrong"),
        Err(BudgetError::LoginFailed(_))
    ));
    assert!(matches!(
        auth::login(&conn, "nobody@x.com", "pw1"),
        Err(BudgetError::LoginFailed(_))
    ));
    assert!(matches!(
        auth::signup(&conn, "", "pw"),
        Err(BudgetError::InvalidInput(_))
    ));
}

#[test]
fn password_is_not_stored_in_clear() {
    let conn = setup();
    auth::signup(&conn, "a@x.com", "hunter2-secret").unwrap();
    let raw = store::get_raw(&conn, store::USERS_KEY).unwrap().unwrap();
    assert!(raw.contains("a@x.com"));
    assert!(!raw.contains("hunter2-secret"));
}

#[test]
fn change_password_requires_old_one() {
    let conn = setup();
    auth::signup(&conn, "a@x.com", "old").unwrap();
    assert!(auth::change_password(&conn, "a@x.com", "nope", "new").is_err());
    auth::change_password(&conn, "a@x.com", "old", "new").unwrap();
    assert!(auth::login(&conn, "a@x.com", "old").is_err());
    assert!(auth::login(&conn, "a@x.com", "new").is_ok());
}
