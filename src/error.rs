// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors raised by the budgeting library.
///
/// Not-found conditions on items are deliberately absent: ledger calls report
/// them through `bool`/`Option` returns instead.
#[derive(Error, Debug)]
pub enum BudgetError {
    /// A recurring template or CLI argument named a list that does not exist
    #[error("Category '{0}' not found (use income|bills|expenses|savings|debt)")]
    CategoryNotFound(String),

    /// A backup document failed validation; nothing was written
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    #[error("Account already exists for '{0}'")]
    UserExists(String),

    #[error("Login failed for '{0}'")]
    LoginFailed(String),

    #[error("Not logged in (run `budgetbook login` first)")]
    NotLoggedIn,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
