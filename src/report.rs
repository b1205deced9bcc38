// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::{self, Totals};
use crate::models::{BudgetSnapshot, Classification, ListKind};
use crate::month::MonthKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub list: ListKind,
    pub name: String,
    pub planned: Decimal,
    pub actual: Decimal,
    pub progress: Decimal,
    pub checked: bool,
    pub classification: Classification,
}

/// Printable month summary; the input a PDF or print layout would consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub user: String,
    pub generated_on: NaiveDate,
    pub month: String,
    pub currency: String,
    pub totals: Totals,
    pub balance: Decimal,
    pub savings_rate: Decimal,
    pub lines: Vec<ReportLine>,
}

pub fn build(
    user: &str,
    month: &MonthKey,
    currency: &str,
    snap: &BudgetSnapshot,
    generated_on: NaiveDate,
) -> Report {
    let totals = metrics::totals(snap);
    Report {
        user: user.to_string(),
        generated_on,
        month: month.label(),
        currency: currency.to_string(),
        balance: metrics::balance(&totals),
        savings_rate: metrics::savings_rate(&totals),
        totals,
        lines: snap
            .items()
            .map(|(list, it)| ReportLine {
                list,
                name: it.name.clone(),
                planned: it.planned,
                actual: it.actual,
                progress: metrics::progress_percent(it.planned, it.actual),
                checked: it.checked,
                classification: it.category,
            })
            .collect(),
    }
}
