// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BudgetError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five fixed lists every monthly snapshot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Income,
    Bills,
    Expenses,
    Savings,
    Debt,
}

impl ListKind {
    pub const ALL: [ListKind; 5] = [
        ListKind::Income,
        ListKind::Bills,
        ListKind::Expenses,
        ListKind::Savings,
        ListKind::Debt,
    ];

    /// Lists that draw money out of income.
    pub const OUTGOING: [ListKind; 4] = [
        ListKind::Bills,
        ListKind::Expenses,
        ListKind::Savings,
        ListKind::Debt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Income => "income",
            ListKind::Bills => "bills",
            ListKind::Expenses => "expenses",
            ListKind::Savings => "savings",
            ListKind::Debt => "debt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Income => "Income",
            ListKind::Bills => "Bills",
            ListKind::Expenses => "Expenses",
            ListKind::Savings => "Savings",
            ListKind::Debt => "Debt",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(ListKind::Income),
            "bills" => Ok(ListKind::Bills),
            "expenses" => Ok(ListKind::Expenses),
            "savings" => Ok(ListKind::Savings),
            "debt" => Ok(ListKind::Debt),
            _ => Err(BudgetError::CategoryNotFound(s.trim().to_string())),
        }
    }
}

/// 50/30/20 bucket an item belongs to. Derived from the name unless overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Needs,
    #[default]
    Wants,
    Savings,
    Debt,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Needs => "needs",
            Classification::Wants => "wants",
            Classification::Savings => "savings",
            Classification::Debt => "debt",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "needs" => Ok(Classification::Needs),
            "wants" => Ok(Classification::Wants),
            "savings" => Ok(Classification::Savings),
            "debt" => Ok(Classification::Debt),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown classification '{}' (use needs|wants|savings|debt)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Planned,
    Actual,
}

impl FromStr for Field {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(Field::Planned),
            "actual" => Ok(Field::Actual),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown field '{}' (use planned|actual)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub planned: Decimal,
    #[serde(default)]
    pub actual: Decimal,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Classification,
}

impl LineItem {
    pub fn new(name: &str, category: Classification) -> Self {
        Self {
            id: new_item_id(),
            name: name.to_string(),
            planned: Decimal::ZERO,
            actual: Decimal::ZERO,
            checked: false,
            tags: Vec::new(),
            category,
        }
    }

    pub fn field(&self, field: Field) -> Decimal {
        match field {
            Field::Planned => self.planned,
            Field::Actual => self.actual,
        }
    }

    fn seeded(
        name: &str,
        amount: i64,
        checked: bool,
        tags: &[&str],
        category: Classification,
    ) -> Self {
        Self {
            id: new_item_id(),
            name: name.to_string(),
            planned: Decimal::from(amount),
            actual: Decimal::from(amount),
            checked,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category,
        }
    }
}

/// Short item id: `id_` followed by seven hex characters of a v4 UUID.
pub fn new_item_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("id_{}", &raw[..7])
}

/// Everything recorded for one (user, month).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub income: Vec<LineItem>,
    #[serde(default)]
    pub bills: Vec<LineItem>,
    #[serde(default)]
    pub expenses: Vec<LineItem>,
    #[serde(default)]
    pub savings: Vec<LineItem>,
    #[serde(default)]
    pub debt: Vec<LineItem>,
}

impl BudgetSnapshot {
    /// Starter template handed out for a month that has never been saved.
    pub fn starter() -> Self {
        use Classification::*;
        Self {
            income: vec![LineItem::seeded("Realtor income", 10600, false, &[], Needs)],
            bills: vec![
                LineItem::seeded("Apartment", 2300, true, &[], Needs),
                LineItem::seeded("Internet", 85, true, &[], Needs),
            ],
            expenses: vec![
                LineItem::seeded("Groceries", 0, false, &["food"], Needs),
                LineItem::seeded("Swiggy", 0, false, &["food", "delivery"], Wants),
            ],
            savings: vec![LineItem::seeded(
                "Retirement account",
                600,
                true,
                &["longterm"],
                Savings,
            )],
            debt: vec![LineItem::seeded("Credit card", 315, true, &[], Debt)],
        }
    }

    pub fn list(&self, kind: ListKind) -> &[LineItem] {
        match kind {
            ListKind::Income => &self.income,
            ListKind::Bills => &self.bills,
            ListKind::Expenses => &self.expenses,
            ListKind::Savings => &self.savings,
            ListKind::Debt => &self.debt,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut Vec<LineItem> {
        match kind {
            ListKind::Income => &mut self.income,
            ListKind::Bills => &mut self.bills,
            ListKind::Expenses => &mut self.expenses,
            ListKind::Savings => &mut self.savings,
            ListKind::Debt => &mut self.debt,
        }
    }

    /// All items in list order, tagged with the list they live in.
    pub fn items(&self) -> impl Iterator<Item = (ListKind, &LineItem)> + '_ {
        ListKind::ALL
            .into_iter()
            .flat_map(move |kind| self.list(kind).iter().map(move |it| (kind, it)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl FromStr for Frequency {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown frequency '{}' (use daily|weekly|monthly|yearly)",
                other
            ))),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    /// Target list name; kept as text so an unknown list is reported at apply time.
    pub category: String,
    pub frequency: Frequency,
    #[serde(alias = "nextDate")]
    pub next_due_date: NaiveDate,
    #[serde(default = "default_true")]
    pub auto_apply: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub name: String,
    pub target: Decimal,
    /// Cache of `min(target, actual savings)`; refreshed on every commit.
    #[serde(default)]
    pub current: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub expenses_percent: Decimal,
    pub bills_percent: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            expenses_percent: Decimal::from(80),
            bills_percent: Decimal::from(90),
        }
    }
}

fn default_cooldown_minutes() -> i64 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default = "default_true")]
    pub notify_when_over_budget: bool,
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
    #[serde(default)]
    pub cooldown_until: Option<DateTime<Utc>>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            notify_when_over_budget: true,
            cooldown_minutes: default_cooldown_minutes(),
            cooldown_until: None,
        }
    }
}
