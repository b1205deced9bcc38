// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{BudgetError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Key used when no reporting period has been selected.
pub const CURRENT_MONTH_KEY: &str = "budget_current";

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Canonical month identifier: `budget_{year}_{zero-based month}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn current() -> Self {
        MonthKey(CURRENT_MONTH_KEY.to_string())
    }

    /// `month0` is zero-based (January = 0).
    pub fn for_month(year: i32, month0: u32) -> Self {
        MonthKey(format!("budget_{}_{}", year, month0))
    }

    /// Wraps a key read back from storage or a backup document.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        MonthKey(raw.into())
    }

    /// Parses `YYYY-MM` (one-based month) as typed on the command line.
    pub fn from_month_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("current") {
            return Ok(Self::current());
        }
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").map_err(|_| {
            BudgetError::InvalidInput(format!("Invalid month '{}', expected YYYY-MM", s))
        })?;
        Ok(resolve_month_key(Some(date)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_current(&self) -> bool {
        self.0 == CURRENT_MONTH_KEY
    }

    /// `(year, zero-based month)` for dated keys, `None` for the sentinel or foreign keys.
    pub fn parts(&self) -> Option<(i32, u32)> {
        let rest = self.0.strip_prefix("budget_")?;
        let (y, m) = rest.split_once('_')?;
        let year = y.parse::<i32>().ok()?;
        let month0 = m.parse::<u32>().ok()?;
        (month0 < 12).then_some((year, month0))
    }

    /// Human label such as `Jan 2024`.
    pub fn label(&self) -> String {
        match self.parts() {
            Some((y, m)) => format!("{} {}", MONTH_NAMES[m as usize], y),
            None if self.is_current() => "Current".to_string(),
            None => self.0.clone(),
        }
    }

    /// Chronological order; dated keys first, then the sentinel and anything unparseable.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.parts(), other.parts()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a selected date to its month key; `None` yields [`CURRENT_MONTH_KEY`].
pub fn resolve_month_key(selected: Option<NaiveDate>) -> MonthKey {
    match selected {
        Some(d) => MonthKey::for_month(d.year(), d.month0()),
        None => MonthKey::current(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_parts() {
        let k = MonthKey::from_month_str("2024-03").unwrap();
        assert_eq!(k.as_str(), "budget_2024_2");
        assert_eq!(k.parts(), Some((2024, 2)));
        assert_eq!(k.label(), "Mar 2024");
        assert_eq!(MonthKey::current().label(), "Current");
        assert!(MonthKey::from_month_str("2024-13").is_err());
    }

    #[test]
    fn chronological_order_beats_lexical() {
        let mut keys = vec![
            MonthKey::for_month(2024, 10),
            MonthKey::current(),
            MonthKey::for_month(2024, 2),
            MonthKey::for_month(2023, 11),
        ];
        keys.sort_by(|a, b| a.chronological_cmp(b));
        let labels: Vec<String> = keys.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Dec 2023", "Mar 2024", "Nov 2024", "Current"]);
    }
}
