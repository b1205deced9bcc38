// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Classification, ListKind};
use once_cell::sync::Lazy;
use regex::Regex;

static SAVINGS_WORDS: Lazy<Regex> =
    Lazy::new(|| keyword_set(&["retirement", "emergency", "savings", "investment"]));
static DEBT_WORDS: Lazy<Regex> = Lazy::new(|| keyword_set(&["loan", "credit", "debt", "lease"]));
static WANTS_WORDS: Lazy<Regex> = Lazy::new(|| {
    keyword_set(&[
        "entertainment",
        "movie",
        "movies",
        "swiggy",
        "zomato",
        "netflix",
        "amazon",
        "gym",
        "vacation",
        "dinner",
    ])
});
static NEEDS_WORDS: Lazy<Regex> = Lazy::new(|| {
    keyword_set(&[
        "rent",
        "apartment",
        "mortgage",
        "electricity",
        "water",
        "grocer",
        "groceries",
        "internet",
        "insurance",
        "fuel",
        "maintenance",
    ])
});

fn keyword_set(words: &[&str]) -> Regex {
    let alternation: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&alternation.join("|")).expect("keyword alternation is a valid pattern")
}

/// Keyword classification of an item name. Substring match on the lowercased
/// name, savings before debt before wants before needs; the first hit wins.
pub fn classify(name: &str, list: ListKind) -> Classification {
    let lower = name.to_lowercase();
    if SAVINGS_WORDS.is_match(&lower) {
        Classification::Savings
    } else if DEBT_WORDS.is_match(&lower) {
        Classification::Debt
    } else if WANTS_WORDS.is_match(&lower) {
        Classification::Wants
    } else if NEEDS_WORDS.is_match(&lower) {
        Classification::Needs
    } else if list == ListKind::Bills {
        Classification::Needs
    } else {
        Classification::Wants
    }
}
