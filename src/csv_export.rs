// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::metrics::{balance, planned_totals, totals};
use crate::models::{BudgetSnapshot, ListKind};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

pub const HEADER: [&str; 7] = [
    "Category",
    "Name",
    "Planned",
    "Actual",
    "Checked",
    "Tags",
    "CategoryType",
];

/// One row per item, a blank separator, then a per-list summary block.
pub fn write_csv<W: Write>(snap: &BudgetSnapshot, out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(out);
    wtr.write_record(HEADER)?;
    for (list, it) in snap.items() {
        wtr.write_record([
            list.as_str().to_string(),
            it.name.clone(),
            it.planned.to_string(),
            it.actual.to_string(),
            if it.checked { "yes" } else { "no" }.to_string(),
            it.tags.join(";"),
            it.category.as_str().to_string(),
        ])?;
    }

    let planned = planned_totals(snap);
    let actual = totals(snap);
    wtr.write_record([""])?;
    wtr.write_record(["Summary", "Planned", "Actual"])?;
    for list in ListKind::ALL {
        wtr.write_record([
            list.label().to_string(),
            planned.get(list).to_string(),
            actual.get(list).to_string(),
        ])?;
    }
    wtr.write_record([
        "Balance".to_string(),
        balance(&planned).to_string(),
        balance(&actual).to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(snap: &BudgetSnapshot, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(snap, file)
}
