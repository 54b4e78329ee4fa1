//! Two-sheet CSV export: line items and summary.
//!
//! The same report the spreadsheet export of the web app produced, as two
//! CSV files next to each other. Both sheets read the engine's figures; no
//! amount is recomputed here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::Writer;
use engine::Bill;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRow {
    description: String,
    amount: String,
}

fn sheet_path(stem: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}{suffix}", stem.display()))
}

/// Writes `<stem>_details.csv` and `<stem>_summary.csv`, returning both
/// paths.
pub fn write_csv(bill: &Bill, stem: &Path) -> Result<(PathBuf, PathBuf)> {
    if let Some(parent) = stem.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let details_path = sheet_path(stem, "_details.csv");
    let summary_path = sheet_path(stem, "_summary.csv");
    let totals = bill.totals();

    let mut writer = Writer::from_path(&details_path)?;
    let mut header: Vec<String> = ["Menu", "Price", "Quantity", "Total"]
        .into_iter()
        .map(str::to_string)
        .collect();
    header.extend(bill.participants.iter().map(|p| p.name.clone()));
    writer.write_record(&header)?;

    for item in &bill.items {
        let mut row = vec![
            item.name.clone(),
            item.price.to_string(),
            item.quantity.to_string(),
            item.total().to_string(),
        ];
        for participant in &bill.participants {
            row.push(if item.is_shared_by(&participant.id) {
                item.share_of(&participant.id).to_string()
            } else {
                "-".to_string()
            });
        }
        writer.write_record(&row)?;
    }

    // Totals row: bill subtotal in the Total column, each participant's
    // final amount (surcharges included) in their own column.
    let mut totals_row = vec![
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        totals.subtotal.to_string(),
    ];
    totals_row.extend(
        bill.participants
            .iter()
            .map(|p| bill.participant_totals(&p.id).grand_total.to_string()),
    );
    writer.write_record(&totals_row)?;
    writer.flush()?;

    let mut writer = Writer::from_path(&summary_path)?;
    writer.serialize(SummaryRow {
        description: "Subtotal".to_string(),
        amount: totals.subtotal.to_string(),
    })?;
    writer.serialize(SummaryRow {
        description: format!("Service Charge ({}%)", bill.service_charge),
        amount: totals.service_charge.to_string(),
    })?;
    writer.serialize(SummaryRow {
        description: format!("Tax ({}%)", bill.tax),
        amount: totals.tax.to_string(),
    })?;
    writer.serialize(SummaryRow {
        description: "Grand Total".to_string(),
        amount: totals.grand_total.to_string(),
    })?;
    writer.flush()?;

    tracing::info!(
        details = %details_path.display(),
        summary = %summary_path.display(),
        "bill exported"
    );
    Ok((details_path, summary_path))
}
