//! CSV export of the current ledger.
//!
//! # Responsibility
//! - Render the ledger as a flat delimited-text artifact for download.
//!
//! # Invariants
//! - Columns mirror the stock table; numeric fields stay unformatted so the
//!   file imports cleanly into spreadsheet tools.
//! - The artifact reflects the ledger at call time; nothing is cached.

use crate::model::ledger::Ledger;
use crate::view::format::format_number;

/// Download name offered for the export artifact.
pub const EXPORT_FILE_NAME: &str = "shoply-stock.csv";

/// Header row of the export, matching the table columns.
pub const CSV_HEADER: &str = "Item,Category,Price,Quantity,Sold,Remaining,Total Value";

/// A named, ready-to-download CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content: String,
}

/// Builds the CSV document: header plus one row per item in ledger order.
pub fn export_csv(ledger: &Ledger) -> CsvExport {
    let mut lines = Vec::with_capacity(ledger.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for item in ledger.items() {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            item.name,
            item.category,
            format_number(item.price),
            item.quantity,
            item.sold,
            item.remaining(),
            format_number(item.value()),
        ));
    }

    CsvExport {
        file_name: EXPORT_FILE_NAME,
        content: lines.join("\n"),
    }
}
