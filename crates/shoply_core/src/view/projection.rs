//! View-model projections: stats, table, sale targets and chart series.
//!
//! # Responsibility
//! - Compute what each view should display from a ledger snapshot.
//! - Decide empty-vs-nonempty presentation here, not in the rendering layer.
//!
//! # Invariants
//! - All projections preserve ledger order.
//! - `project_dashboard` recomputes all four views together, so they can
//!   never drift relative to each other.

use crate::model::ledger::Ledger;
use crate::view::format::format_currency;

/// Placeholder row text shown when the ledger holds no items.
pub const EMPTY_TABLE_MESSAGE: &str = "No stock added yet";

/// Label of the leading unselectable sale-target entry.
pub const SELECT_ITEM_LABEL: &str = "Select item";

/// Synthetic id prefix for sale-target entries that do not address stock.
pub const PLACEHOLDER_ID_PREFIX: &str = "d-";

/// Number of placeholder sale-target rows shown for an empty ledger.
pub const PLACEHOLDER_TARGET_COUNT: usize = 20;

/// Returns whether a sale-target id is a synthetic placeholder.
pub fn is_placeholder_id(id: &str) -> bool {
    id.starts_with(PLACEHOLDER_ID_PREFIX)
}

/// Aggregate numbers for the stats cards. `total_value` carries the fixed
/// currency formatting; the counts stay numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub total_stock: u64,
    pub stock_sold: u64,
    pub stock_remaining: u64,
    pub total_value: String,
}

/// One table row per stock item. Money columns are pre-formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: u32,
    pub sold: u32,
    pub remaining: u32,
    pub value: String,
}

/// Stock table content, with the empty case made explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// No items; render a single placeholder row with this message.
    Empty { message: &'static str },
    /// One row per item in ledger order.
    Rows(Vec<TableRow>),
}

/// One entry in the sale-target selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleTargetOption {
    /// Ledger index rendered as text, or a synthetic placeholder id.
    pub id: String,
    pub label: String,
    /// Placeholder and prompt entries are not selectable.
    pub selectable: bool,
}

/// Sale-target selector content.
///
/// Always starts with an unselectable prompt entry. An empty ledger still
/// produces rows (non-selectable placeholders), so the sale form never
/// renders an empty selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleTargetView {
    pub options: Vec<SaleTargetOption>,
}

/// Sold-vs-remaining pair for the aggregate proportion chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoldRemaining {
    pub sold: u64,
    pub remaining: u64,
}

/// Sold-vs-remaining pair for one item in the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSoldRemaining {
    pub label: String,
    pub sold: u32,
    pub remaining: u32,
}

/// Both chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartsView {
    /// Aggregate sold vs remaining, for a proportion display.
    pub proportion: SoldRemaining,
    /// Per-item sold vs remaining in ledger order, for a comparison display.
    pub comparison: Vec<ItemSoldRemaining>,
}

/// All four view-models computed from one ledger snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: StatsView,
    pub table: TableView,
    pub sale_targets: SaleTargetView,
    pub charts: ChartsView,
}

/// Recomputes every view-model. The single re-projection entry point: all
/// mutation paths go through this, nothing refreshes a view on its own.
pub fn project_dashboard(ledger: &Ledger) -> Dashboard {
    Dashboard {
        stats: project_stats(ledger),
        table: project_table(ledger),
        sale_targets: project_sale_targets(ledger),
        charts: project_charts(ledger),
    }
}

pub fn project_stats(ledger: &Ledger) -> StatsView {
    let totals = ledger.aggregate();
    StatsView {
        total_stock: totals.total_stock,
        stock_sold: totals.stock_sold,
        stock_remaining: totals.stock_remaining,
        total_value: format_currency(totals.total_value),
    }
}

pub fn project_table(ledger: &Ledger) -> TableView {
    if ledger.is_empty() {
        return TableView::Empty {
            message: EMPTY_TABLE_MESSAGE,
        };
    }

    let rows = ledger
        .items()
        .iter()
        .map(|item| TableRow {
            name: item.name.clone(),
            category: item.category.clone(),
            price: format_currency(item.price),
            quantity: item.quantity,
            sold: item.sold,
            remaining: item.remaining(),
            value: format_currency(item.value()),
        })
        .collect();
    TableView::Rows(rows)
}

pub fn project_sale_targets(ledger: &Ledger) -> SaleTargetView {
    let mut options = Vec::with_capacity(ledger.len().max(PLACEHOLDER_TARGET_COUNT) + 1);
    options.push(SaleTargetOption {
        id: String::new(),
        label: SELECT_ITEM_LABEL.to_string(),
        selectable: false,
    });

    if ledger.is_empty() {
        for slot in 1..=PLACEHOLDER_TARGET_COUNT {
            options.push(SaleTargetOption {
                id: format!("{PLACEHOLDER_ID_PREFIX}{slot}"),
                label: format!("Item {slot}"),
                selectable: false,
            });
        }
    } else {
        for (index, item) in ledger.items().iter().enumerate() {
            options.push(SaleTargetOption {
                id: index.to_string(),
                label: item.name.clone(),
                selectable: true,
            });
        }
    }

    SaleTargetView { options }
}

pub fn project_charts(ledger: &Ledger) -> ChartsView {
    let totals = ledger.aggregate();
    let comparison = ledger
        .items()
        .iter()
        .map(|item| ItemSoldRemaining {
            label: item.name.clone(),
            sold: item.sold,
            remaining: item.remaining(),
        })
        .collect();

    ChartsView {
        proportion: SoldRemaining {
            sold: totals.stock_sold,
            remaining: totals.stock_remaining,
        },
        comparison,
    }
}
