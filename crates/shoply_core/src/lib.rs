//! Core domain logic for Shoply, a single-user stock tracker.
//! This crate is the single source of truth for inventory invariants.
//!
//! The rendering layer is an external consumer: it feeds raw form input to
//! [`StockService`] and renders the [`Dashboard`] view-models it gets back.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ledger::{Ledger, LedgerError, StockTotals};
pub use model::stock_item::{StockItem, StockItemValidationError};
pub use repo::ledger_repo::{
    LedgerRepository, RepoError, RepoResult, SqliteLedgerRepository, LEDGER_STORE_KEY,
};
pub use service::stock_service::{
    AddStockForm, CommandOutcome, RecordSaleForm, ResetDecision, StockService, StockServiceError,
};
pub use view::export::{export_csv, CsvExport, CSV_HEADER, EXPORT_FILE_NAME};
pub use view::format::format_currency;
pub use view::projection::{
    is_placeholder_id, project_dashboard, ChartsView, Dashboard, ItemSoldRemaining,
    SaleTargetOption, SaleTargetView, SoldRemaining, StatsView, TableRow, TableView,
    EMPTY_TABLE_MESSAGE, PLACEHOLDER_TARGET_COUNT, SELECT_ITEM_LABEL,
};
