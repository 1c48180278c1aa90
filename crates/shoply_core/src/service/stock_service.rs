//! Stock command handlers: add stock, record sale, reset, export.
//!
//! # Responsibility
//! - Parse and validate raw form input before any ledger mutation.
//! - Run every successful mutation through the same persist + re-project
//!   tail, so the four views and the stored blob stay consistent.
//!
//! # Invariants
//! - Rejected commands mutate nothing, persist nothing, re-project nothing.
//! - Persistence failure after a mutation is non-fatal: the in-memory ledger
//!   stays authoritative and the outcome carries the failure as a warning.

use crate::model::ledger::{Ledger, LedgerError};
use crate::repo::ledger_repo::{LedgerRepository, RepoError};
use crate::view::export::{export_csv, CsvExport};
use crate::view::projection::{is_placeholder_id, project_dashboard, Dashboard};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw add-stock form input, untrimmed and unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddStockForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

/// Raw record-sale form input. `target` is a sale-target option id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSaleForm {
    pub target: String,
    pub quantity: String,
}

/// Outcome of the explicit confirmation step required before a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDecision {
    Confirmed,
    Cancelled,
}

/// Command rejection, recoverable at the command boundary.
#[derive(Debug)]
pub enum StockServiceError {
    /// Add-stock input failed validation (name, price or quantity).
    Validation(String),
    /// Sale targeted a placeholder, blank or unoccupied selector entry.
    InvalidTarget(String),
    /// Sale quantity was non-numeric or not positive.
    InvalidQuantity(String),
    /// Sale quantity exceeds the units still in stock.
    InsufficientStock { requested: u32, remaining: u32 },
}

impl Display for StockServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::InvalidTarget(target) => write!(f, "invalid sale target `{target}`"),
            Self::InvalidQuantity(raw) => write!(f, "invalid sale quantity `{raw}`"),
            Self::InsufficientStock {
                requested,
                remaining,
            } => write!(
                f,
                "sale quantity {requested} exceeds remaining stock {remaining}"
            ),
        }
    }
}

impl Error for StockServiceError {}

impl StockServiceError {
    /// User-facing notification text for the rendering layer's blocking
    /// message capability.
    pub fn notification(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::InvalidTarget(target) if is_placeholder_id(target) => {
                "This is a placeholder item. Please add stock for this item first \
                 using the \"Add Stock\" form."
                    .to_string()
            }
            Self::InvalidTarget(_) => {
                "Please select a valid stock item to record a sale.".to_string()
            }
            Self::InvalidQuantity(_) | Self::InsufficientStock { .. } => {
                "Invalid quantity".to_string()
            }
        }
    }
}

/// Result of a successful command: the recomputed views, plus a persistence
/// warning when the store write failed.
#[derive(Debug)]
pub struct CommandOutcome {
    pub dashboard: Dashboard,
    pub persistence_warning: Option<RepoError>,
}

/// Command handler facade owning the session ledger and its repository.
///
/// Mutating commands take `&mut self`, so command execution is serialized by
/// construction; no locking is involved anywhere in core.
pub struct StockService<R: LedgerRepository> {
    ledger: Ledger,
    repo: R,
}

impl<R: LedgerRepository> StockService<R> {
    /// Starts a session from persisted state.
    ///
    /// Absent state starts empty; corrupt or unreadable state is recovered
    /// to an empty ledger with a warning rather than failing the session.
    pub fn open(repo: R) -> Self {
        let ledger = match repo.load() {
            Ok(Some(ledger)) => {
                info!(
                    "event=ledger_load module=service status=ok item_count={}",
                    ledger.len()
                );
                ledger
            }
            Ok(None) => {
                info!("event=ledger_load module=service status=absent");
                Ledger::new()
            }
            Err(err) => {
                warn!("event=ledger_load module=service status=recovered error={err}");
                Ledger::new()
            }
        };

        Self { ledger, repo }
    }

    /// Current ledger snapshot.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Recomputes all four view-models without mutating anything. Used to
    /// render the initial screen after `open`.
    pub fn dashboard(&self) -> Dashboard {
        project_dashboard(&self.ledger)
    }

    /// Validates and applies an add-stock submission.
    pub fn add_stock(
        &mut self,
        form: &AddStockForm,
    ) -> Result<CommandOutcome, StockServiceError> {
        let result = self.try_add_stock(form);
        match &result {
            Ok(_) => info!(
                "event=add_stock module=service status=ok item_count={}",
                self.ledger.len()
            ),
            Err(err) => warn!("event=add_stock module=service status=rejected error={err}"),
        }
        result
    }

    fn try_add_stock(
        &mut self,
        form: &AddStockForm,
    ) -> Result<CommandOutcome, StockServiceError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(StockServiceError::Validation(
                "item name cannot be empty".to_string(),
            ));
        }
        let price = parse_price(&form.price)?;
        let quantity = parse_add_quantity(&form.quantity)?;

        self.ledger
            .add_item(name, form.category.trim(), price, quantity)
            .map_err(|err| StockServiceError::Validation(err.to_string()))?;

        Ok(self.commit("add_stock"))
    }

    /// Validates and applies a record-sale submission.
    pub fn record_sale(
        &mut self,
        form: &RecordSaleForm,
    ) -> Result<CommandOutcome, StockServiceError> {
        let result = self.try_record_sale(form);
        match &result {
            Ok(_) => info!("event=record_sale module=service status=ok"),
            Err(err) => warn!("event=record_sale module=service status=rejected error={err}"),
        }
        result
    }

    fn try_record_sale(
        &mut self,
        form: &RecordSaleForm,
    ) -> Result<CommandOutcome, StockServiceError> {
        let target = form.target.trim();
        if target.is_empty() || is_placeholder_id(target) {
            return Err(StockServiceError::InvalidTarget(target.to_string()));
        }
        let index: usize = target
            .parse()
            .map_err(|_| StockServiceError::InvalidTarget(target.to_string()))?;

        let raw_qty = form.quantity.trim();
        let qty: u32 = raw_qty
            .parse()
            .map_err(|_| StockServiceError::InvalidQuantity(raw_qty.to_string()))?;

        let applied = self.ledger.record_sale(index, qty).map(|_| ());
        match applied {
            Ok(()) => Ok(self.commit("record_sale")),
            Err(LedgerError::InvalidIndex { .. }) => {
                Err(StockServiceError::InvalidTarget(target.to_string()))
            }
            Err(LedgerError::QuantityNotPositive) => {
                Err(StockServiceError::InvalidQuantity(raw_qty.to_string()))
            }
            Err(LedgerError::InsufficientStock {
                requested,
                remaining,
            }) => Err(StockServiceError::InsufficientStock {
                requested,
                remaining,
            }),
            Err(err @ LedgerError::Item(_)) => {
                Err(StockServiceError::Validation(err.to_string()))
            }
        }
    }

    /// Clears all data once the user has confirmed the irreversible action.
    ///
    /// Returns `None` when the confirmation was declined; nothing happens in
    /// that case. Idempotent when confirmed.
    pub fn reset(&mut self, decision: ResetDecision) -> Option<CommandOutcome> {
        match decision {
            ResetDecision::Cancelled => {
                info!("event=reset_data module=service status=cancelled");
                None
            }
            ResetDecision::Confirmed => {
                self.ledger.reset();
                let persistence_warning = match self.repo.clear() {
                    Ok(()) => None,
                    Err(err) => {
                        error!("event=reset_data module=service status=error error={err}");
                        Some(err)
                    }
                };
                info!("event=reset_data module=service status=ok");
                Some(CommandOutcome {
                    dashboard: project_dashboard(&self.ledger),
                    persistence_warning,
                })
            }
        }
    }

    /// Renders the current ledger as a downloadable CSV snapshot.
    pub fn export_csv(&self) -> CsvExport {
        let export = export_csv(&self.ledger);
        info!(
            "event=export_csv module=service status=ok row_count={}",
            self.ledger.len()
        );
        export
    }

    /// The single persist + re-project tail shared by every mutation path.
    fn commit(&self, command: &'static str) -> CommandOutcome {
        let persistence_warning = match self.repo.save(&self.ledger) {
            Ok(()) => None,
            Err(err) => {
                error!(
                    "event=ledger_save module=service status=error command={command} error={err}"
                );
                Some(err)
            }
        };

        CommandOutcome {
            dashboard: project_dashboard(&self.ledger),
            persistence_warning,
        }
    }
}

fn parse_price(raw: &str) -> Result<f64, StockServiceError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(StockServiceError::Validation(format!(
            "price must be a positive number, got `{trimmed}`"
        ))),
    }
}

fn parse_add_quantity(raw: &str) -> Result<u32, StockServiceError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(StockServiceError::Validation(format!(
            "quantity must be a positive whole number, got `{trimmed}`"
        ))),
    }
}
