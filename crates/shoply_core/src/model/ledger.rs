//! Stock ledger: the ordered, in-memory source of truth for inventory state.
//!
//! # Responsibility
//! - Own every inventory mutation (add item, record sale, reset).
//! - Derive aggregate totals as a pure fold over the current items.
//!
//! # Invariants
//! - Item order is insertion order; growth is append-only. The item index is
//!   the address space used by sale commands.
//! - Every contained item satisfies `StockItem::validate()` after every
//!   successful operation; failed operations leave the ledger untouched.

use crate::model::stock_item::{StockItem, StockItemValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error raised by ledger mutations.
///
/// Bad-target and bad-quantity cases stay separate variants so callers can
/// surface distinct messages for them.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// A candidate or persisted item failed field validation.
    Item(StockItemValidationError),
    /// Sale addressed to an index outside the occupied range.
    InvalidIndex { index: usize, len: usize },
    /// Sale quantity was zero.
    QuantityNotPositive,
    /// Sale quantity exceeds the units still in stock.
    InsufficientStock { requested: u32, remaining: u32 },
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item(err) => write!(f, "{err}"),
            Self::InvalidIndex { index, len } => {
                write!(f, "no stock item at index {index} (ledger holds {len})")
            }
            Self::QuantityNotPositive => write!(f, "sale quantity must be greater than zero"),
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

impl Error for LedgerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Item(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StockItemValidationError> for LedgerError {
    fn from(value: StockItemValidationError) -> Self {
        Self::Item(value)
    }
}

/// Aggregate totals over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockTotals {
    /// Sum of units received across all items.
    pub total_stock: u64,
    /// Sum of units sold across all items.
    pub stock_sold: u64,
    /// `total_stock - stock_sold`.
    pub stock_remaining: u64,
    /// Sum of `price * remaining` across all items.
    pub total_value: f64,
}

/// Ordered collection of stock items, correct by construction: every public
/// constructor and mutation validates before committing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    items: Vec<StockItem>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted items, re-validating each one.
    ///
    /// Rejecting invalid persisted state here keeps corruption visible to the
    /// caller instead of silently carrying it into the session.
    pub fn from_items(items: Vec<StockItem>) -> Result<Self, LedgerError> {
        for item in &items {
            item.validate()?;
        }
        Ok(Self { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    /// Item at `index`, if occupied.
    pub fn get(&self, index: usize) -> Option<&StockItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a new unsold item and returns a reference to the stored copy.
    ///
    /// Text fields are trimmed before validation. On error nothing is
    /// appended.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Result<&StockItem, LedgerError> {
        let item = StockItem::new(name, category, price, quantity);
        item.validate()?;
        self.items.push(item);
        Ok(self.items.last().expect("push appends one item"))
    }

    /// Records a sale of `qty` units against the item at `index`.
    ///
    /// Checks the target before the quantity, so a sale against a bad index
    /// reports `InvalidIndex` even when the quantity is also bad.
    pub fn record_sale(&mut self, index: usize, qty: u32) -> Result<&StockItem, LedgerError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LedgerError::InvalidIndex { index, len })?;

        if qty == 0 {
            return Err(LedgerError::QuantityNotPositive);
        }
        let remaining = item.remaining();
        if qty > remaining {
            return Err(LedgerError::InsufficientStock {
                requested: qty,
                remaining,
            });
        }

        item.sold += qty;
        Ok(item)
    }

    /// Clears the ledger. Idempotent.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Pure fold over the current items; safe to call any number of times.
    pub fn aggregate(&self) -> StockTotals {
        let mut total_stock: u64 = 0;
        let mut stock_sold: u64 = 0;
        let mut total_value = 0.0;

        for item in &self.items {
            total_stock += u64::from(item.quantity);
            stock_sold += u64::from(item.sold);
            total_value += item.value();
        }

        StockTotals {
            total_stock,
            stock_sold,
            stock_remaining: total_stock - stock_sold,
            total_value,
        }
    }
}
