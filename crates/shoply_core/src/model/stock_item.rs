//! Stock item domain model.
//!
//! # Responsibility
//! - Define the canonical inventory line record shared by ledger, storage
//!   and view projections.
//! - Enforce per-item field rules via `validate()`.
//!
//! # Invariants
//! - `price` is finite and strictly positive.
//! - `quantity` is strictly positive.
//! - `0 <= sold <= quantity` at all times.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One inventory line: units received, units sold so far.
///
/// Serialized field names match the persisted ledger blob, so a blob written
/// by an earlier session round-trips without translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    /// Display label. Non-empty after trimming.
    pub name: String,
    /// Free-text grouping label. May be empty.
    pub category: String,
    /// Unit price. Finite and strictly positive.
    pub price: f64,
    /// Units received. Strictly positive.
    pub quantity: u32,
    /// Units sold so far. Never exceeds `quantity`.
    pub sold: u32,
}

/// Field-level validation failure for one stock item.
#[derive(Debug, Clone, PartialEq)]
pub enum StockItemValidationError {
    /// Name is empty after trimming surrounding whitespace.
    EmptyName,
    /// Price is non-positive, NaN or infinite.
    InvalidPrice(f64),
    /// Quantity is zero.
    ZeroQuantity,
    /// Sold count exceeds the received quantity.
    SoldExceedsQuantity { sold: u32, quantity: u32 },
}

impl Display for StockItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name cannot be empty"),
            Self::InvalidPrice(price) => {
                write!(f, "price must be a finite positive number, got {price}")
            }
            Self::ZeroQuantity => write!(f, "quantity must be greater than zero"),
            Self::SoldExceedsQuantity { sold, quantity } => {
                write!(f, "sold count {sold} exceeds received quantity {quantity}")
            }
        }
    }
}

impl Error for StockItemValidationError {}

impl StockItem {
    /// Creates a fresh, unsold item. Text fields are stored trimmed.
    ///
    /// Does not validate; callers on write paths go through
    /// [`StockItem::validate`] (directly or via the ledger).
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            category: category.into().trim().to_string(),
            price,
            quantity,
            sold: 0,
        }
    }

    /// Checks all field rules, including rules over persisted state
    /// (`sold <= quantity`).
    pub fn validate(&self) -> Result<(), StockItemValidationError> {
        if self.name.trim().is_empty() {
            return Err(StockItemValidationError::EmptyName);
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(StockItemValidationError::InvalidPrice(self.price));
        }
        if self.quantity == 0 {
            return Err(StockItemValidationError::ZeroQuantity);
        }
        if self.sold > self.quantity {
            return Err(StockItemValidationError::SoldExceedsQuantity {
                sold: self.sold,
                quantity: self.quantity,
            });
        }
        Ok(())
    }

    /// Units still in stock.
    pub fn remaining(&self) -> u32 {
        self.quantity - self.sold
    }

    /// Resale value of the units still in stock.
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::{StockItem, StockItemValidationError};

    #[test]
    fn new_trims_text_fields_and_starts_unsold() {
        let item = StockItem::new("  Rice Bag ", " Grains  ", 25000.0, 10);
        assert_eq!(item.name, "Rice Bag");
        assert_eq!(item.category, "Grains");
        assert_eq!(item.sold, 0);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn remaining_and_value_follow_sold_count() {
        let mut item = StockItem::new("Rice Bag", "Grains", 25000.0, 10);
        item.sold = 3;
        assert_eq!(item.remaining(), 7);
        assert_eq!(item.value(), 175000.0);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert_eq!(
            StockItem::new("   ", "", 10.0, 1).validate(),
            Err(StockItemValidationError::EmptyName)
        );
        assert!(matches!(
            StockItem::new("a", "", 0.0, 1).validate(),
            Err(StockItemValidationError::InvalidPrice(_))
        ));
        assert!(matches!(
            StockItem::new("a", "", f64::NAN, 1).validate(),
            Err(StockItemValidationError::InvalidPrice(_))
        ));
        assert_eq!(
            StockItem::new("a", "", 10.0, 0).validate(),
            Err(StockItemValidationError::ZeroQuantity)
        );

        let mut oversold = StockItem::new("a", "", 10.0, 2);
        oversold.sold = 3;
        assert_eq!(
            oversold.validate(),
            Err(StockItemValidationError::SoldExceedsQuantity {
                sold: 3,
                quantity: 2
            })
        );
    }
}
