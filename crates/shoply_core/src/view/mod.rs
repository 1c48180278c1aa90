//! Pure view projections over the ledger.
//!
//! # Responsibility
//! - Map a ledger snapshot into the view-models consumed by the rendering
//!   layer: stats, table, sale targets, charts and the CSV export artifact.
//! - Keep rendering concerns out of core; projections are plain data.
//!
//! # Invariants
//! - Projections never mutate the ledger.
//! - A refresh fully replaces the previous view-models, never patches them.

pub mod export;
pub mod format;
pub mod projection;
