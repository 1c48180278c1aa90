//! Persistence layer abstractions and the SQLite implementation.
//!
//! # Responsibility
//! - Define the opaque load/save/clear contract for the persisted ledger.
//! - Keep key-value storage details out of service/business orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it; the
//!   session layer decides how to recover.

pub mod ledger_repo;
