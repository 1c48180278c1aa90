//! Core use-case services.
//!
//! # Responsibility
//! - Validate raw command input, apply ledger mutations, persist, re-project.
//! - Keep the rendering layer decoupled from storage and domain details.

pub mod stock_service;
