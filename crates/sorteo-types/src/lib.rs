//! Sorteo Types - Canonical domain types for lottery banking
//!
//! This crate contains all foundational types for Sorteo with zero dependencies
//! on other sorteo crates. It defines the complete type system for:
//!
//! - Identity types (BankId, SellerId, DrawingId, etc.)
//! - Lottery variants and their bet-line shapes
//! - Winning-number records, one shape per variant
//! - Variant payout configuration (multipliers, ball types)
//! - Billing statements and seller billing lines
//!
//! # Architectural Invariants
//!
//! These types support the core settlement invariants:
//!
//! 1. A drawing is settled at most once (`is_computed` is terminal)
//! 2. Cancelled tickets never participate in billing
//! 3. Billing statements are append-only ledger records
//! 4. All monetary amounts are exact decimals, never floats

pub mod actor;
pub mod bet;
pub mod billing;
pub mod config;
pub mod drawing;
pub mod error;
pub mod identity;
pub mod ticket;
pub mod variant;
pub mod winning;

pub use actor::*;
pub use bet::*;
pub use billing::*;
pub use config::*;
pub use drawing::*;
pub use error::*;
pub use identity::*;
pub use ticket::*;
pub use variant::*;
pub use winning::*;

/// Version of the Sorteo types schema
pub const TYPES_VERSION: &str = "0.1.0";
