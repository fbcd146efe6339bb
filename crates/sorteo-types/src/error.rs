//! Shared domain error types
//!
//! Failure is explicit: anything a calculator or validator can reject is a
//! named variant, never a silent zero.

use thiserror::Error;

use crate::LotteryVariant;

/// Result type for domain-level operations
pub type Result<T> = std::result::Result<T, SorteoError>;

/// Domain errors shared across sorteo crates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SorteoError {
    /// Bet lines, winning record, and config must agree on the variant.
    #[error("variant mismatch: expected {expected}, got {actual}")]
    VariantMismatch {
        expected: LotteryVariant,
        actual: LotteryVariant,
    },

    /// Commission percentages are constrained to [0, 100].
    #[error("commission percent out of range: {percent}")]
    PercentOutOfRange { percent: String },

    /// Bet numbers are constrained to the lottery's number space.
    #[error("bet number out of range: {number}")]
    NumberOutOfRange { number: i16 },

    /// Stake amounts must be strictly positive.
    #[error("stake amount must be positive, got {amount}")]
    NonPositiveAmount { amount: String },
}
