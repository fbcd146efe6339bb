//! Settlement error taxonomy
//!
//! Precondition failures are reported before any write is attempted; store
//! failures inside the transactional body roll the whole write set back. The
//! two classes stay distinguishable so callers can reason about retries.

use sorteo_types::{DrawingId, LotteryId, LotteryVariant, SellerId, SorteoError};
use thiserror::Error;

/// Result type for settlement operations
pub type SettlementResult<T> = std::result::Result<T, SettlementError>;

/// Errors surfaced by the settlement store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A guarded write found the drawing already consumed by a concurrent run.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Anything the backend could not do (connectivity, constraint, etc).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors produced by the settlement engine
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("drawing {drawing_id} not found")]
    DrawingNotFound { drawing_id: DrawingId },

    #[error("drawing {drawing_id} belongs to a {actual} lottery, not {expected}")]
    VariantMismatch {
        drawing_id: DrawingId,
        expected: LotteryVariant,
        actual: LotteryVariant,
    },

    #[error("caller is not allowed to edit this bank")]
    NotAuthorized,

    #[error("drawing {drawing_id} has already been settled")]
    AlreadySettled { drawing_id: DrawingId },

    #[error("drawing {drawing_id} has no declared winning numbers")]
    Unresolved { drawing_id: DrawingId },

    #[error("seller {seller_id} has no commission for lottery {lottery_id}")]
    MissingCommission {
        seller_id: SellerId,
        lottery_id: LotteryId,
    },

    #[error(transparent)]
    Domain(#[from] SorteoError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse classification used by the API layer for status mapping and
/// message-catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotAuthorized,
    AlreadySettled,
    Unresolved,
    DataIntegrity,
    Internal,
}

impl SettlementError {
    /// Classify the error for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DrawingNotFound { .. } | Self::VariantMismatch { .. } => ErrorKind::NotFound,
            Self::NotAuthorized => ErrorKind::NotAuthorized,
            Self::AlreadySettled { .. } => ErrorKind::AlreadySettled,
            Self::Store(StoreError::Conflict(_)) => ErrorKind::AlreadySettled,
            Self::Unresolved { .. } => ErrorKind::Unresolved,
            Self::MissingCommission { .. } | Self::Domain(_) => ErrorKind::DataIntegrity,
            Self::Store(StoreError::Backend(_)) => ErrorKind::Internal,
        }
    }

    /// True when the failure happened before the transactional body, leaving
    /// storage untouched.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_separate_precondition_classes() {
        let id = DrawingId::new();
        assert_eq!(
            SettlementError::DrawingNotFound { drawing_id: id }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SettlementError::AlreadySettled { drawing_id: id }.kind(),
            ErrorKind::AlreadySettled
        );
        assert_eq!(SettlementError::NotAuthorized.kind(), ErrorKind::NotAuthorized);
    }

    #[test]
    fn store_failures_are_not_precondition_failures() {
        let err = SettlementError::Store(StoreError::Backend("boom".into()));
        assert!(!err.is_precondition());
        assert!(SettlementError::NotAuthorized.is_precondition());
    }
}
