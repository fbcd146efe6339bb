//! Settlement storage interface
//!
//! The engine never talks to a database directly. It reads through this trait
//! and hands back one [`SettlementWriteSet`] that the implementation must
//! apply atomically: all five steps commit together or none do.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sorteo_types::{
    BankId, BillingStatement, Drawing, DrawingId, LotteryId, LotteryVariant, SellerBillingLine,
    SellerId, Ticket, TicketId, UserId, VariantConfig, WinnerTicket, WinningRecord,
};

use crate::{CommissionRow, StoreError};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Everything the engine needs to know about a drawing before settling it.
#[derive(Debug, Clone)]
pub struct DrawingSnapshot {
    pub drawing: Drawing,
    pub lottery_id: LotteryId,
    pub variant: LotteryVariant,
    pub config: VariantConfig,
    pub bank_id: BankId,
    /// Platform user who owns the bank; authorization is checked against it.
    pub bank_owner: UserId,
}

/// The atomic write set of one settlement run.
///
/// Applying it performs, in one transaction:
///
/// 1. mark the drawing computed
/// 2. mark every consumed ticket computed
/// 3. insert the billing statement with its seller lines
/// 4. increment each seller balance by the line's signed delta
/// 5. increment each winner ticket's accumulated prize
#[derive(Debug, Clone)]
pub struct SettlementWriteSet {
    pub drawing_id: DrawingId,
    pub billing_date: DateTime<Utc>,
    pub lines: Vec<SellerBillingLine>,
    pub winners: Vec<WinnerTicket>,
    pub consumed: Vec<TicketId>,
}

/// Transactional storage for settlement.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Drawing with its lottery variant, payout config, and owning bank.
    /// Soft-deleted drawings are reported as absent.
    async fn drawing_snapshot(&self, drawing_id: DrawingId)
        -> StoreResult<Option<DrawingSnapshot>>;

    /// Declared winning record for the drawing, in the given variant's shape.
    async fn winning_record(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Option<WinningRecord>>;

    /// Billable tickets of the drawing: not cancelled, not yet computed.
    /// The variant selects which bet-line shape to load.
    async fn open_tickets(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Vec<Ticket>>;

    /// Provisioned commission rows for the given sellers on one lottery.
    /// Sellers without a row are simply absent from the result.
    async fn commissions(
        &self,
        lottery_id: LotteryId,
        sellers: &[SellerId],
    ) -> StoreResult<Vec<CommissionRow>>;

    /// Apply the write set atomically and return the persisted statement.
    ///
    /// Implementations must fail with [`StoreError::Conflict`] when the
    /// drawing was concurrently consumed (its computed flag already set),
    /// leaving storage untouched.
    async fn apply(&self, write_set: SettlementWriteSet) -> StoreResult<BillingStatement>;
}
