//! In-memory settlement store
//!
//! Backs the engine's own tests and any caller that wants settlement
//! semantics without a database. Mirrors the transactional contract of the
//! persistent store: `apply` is all-or-nothing and refuses a drawing whose
//! computed flag was already set.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use sorteo_types::{
    BillingStatement, DrawingId, LotteryId, LotteryVariant, SellerId, StatementId, Ticket,
    TicketId, WinningRecord,
};

use crate::{
    CommissionRow, DrawingSnapshot, SettlementStore, SettlementWriteSet, StoreError, StoreResult,
};

/// Thread-safe in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    drawings: Arc<RwLock<HashMap<DrawingId, DrawingSnapshot>>>,
    tickets: Arc<RwLock<HashMap<TicketId, Ticket>>>,
    records: Arc<RwLock<HashMap<DrawingId, WinningRecord>>>,
    commissions: Arc<RwLock<HashMap<(LotteryId, SellerId), Decimal>>>,
    statements: Arc<RwLock<Vec<BillingStatement>>>,
    balances: Arc<RwLock<HashMap<SellerId, Decimal>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a drawing with its lottery context.
    pub async fn insert_drawing(&self, snapshot: DrawingSnapshot) {
        self.drawings
            .write()
            .await
            .insert(snapshot.drawing.id, snapshot);
    }

    /// Register a sold ticket.
    pub async fn insert_ticket(&self, ticket: Ticket) {
        self.tickets.write().await.insert(ticket.id, ticket);
    }

    /// Declare the winning record of a drawing.
    pub async fn declare(&self, drawing_id: DrawingId, record: WinningRecord) {
        self.records.write().await.insert(drawing_id, record);
    }

    /// Provision a commission percent for one (seller, lottery) pair.
    pub async fn set_commission(&self, lottery_id: LotteryId, seller_id: SellerId, percent: Decimal) {
        self.commissions
            .write()
            .await
            .insert((lottery_id, seller_id), percent);
    }

    /// Current balance of a seller (zero when never settled).
    pub async fn balance(&self, seller_id: SellerId) -> Decimal {
        self.balances
            .read()
            .await
            .get(&seller_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All statements recorded for a drawing.
    pub async fn statements_for(&self, drawing_id: DrawingId) -> Vec<BillingStatement> {
        self.statements
            .read()
            .await
            .iter()
            .filter(|s| s.drawing_id == drawing_id)
            .cloned()
            .collect()
    }

    /// Fetch a ticket by id.
    pub async fn ticket(&self, ticket_id: TicketId) -> Option<Ticket> {
        self.tickets.read().await.get(&ticket_id).cloned()
    }
}

#[async_trait]
impl SettlementStore for InMemoryStore {
    async fn drawing_snapshot(
        &self,
        drawing_id: DrawingId,
    ) -> StoreResult<Option<DrawingSnapshot>> {
        let drawings = self.drawings.read().await;
        Ok(drawings
            .get(&drawing_id)
            .filter(|s| !s.drawing.is_deleted)
            .cloned())
    }

    async fn winning_record(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Option<WinningRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(&drawing_id)
            .filter(|r| r.variant() == variant)
            .cloned())
    }

    async fn open_tickets(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Vec<Ticket>> {
        let tickets = self.tickets.read().await;
        let mut open: Vec<Ticket> = tickets
            .values()
            .filter(|t| {
                t.drawing_id == drawing_id && t.is_billable() && t.lines.variant() == variant
            })
            .cloned()
            .collect();
        open.sort_by_key(|t| t.id);
        Ok(open)
    }

    async fn commissions(
        &self,
        lottery_id: LotteryId,
        sellers: &[SellerId],
    ) -> StoreResult<Vec<CommissionRow>> {
        let commissions = self.commissions.read().await;
        Ok(sellers
            .iter()
            .filter_map(|&seller_id| {
                commissions
                    .get(&(lottery_id, seller_id))
                    .map(|&percent| CommissionRow { seller_id, percent })
            })
            .collect())
    }

    async fn apply(&self, write_set: SettlementWriteSet) -> StoreResult<BillingStatement> {
        // Lock everything up front so the write set is applied as one unit.
        let mut drawings = self.drawings.write().await;
        let mut tickets = self.tickets.write().await;
        let mut statements = self.statements.write().await;
        let mut balances = self.balances.write().await;

        let snapshot = drawings
            .get_mut(&write_set.drawing_id)
            .ok_or_else(|| StoreError::Backend("drawing vanished mid-settlement".into()))?;
        if snapshot.drawing.is_computed {
            return Err(StoreError::Conflict(format!(
                "drawing {} already computed",
                write_set.drawing_id
            )));
        }
        snapshot.drawing.is_computed = true;

        for ticket_id in &write_set.consumed {
            if let Some(ticket) = tickets.get_mut(ticket_id) {
                ticket.is_computed = true;
            }
        }

        for line in &write_set.lines {
            *balances.entry(line.seller_id).or_insert(Decimal::ZERO) += line.balance_delta();
        }

        for winner in &write_set.winners {
            if let Some(ticket) = tickets.get_mut(&winner.ticket_id) {
                ticket.prize += winner.win_amount;
            }
        }

        let statement = BillingStatement {
            id: StatementId::new(),
            drawing_id: write_set.drawing_id,
            billing_date: write_set.billing_date,
            lines: write_set.lines,
        };
        statements.push(statement.clone());
        Ok(statement)
    }
}
