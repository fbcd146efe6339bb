//! The settlement engine
//!
//! One entry point per billing request. Preconditions are checked in a fixed
//! order before any write; the write set itself is applied by the store in a
//! single transaction.

use chrono::Utc;
use tracing::{info, warn};

use sorteo_types::{Actor, BillingStatement, DrawingId, LotteryVariant, SellerId};

use crate::{
    aggregate, BankAccess, CommissionTable, SettlementError, SettlementResult, SettlementStore,
    SettlementWriteSet,
};

/// Settles drawings against an injected store and access policy.
pub struct SettlementEngine<S, A> {
    store: S,
    access: A,
}

impl<S: SettlementStore, A: BankAccess> SettlementEngine<S, A> {
    pub fn new(store: S, access: A) -> Self {
        Self { store, access }
    }

    /// The store this engine settles into.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settle one drawing.
    ///
    /// `endpoint_variant` is the variant of the billing endpoint that was
    /// called; a drawing belonging to a different variant is reported as not
    /// found rather than silently settled under the wrong rules.
    ///
    /// Preconditions, in order: the drawing exists, its variant matches the
    /// endpoint, the caller may edit the bank, the drawing is not already
    /// settled, a winning record is declared, and every participating seller
    /// has a commission row. All are verified before the transactional write
    /// set is applied, so failures here leave storage untouched.
    pub async fn settle(
        &self,
        drawing_id: DrawingId,
        endpoint_variant: LotteryVariant,
        actor: Actor,
    ) -> SettlementResult<BillingStatement> {
        let snapshot = self
            .store
            .drawing_snapshot(drawing_id)
            .await?
            .ok_or(SettlementError::DrawingNotFound { drawing_id })?;

        if snapshot.variant != endpoint_variant {
            return Err(SettlementError::VariantMismatch {
                drawing_id,
                expected: endpoint_variant,
                actual: snapshot.variant,
            });
        }

        if !self
            .access
            .can_edit_bank(snapshot.bank_owner, actor)
            .await?
        {
            warn!(%drawing_id, actor = %actor.id, "settlement refused: not authorized");
            return Err(SettlementError::NotAuthorized);
        }

        if snapshot.drawing.is_computed {
            return Err(SettlementError::AlreadySettled { drawing_id });
        }

        let record = self
            .store
            .winning_record(drawing_id, snapshot.variant)
            .await?
            .ok_or(SettlementError::Unresolved { drawing_id })?;

        let tickets = self
            .store
            .open_tickets(drawing_id, snapshot.variant)
            .await?;

        let sellers: Vec<SellerId> = {
            let mut ids: Vec<SellerId> = tickets.iter().map(|t| t.seller_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let rows = self.store.commissions(snapshot.lottery_id, &sellers).await?;
        let commissions = CommissionTable::new(snapshot.lottery_id, rows)?;

        let aggregation = aggregate(&tickets, &record, &snapshot.config, &commissions)?;

        info!(
            %drawing_id,
            variant = %snapshot.variant,
            tickets = aggregation.consumed.len(),
            sellers = aggregation.lines.len(),
            winners = aggregation.winners.len(),
            "applying settlement write set"
        );

        let statement = self
            .store
            .apply(SettlementWriteSet {
                drawing_id,
                billing_date: Utc::now(),
                lines: aggregation.lines,
                winners: aggregation.winners,
                consumed: aggregation.consumed,
            })
            .await?;

        info!(%drawing_id, statement = %statement.id, "drawing settled");
        Ok(statement)
    }
}
