//! PostgreSQL settlement store
//!
//! Implements the billing engine's storage interface. Reads go through the
//! repositories; the write set runs in a single transaction with a computed
//! guard on the drawing row, so a concurrent second run updates zero rows and
//! aborts without touching balances.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use sorteo_billing::{
    CommissionRow, DrawingSnapshot, SettlementStore, SettlementWriteSet, StoreError, StoreResult,
};
use sorteo_types::{
    BankId, BillingStatement, Drawing, DrawingId, LotteryId, LotteryVariant, SellerId, StatementId,
    Ticket, UserId, WinningRecord,
};

use crate::{CommissionRepo, DbError, DrawingRepo, LotteryRepo, ResultRepo, TicketRepo};

/// Default upper bound on the settlement transaction, in milliseconds.
/// The write set iterates per ticket; an unbounded transaction would hold
/// row locks for the whole sweep.
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 30_000;

/// Settlement store over a PostgreSQL pool
pub struct PgSettlementStore {
    pool: PgPool,
    statement_timeout_ms: u64,
}

impl PgSettlementStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statement_timeout_ms: DEFAULT_STATEMENT_TIMEOUT_MS,
        }
    }

    /// Override the transaction statement timeout.
    pub fn with_statement_timeout(mut self, timeout_ms: u64) -> Self {
        self.statement_timeout_ms = timeout_ms;
        self
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[async_trait]
impl SettlementStore for PgSettlementStore {
    async fn drawing_snapshot(
        &self,
        drawing_id: DrawingId,
    ) -> StoreResult<Option<DrawingSnapshot>> {
        let repo = DrawingRepo::new(self.pool.clone());
        let Some(context) = repo.find_context(drawing_id.0).await? else {
            return Ok(None);
        };

        let variant = LotteryVariant::from_i16(context.variant).ok_or_else(|| {
            StoreError::Backend(format!("unknown lottery variant {}", context.variant))
        })?;

        let config = LotteryRepo::new(self.pool.clone())
            .variant_config(context.lottery_id, variant)
            .await?;

        Ok(Some(DrawingSnapshot {
            drawing: Drawing {
                id: DrawingId(context.id),
                lottery_id: LotteryId(context.lottery_id),
                date: context.date,
                is_deleted: context.is_deleted,
                is_computed: context.is_computed,
            },
            lottery_id: LotteryId(context.lottery_id),
            variant,
            config,
            bank_id: BankId(context.bank_id),
            bank_owner: UserId(context.bank_owner),
        }))
    }

    async fn winning_record(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Option<WinningRecord>> {
        let record = ResultRepo::new(self.pool.clone())
            .find(drawing_id.0, variant)
            .await?;
        Ok(record)
    }

    async fn open_tickets(
        &self,
        drawing_id: DrawingId,
        variant: LotteryVariant,
    ) -> StoreResult<Vec<Ticket>> {
        let tickets = TicketRepo::new(self.pool.clone())
            .open_by_drawing(drawing_id.0, variant)
            .await?;
        Ok(tickets)
    }

    async fn commissions(
        &self,
        lottery_id: LotteryId,
        sellers: &[SellerId],
    ) -> StoreResult<Vec<CommissionRow>> {
        let ids: Vec<Uuid> = sellers.iter().map(|s| s.0).collect();
        let rows = CommissionRepo::new(self.pool.clone())
            .for_sellers(lottery_id.0, &ids)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CommissionRow {
                seller_id: SellerId(r.seller_id),
                percent: r.percent,
            })
            .collect())
    }

    async fn apply(&self, write_set: SettlementWriteSet) -> StoreResult<BillingStatement> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // Bound the transaction so the per-ticket sweep cannot hold locks
        // indefinitely.
        sqlx::query(&format!(
            "SET LOCAL statement_timeout = {}",
            self.statement_timeout_ms
        ))
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        // Step 1: consume the drawing. The computed guard makes this the
        // single-writer lock; a racer that lost finds zero rows.
        let consumed = sqlx::query(
            "UPDATE drawings SET is_computed = TRUE WHERE id = $1 AND is_computed = FALSE",
        )
        .bind(write_set.drawing_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        if consumed.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!(
                "drawing {} already computed",
                write_set.drawing_id
            )));
        }

        // Step 2: consume every billable ticket of the drawing.
        sqlx::query(
            r#"
            UPDATE tickets SET is_computed = TRUE
            WHERE drawing_id = $1 AND is_cancelled = FALSE AND is_computed = FALSE
            "#,
        )
        .bind(write_set.drawing_id.0)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        // Step 3: the statement and its seller lines.
        let statement_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO billing_statements (id, drawing_id, billing_date) VALUES ($1, $2, $3)",
        )
        .bind(statement_id)
        .bind(write_set.drawing_id.0)
        .bind(write_set.billing_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))?;

        for line in &write_set.lines {
            sqlx::query(
                r#"
                INSERT INTO seller_billing_lines
                    (id, statement_id, seller_id, quantity_sold, commission, prize_to_be_paid)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(statement_id)
            .bind(line.seller_id.0)
            .bind(line.quantity_sold)
            .bind(line.commission)
            .bind(line.prize_to_be_paid)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

            // Step 4: balance delta, applied SQL-side so concurrent
            // settlements of other drawings cannot lose updates.
            sqlx::query(
                r#"
                INSERT INTO seller_balances (seller_id, balance)
                VALUES ($1, $2)
                ON CONFLICT (seller_id)
                DO UPDATE SET balance = seller_balances.balance + $2, updated_at = NOW()
                "#,
            )
            .bind(line.seller_id.0)
            .bind(line.balance_delta())
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        // Step 5: credit winner tickets.
        for winner in &write_set.winners {
            sqlx::query("UPDATE tickets SET prize = prize + $2 WHERE id = $1")
                .bind(winner.ticket_id.0)
                .bind(winner.win_amount)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        info!(
            drawing_id = %write_set.drawing_id,
            statement_id = %statement_id,
            lines = write_set.lines.len(),
            winners = write_set.winners.len(),
            "settlement write set committed"
        );

        Ok(BillingStatement {
            id: StatementId(statement_id),
            drawing_id: write_set.drawing_id,
            billing_date: write_set.billing_date,
            lines: write_set.lines,
        })
    }
}
