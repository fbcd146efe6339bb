//! Seller balance repository
//!
//! Balances are incremented only by the settlement transaction. The single
//! mutation exposed here is the payment/collection that clears a balance to
//! exactly zero, transferring the delta into a cash operation record.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbCashOperation, DbError, DbResult, DbSellerBalance};

/// Seller balance repository
pub struct BalanceRepo {
    pool: PgPool,
}

impl BalanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current balance of a seller (zero when never settled)
    pub async fn find(&self, seller_id: Uuid) -> DbResult<DbSellerBalance> {
        let balance = sqlx::query_as::<_, DbSellerBalance>(
            "SELECT seller_id, balance, updated_at FROM seller_balances WHERE seller_id = $1",
        )
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(balance.unwrap_or(DbSellerBalance {
            seller_id,
            balance: Decimal::ZERO,
            updated_at: chrono::Utc::now(),
        }))
    }

    /// Clear a seller's balance to zero, recording the transferred delta as
    /// a cash operation.
    ///
    /// Positive balances become collections (seller pays the bank), negative
    /// balances become payments (bank pays the seller). A zero balance has
    /// nothing to transfer.
    pub async fn clear(&self, seller_id: Uuid) -> DbResult<DbCashOperation> {
        let mut tx = self.pool.begin().await?;

        let current: Option<Decimal> = sqlx::query_scalar(
            "SELECT balance FROM seller_balances WHERE seller_id = $1 FOR UPDATE",
        )
        .bind(seller_id)
        .fetch_optional(&mut *tx)
        .await?;

        let balance = current.unwrap_or(Decimal::ZERO);
        if balance == Decimal::ZERO {
            return Err(DbError::InvalidInput(format!(
                "seller {seller_id} balance is already zero"
            )));
        }

        let kind = if balance > Decimal::ZERO {
            "collection"
        } else {
            "payment"
        };

        let operation = sqlx::query_as::<_, DbCashOperation>(
            r#"
            INSERT INTO cash_operations (id, seller_id, kind, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, seller_id, kind, amount, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(seller_id)
        .bind(kind)
        .bind(balance.abs())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE seller_balances SET balance = 0, updated_at = NOW() WHERE seller_id = $1",
        )
        .bind(seller_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(operation)
    }

    /// Cash operation history of a seller, newest first
    pub async fn history(&self, seller_id: Uuid, limit: i64) -> DbResult<Vec<DbCashOperation>> {
        let operations = sqlx::query_as::<_, DbCashOperation>(
            r#"
            SELECT id, seller_id, kind, amount, created_at
            FROM cash_operations
            WHERE seller_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(seller_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(operations)
    }
}
