//! Seller commission repository

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbCommission, DbError, DbResult};

/// Seller commission repository
pub struct CommissionRepo {
    pool: PgPool,
}

impl CommissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Provision (or update) the commission percent of a seller on a lottery
    pub async fn set(&self, seller_id: Uuid, lottery_id: Uuid, percent: Decimal) -> DbResult<()> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DbError::InvalidInput(format!(
                "commission percent out of range: {percent}"
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO seller_commissions (seller_id, lottery_id, percent)
            VALUES ($1, $2, $3)
            ON CONFLICT (seller_id, lottery_id) DO UPDATE SET percent = $3
            "#,
        )
        .bind(seller_id)
        .bind(lottery_id)
        .bind(percent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Commission rows for the given sellers on one lottery. Sellers without
    /// a row are simply absent from the result.
    pub async fn for_sellers(
        &self,
        lottery_id: Uuid,
        sellers: &[Uuid],
    ) -> DbResult<Vec<DbCommission>> {
        let rows = sqlx::query_as::<_, DbCommission>(
            r#"
            SELECT seller_id, lottery_id, percent
            FROM seller_commissions
            WHERE lottery_id = $1 AND seller_id = ANY($2)
            "#,
        )
        .bind(lottery_id)
        .bind(sellers)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Commission row for one seller on one lottery
    pub async fn find(&self, seller_id: Uuid, lottery_id: Uuid) -> DbResult<Option<DbCommission>> {
        let row = sqlx::query_as::<_, DbCommission>(
            r#"
            SELECT seller_id, lottery_id, percent
            FROM seller_commissions
            WHERE seller_id = $1 AND lottery_id = $2
            "#,
        )
        .bind(seller_id)
        .bind(lottery_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
