//! Billing statement repository
//!
//! Statements are written only by the settlement transaction; this repo is
//! the read side.

use sqlx::PgPool;
use uuid::Uuid;

use sorteo_types::{BillingStatement, DrawingId, StatementId};

use crate::{DbBillingStatement, DbResult, DbSellerBillingLine};

/// Billing statement repository
pub struct BillingRepo {
    pool: PgPool,
}

impl BillingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a statement with its seller lines
    pub async fn find(&self, id: Uuid) -> DbResult<Option<BillingStatement>> {
        let Some(row) = sqlx::query_as::<_, DbBillingStatement>(
            "SELECT id, drawing_id, billing_date FROM billing_statements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let lines = self.lines_of(row.id).await?;
        Ok(Some(BillingStatement {
            id: StatementId(row.id),
            drawing_id: DrawingId(row.drawing_id),
            billing_date: row.billing_date,
            lines,
        }))
    }

    /// Fetch the statement of a drawing, if the drawing has been settled
    pub async fn find_by_drawing(&self, drawing_id: Uuid) -> DbResult<Option<BillingStatement>> {
        let Some(row) = sqlx::query_as::<_, DbBillingStatement>(
            "SELECT id, drawing_id, billing_date FROM billing_statements WHERE drawing_id = $1",
        )
        .bind(drawing_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let lines = self.lines_of(row.id).await?;
        Ok(Some(BillingStatement {
            id: StatementId(row.id),
            drawing_id: DrawingId(row.drawing_id),
            billing_date: row.billing_date,
            lines,
        }))
    }

    async fn lines_of(&self, statement_id: Uuid) -> DbResult<Vec<sorteo_types::SellerBillingLine>> {
        let lines = sqlx::query_as::<_, DbSellerBillingLine>(
            r#"
            SELECT id, statement_id, seller_id, quantity_sold, commission, prize_to_be_paid
            FROM seller_billing_lines
            WHERE statement_id = $1
            ORDER BY seller_id
            "#,
        )
        .bind(statement_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines.into_iter().map(|l| l.into_domain()).collect())
    }
}
