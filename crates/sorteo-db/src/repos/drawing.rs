//! Drawing repository

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbDrawing, DbDrawingContext, DbError, DbResult};

/// Drawing repository
pub struct DrawingRepo {
    pool: PgPool,
}

impl DrawingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Schedule a drawing of a lottery for a date.
    ///
    /// One drawing per (lottery, date); a second schedule attempt is a
    /// duplicate.
    pub async fn schedule(&self, lottery_id: Uuid, date: NaiveDate) -> DbResult<DbDrawing> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lotteries WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(lottery_id)
        .fetch_one(&self.pool)
        .await?;
        if exists == 0 {
            return Err(DbError::NotFound(format!("lottery {lottery_id}")));
        }

        let drawing = sqlx::query_as::<_, DbDrawing>(
            r#"
            INSERT INTO drawings (id, lottery_id, date)
            VALUES ($1, $2, $3)
            RETURNING id, lottery_id, date, is_deleted, is_computed
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lottery_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if DbError::is_unique_violation(&e) {
                DbError::Duplicate(format!("drawing for lottery {lottery_id} on {date}"))
            } else {
                e.into()
            }
        })?;

        Ok(drawing)
    }

    /// Find drawing by ID (soft-deleted rows are reported as absent)
    pub async fn find(&self, id: Uuid) -> DbResult<Option<DbDrawing>> {
        let drawing = sqlx::query_as::<_, DbDrawing>(
            r#"
            SELECT id, lottery_id, date, is_deleted, is_computed
            FROM drawings
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(drawing)
    }

    /// Drawing joined with its lottery variant and owning bank, the
    /// settlement precondition view.
    pub async fn find_context(&self, id: Uuid) -> DbResult<Option<DbDrawingContext>> {
        let context = sqlx::query_as::<_, DbDrawingContext>(
            r#"
            SELECT d.id, d.lottery_id, d.date, d.is_deleted, d.is_computed,
                   l.variant, l.bank_id, b.owner_user_id AS bank_owner
            FROM drawings d
            JOIN lotteries l ON l.id = d.lottery_id
            JOIN banks b ON b.id = l.bank_id
            WHERE d.id = $1 AND d.is_deleted = FALSE AND l.is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(context)
    }

    /// List drawings of a lottery, newest first
    pub async fn list_by_lottery(&self, lottery_id: Uuid, limit: i64) -> DbResult<Vec<DbDrawing>> {
        let drawings = sqlx::query_as::<_, DbDrawing>(
            r#"
            SELECT id, lottery_id, date, is_deleted, is_computed
            FROM drawings
            WHERE lottery_id = $1 AND is_deleted = FALSE
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(lottery_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(drawings)
    }

    /// Soft-delete a drawing. Settled drawings cannot be deleted.
    pub async fn soft_delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE drawings SET is_deleted = TRUE WHERE id = $1 AND is_computed = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("open drawing {id}")));
        }
        Ok(())
    }
}
