//! Winning-number repository
//!
//! One result set per drawing per variant, enforced by the table keys; a
//! redeclaration surfaces as a duplicate.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use sorteo_types::{LotteryVariant, WinningRecord};

use crate::{DbCommonResultRow, DbError, DbResult, DbReventadoResult, DbTripleResult};

/// Winning-number repository
pub struct ResultRepo {
    pool: PgPool,
}

impl ResultRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Declare the winning numbers of a Common drawing, one row per prize
    /// tier. All rows land in one transaction.
    pub async fn declare_common(
        &self,
        drawing_id: Uuid,
        rows: &[(i16, Uuid)],
    ) -> DbResult<()> {
        if rows.is_empty() {
            return Err(DbError::InvalidInput("no winning numbers given".into()));
        }

        let mut tx = self.pool.begin().await?;
        self.ensure_open(&mut tx, drawing_id).await?;

        for (number, prize_id) in rows {
            sqlx::query(
                "INSERT INTO common_results (drawing_id, number, prize_id) VALUES ($1, $2, $3)",
            )
            .bind(drawing_id)
            .bind(number)
            .bind(prize_id)
            .execute(&mut *tx)
            .await
            .map_err(duplicate_result(drawing_id))?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Declare the result of a Reventado drawing.
    pub async fn declare_reventado(
        &self,
        drawing_id: Uuid,
        number: i16,
        ball_type_id: Uuid,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        self.ensure_open(&mut tx, drawing_id).await?;

        sqlx::query(
            "INSERT INTO reventado_results (drawing_id, number, ball_type_id) VALUES ($1, $2, $3)",
        )
        .bind(drawing_id)
        .bind(number)
        .bind(ball_type_id)
        .execute(&mut *tx)
        .await
        .map_err(duplicate_result(drawing_id))?;

        tx.commit().await?;
        Ok(())
    }

    /// Declare the triple result of a Monazo drawing.
    pub async fn declare_monazo(
        &self,
        drawing_id: Uuid,
        first: i16,
        second: i16,
        third: i16,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        self.ensure_open(&mut tx, drawing_id).await?;

        sqlx::query(
            r#"
            INSERT INTO monazo_results (drawing_id, first_number, second_number, third_number)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(drawing_id)
        .bind(first)
        .bind(second)
        .bind(third)
        .execute(&mut *tx)
        .await
        .map_err(duplicate_result(drawing_id))?;

        tx.commit().await?;
        Ok(())
    }

    /// Declare the triple result a Parley drawing is scored against.
    pub async fn declare_parley(
        &self,
        drawing_id: Uuid,
        first: i16,
        second: i16,
        third: i16,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        self.ensure_open(&mut tx, drawing_id).await?;

        sqlx::query(
            r#"
            INSERT INTO parley_results (drawing_id, first_number, second_number, third_number)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(drawing_id)
        .bind(first)
        .bind(second)
        .bind(third)
        .execute(&mut *tx)
        .await
        .map_err(duplicate_result(drawing_id))?;

        tx.commit().await?;
        Ok(())
    }

    /// Fetch the declared record of a drawing in the given variant's shape.
    pub async fn find(
        &self,
        drawing_id: Uuid,
        variant: LotteryVariant,
    ) -> DbResult<Option<WinningRecord>> {
        match variant {
            LotteryVariant::Common => {
                let rows = sqlx::query_as::<_, DbCommonResultRow>(
                    r#"
                    SELECT wr.drawing_id, wr.number, wr.prize_id, p.multiplier
                    FROM common_results wr
                    JOIN lottery_prizes p ON p.id = wr.prize_id
                    WHERE wr.drawing_id = $1
                    "#,
                )
                .bind(drawing_id)
                .fetch_all(&self.pool)
                .await?;

                if rows.is_empty() {
                    return Ok(None);
                }
                Ok(Some(WinningRecord::Common(
                    rows.into_iter().map(|r| r.into_domain()).collect(),
                )))
            }
            LotteryVariant::Reventado => {
                let row = sqlx::query_as::<_, DbReventadoResult>(
                    "SELECT drawing_id, number, ball_type_id FROM reventado_results WHERE drawing_id = $1",
                )
                .bind(drawing_id)
                .fetch_optional(&self.pool)
                .await?;

                Ok(row.map(|r| WinningRecord::Reventado(r.into_domain())))
            }
            LotteryVariant::Monazo => {
                let row = sqlx::query_as::<_, DbTripleResult>(
                    r#"
                    SELECT drawing_id, first_number, second_number, third_number
                    FROM monazo_results WHERE drawing_id = $1
                    "#,
                )
                .bind(drawing_id)
                .fetch_optional(&self.pool)
                .await?;

                Ok(row.map(|r| WinningRecord::Monazo(r.into_monazo())))
            }
            LotteryVariant::Parley => {
                let row = sqlx::query_as::<_, DbTripleResult>(
                    r#"
                    SELECT drawing_id, first_number, second_number, third_number
                    FROM parley_results WHERE drawing_id = $1
                    "#,
                )
                .bind(drawing_id)
                .fetch_optional(&self.pool)
                .await?;

                Ok(row.map(|r| WinningRecord::Parley(r.into_parley())))
            }
        }
    }

    /// Results may only be declared for live, unsettled drawings.
    async fn ensure_open(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        drawing_id: Uuid,
    ) -> DbResult<()> {
        let open: Option<bool> = sqlx::query_scalar(
            "SELECT is_computed FROM drawings WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(drawing_id)
        .fetch_optional(&mut **tx)
        .await?;

        match open {
            None => Err(DbError::NotFound(format!("drawing {drawing_id}"))),
            Some(true) => Err(DbError::DrawingClosed(format!(
                "drawing {drawing_id} is already settled"
            ))),
            Some(false) => Ok(()),
        }
    }
}

fn duplicate_result(drawing_id: Uuid) -> impl Fn(sqlx::Error) -> DbError {
    move |e| {
        if DbError::is_unique_violation(&e) {
            DbError::Duplicate(format!("result already declared for drawing {drawing_id}"))
        } else {
            e.into()
        }
    }
}
