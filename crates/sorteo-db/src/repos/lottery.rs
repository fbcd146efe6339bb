//! Lottery repository
//!
//! A lottery row plus its variant-specific payout configuration. The variant
//! is immutable once tickets exist against any of its drawings; nothing here
//! exposes an update path for it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use sorteo_types::{
    BallType, BallTypeId, LotteryVariant, MonazoConfig, ParleyConfig, ReventadoConfig,
    VariantConfig,
};

use crate::{
    DbBallType, DbError, DbLottery, DbLotteryPrize, DbMonazoConfig, DbParleyConfig,
    DbRestrictedNumber, DbResult, DbReventadoConfig,
};

/// Lottery repository
pub struct LotteryRepo {
    pool: PgPool,
}

impl LotteryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a lottery
    pub async fn create(
        &self,
        bank_id: Uuid,
        name: &str,
        variant: LotteryVariant,
        closing_time: chrono::NaiveTime,
        draw_time: chrono::NaiveTime,
    ) -> DbResult<DbLottery> {
        let lottery = sqlx::query_as::<_, DbLottery>(
            r#"
            INSERT INTO lotteries (id, bank_id, name, variant, closing_time, draw_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, bank_id, name, variant, closing_time, draw_time, is_deleted, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(bank_id)
        .bind(name)
        .bind(variant.as_i16())
        .bind(closing_time)
        .bind(draw_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(lottery)
    }

    /// Find lottery by ID (soft-deleted rows are reported as absent)
    pub async fn find(&self, id: Uuid) -> DbResult<Option<DbLottery>> {
        let lottery = sqlx::query_as::<_, DbLottery>(
            r#"
            SELECT id, bank_id, name, variant, closing_time, draw_time, is_deleted, created_at
            FROM lotteries
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lottery)
    }

    /// Soft-delete a lottery
    pub async fn soft_delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("UPDATE lotteries SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("lottery {id}")));
        }
        Ok(())
    }

    // =========================================================================
    // Prize tiers (Common)
    // =========================================================================

    /// Add a prize tier to a Common lottery
    pub async fn add_prize(
        &self,
        lottery_id: Uuid,
        name: &str,
        multiplier: Decimal,
    ) -> DbResult<DbLotteryPrize> {
        let prize = sqlx::query_as::<_, DbLotteryPrize>(
            r#"
            INSERT INTO lottery_prizes (id, lottery_id, name, multiplier)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lottery_id, name, multiplier
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lottery_id)
        .bind(name)
        .bind(multiplier)
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// List prize tiers of a lottery
    pub async fn prizes(&self, lottery_id: Uuid) -> DbResult<Vec<DbLotteryPrize>> {
        let prizes = sqlx::query_as::<_, DbLotteryPrize>(
            "SELECT id, lottery_id, name, multiplier FROM lottery_prizes WHERE lottery_id = $1",
        )
        .bind(lottery_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prizes)
    }

    // =========================================================================
    // Variant configuration
    // =========================================================================

    /// Set the reventado base multiplier
    pub async fn set_reventado_config(
        &self,
        lottery_id: Uuid,
        base_multiplier: Decimal,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reventado_configs (lottery_id, base_multiplier)
            VALUES ($1, $2)
            ON CONFLICT (lottery_id) DO UPDATE SET base_multiplier = $2
            "#,
        )
        .bind(lottery_id)
        .bind(base_multiplier)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add a configured bonus-ball type
    pub async fn add_ball_type(
        &self,
        lottery_id: Uuid,
        name: &str,
        multiplier: Decimal,
    ) -> DbResult<DbBallType> {
        let ball = sqlx::query_as::<_, DbBallType>(
            r#"
            INSERT INTO reventado_ball_types (id, lottery_id, name, multiplier)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lottery_id, name, multiplier
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lottery_id)
        .bind(name)
        .bind(multiplier)
        .fetch_one(&self.pool)
        .await?;

        Ok(ball)
    }

    /// Set the monazo tier multipliers
    pub async fn set_monazo_config(&self, lottery_id: Uuid, cfg: MonazoConfig) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO monazo_configs
                (lottery_id, order_multiplier, disorder_multiplier,
                 combo_order_multiplier, combo_disorder_multiplier, partial_order_multiplier)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (lottery_id) DO UPDATE SET
                order_multiplier = $2, disorder_multiplier = $3,
                combo_order_multiplier = $4, combo_disorder_multiplier = $5,
                partial_order_multiplier = $6
            "#,
        )
        .bind(lottery_id)
        .bind(cfg.order)
        .bind(cfg.disorder)
        .bind(cfg.combo_order)
        .bind(cfg.combo_disorder)
        .bind(cfg.partial_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Set the parley multiplier
    pub async fn set_parley_config(&self, lottery_id: Uuid, multiplier: Decimal) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO parley_configs (lottery_id, multiplier)
            VALUES ($1, $2)
            ON CONFLICT (lottery_id) DO UPDATE SET multiplier = $2
            "#,
        )
        .bind(lottery_id)
        .bind(multiplier)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load the payout configuration of a lottery for its variant.
    ///
    /// A variant lottery with no configuration row is a data-integrity
    /// failure, not an empty config.
    pub async fn variant_config(
        &self,
        lottery_id: Uuid,
        variant: LotteryVariant,
    ) -> DbResult<VariantConfig> {
        match variant {
            LotteryVariant::Common => Ok(VariantConfig::Common),
            LotteryVariant::Reventado => {
                let cfg = sqlx::query_as::<_, DbReventadoConfig>(
                    "SELECT lottery_id, base_multiplier FROM reventado_configs WHERE lottery_id = $1",
                )
                .bind(lottery_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    DbError::Constraint(format!("reventado config missing for lottery {lottery_id}"))
                })?;

                let balls = sqlx::query_as::<_, DbBallType>(
                    "SELECT id, lottery_id, name, multiplier FROM reventado_ball_types WHERE lottery_id = $1",
                )
                .bind(lottery_id)
                .fetch_all(&self.pool)
                .await?;

                Ok(VariantConfig::Reventado(ReventadoConfig {
                    base_multiplier: cfg.base_multiplier,
                    ball_types: balls
                        .into_iter()
                        .map(|b| BallType {
                            id: BallTypeId(b.id),
                            name: b.name,
                            multiplier: b.multiplier,
                        })
                        .collect(),
                }))
            }
            LotteryVariant::Monazo => {
                let cfg = sqlx::query_as::<_, DbMonazoConfig>(
                    r#"
                    SELECT lottery_id, order_multiplier, disorder_multiplier,
                           combo_order_multiplier, combo_disorder_multiplier,
                           partial_order_multiplier
                    FROM monazo_configs WHERE lottery_id = $1
                    "#,
                )
                .bind(lottery_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    DbError::Constraint(format!("monazo config missing for lottery {lottery_id}"))
                })?;

                Ok(VariantConfig::Monazo(MonazoConfig {
                    order: cfg.order_multiplier,
                    disorder: cfg.disorder_multiplier,
                    combo_order: cfg.combo_order_multiplier,
                    combo_disorder: cfg.combo_disorder_multiplier,
                    partial_order: cfg.partial_order_multiplier,
                }))
            }
            LotteryVariant::Parley => {
                let cfg = sqlx::query_as::<_, DbParleyConfig>(
                    "SELECT lottery_id, multiplier FROM parley_configs WHERE lottery_id = $1",
                )
                .bind(lottery_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| {
                    DbError::Constraint(format!("parley config missing for lottery {lottery_id}"))
                })?;

                Ok(VariantConfig::Parley(ParleyConfig {
                    multiplier: cfg.multiplier,
                }))
            }
        }
    }

    // =========================================================================
    // Restricted numbers
    // =========================================================================

    /// Cap the sellable amount of one number
    pub async fn restrict_number(
        &self,
        lottery_id: Uuid,
        number: i16,
        max_amount: Decimal,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO restricted_numbers (lottery_id, number, max_amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (lottery_id, number) DO UPDATE SET max_amount = $3
            "#,
        )
        .bind(lottery_id)
        .bind(number)
        .bind(max_amount)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List restricted numbers of a lottery
    pub async fn restricted_numbers(&self, lottery_id: Uuid) -> DbResult<Vec<DbRestrictedNumber>> {
        let rows = sqlx::query_as::<_, DbRestrictedNumber>(
            "SELECT lottery_id, number, max_amount FROM restricted_numbers WHERE lottery_id = $1",
        )
        .bind(lottery_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
