//! Ticket repository
//!
//! Issuance enforces the per-number sale caps transactionally: the sold
//! amount of a restricted number, plus the new stake, may not exceed the cap.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use sorteo_types::{
    BetLines, DrawingId, LotteryVariant, MonazoBetType, MonazoLine, NumberLine, ParleyLine,
    SellerId, Ticket, TicketId,
};

use crate::{DbDrawingContext, DbError, DbMonazoLine, DbNumberLine, DbParleyLine, DbResult, DbTicket};

/// Ticket repository
pub struct TicketRepo {
    pool: PgPool,
}

impl TicketRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issue a ticket against an open drawing.
    ///
    /// The whole check-and-insert runs in one transaction so concurrent sales
    /// cannot oversell a restricted number.
    pub async fn issue(
        &self,
        drawing_id: Uuid,
        seller_id: Uuid,
        buyer_name: &str,
        lines: &BetLines,
    ) -> DbResult<DbTicket> {
        if lines.is_empty() {
            return Err(DbError::InvalidInput("ticket has no bet lines".into()));
        }
        let price = lines.total_amount();
        if price <= Decimal::ZERO {
            return Err(DbError::InvalidInput("ticket price must be positive".into()));
        }

        let mut tx = self.pool.begin().await?;

        // Lock the drawing row so settlement and issuance serialize.
        let context = sqlx::query_as::<_, DbDrawingContext>(
            r#"
            SELECT d.id, d.lottery_id, d.date, d.is_deleted, d.is_computed,
                   l.variant, l.bank_id, b.owner_user_id AS bank_owner
            FROM drawings d
            JOIN lotteries l ON l.id = d.lottery_id
            JOIN banks b ON b.id = l.bank_id
            WHERE d.id = $1 AND d.is_deleted = FALSE
            FOR UPDATE OF d
            "#,
        )
        .bind(drawing_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("drawing {drawing_id}")))?;

        if context.is_computed {
            return Err(DbError::DrawingClosed(format!(
                "drawing {drawing_id} is already settled"
            )));
        }
        let variant = LotteryVariant::from_i16(context.variant)
            .ok_or_else(|| DbError::Constraint(format!("unknown variant {}", context.variant)))?;
        if lines.variant() != variant {
            return Err(DbError::InvalidInput(format!(
                "{} lines on a {} lottery",
                lines.variant(),
                variant
            )));
        }

        if let BetLines::Common(number_lines) | BetLines::Reventado(number_lines) = lines {
            self.check_restricted(&mut tx, context.lottery_id, drawing_id, number_lines)
                .await?;
        }

        let ticket = sqlx::query_as::<_, DbTicket>(
            r#"
            INSERT INTO tickets (id, drawing_id, seller_id, buyer_name, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, drawing_id, seller_id, buyer_name, purchased_at,
                      price, is_cancelled, is_computed, prize
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(drawing_id)
        .bind(seller_id)
        .bind(buyer_name)
        .bind(price)
        .fetch_one(&mut *tx)
        .await?;

        match lines {
            BetLines::Common(number_lines) | BetLines::Reventado(number_lines) => {
                for line in number_lines {
                    sqlx::query(
                        r#"
                        INSERT INTO number_lines (id, ticket_id, number, amount, bonus_amount)
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(ticket.id)
                    .bind(line.number)
                    .bind(line.amount)
                    .bind(line.bonus_amount)
                    .execute(&mut *tx)
                    .await?;
                }
            }
            BetLines::Monazo(monazo_lines) => {
                for line in monazo_lines {
                    sqlx::query(
                        r#"
                        INSERT INTO monazo_lines
                            (id, ticket_id, first_number, second_number, third_number, bet_type, amount)
                        VALUES ($1, $2, $3, $4, $5, $6, $7)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(ticket.id)
                    .bind(line.first)
                    .bind(line.second)
                    .bind(line.third)
                    .bind(line.bet_type.as_i16())
                    .bind(line.amount)
                    .execute(&mut *tx)
                    .await?;
                }
            }
            BetLines::Parley(parley_lines) => {
                for line in parley_lines {
                    sqlx::query(
                        r#"
                        INSERT INTO parley_lines (id, ticket_id, first_number, second_number, amount)
                        VALUES ($1, $2, $3, $4, $5)
                        "#,
                    )
                    .bind(Uuid::new_v4())
                    .bind(ticket.id)
                    .bind(line.first)
                    .bind(line.second)
                    .bind(line.amount)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(ticket)
    }

    /// Enforce restricted-number caps against the live sold totals.
    async fn check_restricted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lottery_id: Uuid,
        drawing_id: Uuid,
        lines: &[NumberLine],
    ) -> DbResult<()> {
        for line in lines {
            let cap: Option<Decimal> = sqlx::query_scalar(
                "SELECT max_amount FROM restricted_numbers WHERE lottery_id = $1 AND number = $2",
            )
            .bind(lottery_id)
            .bind(line.number)
            .fetch_optional(&mut **tx)
            .await?;

            let Some(cap) = cap else { continue };

            let sold: Decimal = sqlx::query_scalar(
                r#"
                SELECT COALESCE(SUM(nl.amount), 0)
                FROM number_lines nl
                JOIN tickets t ON t.id = nl.ticket_id
                WHERE t.drawing_id = $1 AND t.is_cancelled = FALSE AND nl.number = $2
                "#,
            )
            .bind(drawing_id)
            .bind(line.number)
            .fetch_one(&mut **tx)
            .await?;

            if sold + line.amount > cap {
                return Err(DbError::NumberRestricted {
                    number: line.number,
                    cap: cap.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Cancel a ticket. Settled or already-cancelled tickets cannot be
    /// cancelled; the excluded ticket never re-enters billing.
    pub async fn cancel(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tickets SET is_cancelled = TRUE
            WHERE id = $1 AND is_computed = FALSE AND is_cancelled = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("cancellable ticket {id}")));
        }
        Ok(())
    }

    /// Find a ticket row by ID
    pub async fn find(&self, id: Uuid) -> DbResult<Option<DbTicket>> {
        let ticket = sqlx::query_as::<_, DbTicket>(
            r#"
            SELECT id, drawing_id, seller_id, buyer_name, purchased_at,
                   price, is_cancelled, is_computed, prize
            FROM tickets WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Billable tickets of a drawing with their bet lines, in purchase order.
    pub async fn open_by_drawing(
        &self,
        drawing_id: Uuid,
        variant: LotteryVariant,
    ) -> DbResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, DbTicket>(
            r#"
            SELECT id, drawing_id, seller_id, buyer_name, purchased_at,
                   price, is_cancelled, is_computed, prize
            FROM tickets
            WHERE drawing_id = $1 AND is_cancelled = FALSE AND is_computed = FALSE
            ORDER BY purchased_at, id
            "#,
        )
        .bind(drawing_id)
        .fetch_all(&self.pool)
        .await?;

        let mut lines_by_ticket = self.load_lines(drawing_id, variant).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_ticket
                    .remove(&row.id)
                    .unwrap_or_else(|| empty_lines(variant));
                Ticket {
                    id: TicketId(row.id),
                    drawing_id: DrawingId(row.drawing_id),
                    seller_id: SellerId(row.seller_id),
                    buyer_name: row.buyer_name,
                    purchased_at: row.purchased_at,
                    price: row.price,
                    is_cancelled: row.is_cancelled,
                    is_computed: row.is_computed,
                    prize: row.prize,
                    lines,
                }
            })
            .collect())
    }

    /// Load all bet lines of a drawing's billable tickets, grouped by ticket.
    async fn load_lines(
        &self,
        drawing_id: Uuid,
        variant: LotteryVariant,
    ) -> DbResult<HashMap<Uuid, BetLines>> {
        let mut grouped: HashMap<Uuid, BetLines> = HashMap::new();

        match variant {
            LotteryVariant::Common | LotteryVariant::Reventado => {
                let rows = sqlx::query_as::<_, DbNumberLine>(
                    r#"
                    SELECT nl.ticket_id, nl.number, nl.amount, nl.bonus_amount
                    FROM number_lines nl
                    JOIN tickets t ON t.id = nl.ticket_id
                    WHERE t.drawing_id = $1 AND t.is_cancelled = FALSE AND t.is_computed = FALSE
                    "#,
                )
                .bind(drawing_id)
                .fetch_all(&self.pool)
                .await?;

                for row in rows {
                    let entry = grouped
                        .entry(row.ticket_id)
                        .or_insert_with(|| empty_lines(variant));
                    let (BetLines::Common(lines) | BetLines::Reventado(lines)) = entry else {
                        continue;
                    };
                    lines.push(NumberLine {
                        number: row.number,
                        amount: row.amount,
                        bonus_amount: row.bonus_amount,
                    });
                }
            }
            LotteryVariant::Monazo => {
                let rows = sqlx::query_as::<_, DbMonazoLine>(
                    r#"
                    SELECT ml.ticket_id, ml.first_number, ml.second_number, ml.third_number,
                           ml.bet_type, ml.amount
                    FROM monazo_lines ml
                    JOIN tickets t ON t.id = ml.ticket_id
                    WHERE t.drawing_id = $1 AND t.is_cancelled = FALSE AND t.is_computed = FALSE
                    "#,
                )
                .bind(drawing_id)
                .fetch_all(&self.pool)
                .await?;

                for row in rows {
                    let bet_type = MonazoBetType::from_i16(row.bet_type).ok_or_else(|| {
                        DbError::Constraint(format!("unknown monazo bet type {}", row.bet_type))
                    })?;
                    let BetLines::Monazo(lines) = grouped
                        .entry(row.ticket_id)
                        .or_insert_with(|| empty_lines(variant))
                    else {
                        continue;
                    };
                    lines.push(MonazoLine {
                        first: row.first_number,
                        second: row.second_number,
                        third: row.third_number,
                        bet_type,
                        amount: row.amount,
                    });
                }
            }
            LotteryVariant::Parley => {
                let rows = sqlx::query_as::<_, DbParleyLine>(
                    r#"
                    SELECT pl.ticket_id, pl.first_number, pl.second_number, pl.amount
                    FROM parley_lines pl
                    JOIN tickets t ON t.id = pl.ticket_id
                    WHERE t.drawing_id = $1 AND t.is_cancelled = FALSE AND t.is_computed = FALSE
                    "#,
                )
                .bind(drawing_id)
                .fetch_all(&self.pool)
                .await?;

                for row in rows {
                    let BetLines::Parley(lines) = grouped
                        .entry(row.ticket_id)
                        .or_insert_with(|| empty_lines(variant))
                    else {
                        continue;
                    };
                    lines.push(ParleyLine {
                        first: row.first_number,
                        second: row.second_number,
                        amount: row.amount,
                    });
                }
            }
        }

        Ok(grouped)
    }
}

fn empty_lines(variant: LotteryVariant) -> BetLines {
    match variant {
        LotteryVariant::Common => BetLines::Common(Vec::new()),
        LotteryVariant::Reventado => BetLines::Reventado(Vec::new()),
        LotteryVariant::Monazo => BetLines::Monazo(Vec::new()),
        LotteryVariant::Parley => BetLines::Parley(Vec::new()),
    }
}
