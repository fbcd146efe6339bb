//! Database models - mapped from PostgreSQL tables

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use sorteo_types::{
    BallTypeId, CashOperation, CashOperationId, CashOperationKind, CommonWinningNumber, Drawing,
    DrawingId, Lottery, LotteryId, LotteryVariant, MonazoResult, ParleyResult, PrizeId,
    ReventadoResult, SellerBalance, SellerBillingLine, SellerId,
};

// ============================================================================
// Tenant Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBank {
    pub id: Uuid,
    pub name: String,
    pub owner_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbSeller {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Lottery Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbLottery {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub name: String,
    pub variant: i16,
    pub closing_time: NaiveTime,
    pub draw_time: NaiveTime,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl DbLottery {
    pub fn into_domain(self) -> Option<Lottery> {
        Some(Lottery {
            id: LotteryId(self.id),
            bank_id: sorteo_types::BankId(self.bank_id),
            name: self.name,
            variant: LotteryVariant::from_i16(self.variant)?,
            closing_time: self.closing_time,
            draw_time: self.draw_time,
            is_deleted: self.is_deleted,
        })
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbLotteryPrize {
    pub id: Uuid,
    pub lottery_id: Uuid,
    pub name: String,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBallType {
    pub id: Uuid,
    pub lottery_id: Uuid,
    pub name: String,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbReventadoConfig {
    pub lottery_id: Uuid,
    pub base_multiplier: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbMonazoConfig {
    pub lottery_id: Uuid,
    pub order_multiplier: Decimal,
    pub disorder_multiplier: Decimal,
    pub combo_order_multiplier: Decimal,
    pub combo_disorder_multiplier: Decimal,
    pub partial_order_multiplier: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbParleyConfig {
    pub lottery_id: Uuid,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbRestrictedNumber {
    pub lottery_id: Uuid,
    pub number: i16,
    pub max_amount: Decimal,
}

// ============================================================================
// Drawing Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbDrawing {
    pub id: Uuid,
    pub lottery_id: Uuid,
    pub date: NaiveDate,
    pub is_deleted: bool,
    pub is_computed: bool,
}

impl DbDrawing {
    pub fn into_domain(self) -> Drawing {
        Drawing {
            id: DrawingId(self.id),
            lottery_id: LotteryId(self.lottery_id),
            date: self.date,
            is_deleted: self.is_deleted,
            is_computed: self.is_computed,
        }
    }
}

/// Drawing joined with its lottery and owning bank, the settlement
/// precondition view.
#[derive(Debug, Clone, FromRow)]
pub struct DbDrawingContext {
    pub id: Uuid,
    pub lottery_id: Uuid,
    pub date: NaiveDate,
    pub is_deleted: bool,
    pub is_computed: bool,
    pub variant: i16,
    pub bank_id: Uuid,
    pub bank_owner: Uuid,
}

// ============================================================================
// Ticket Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbTicket {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_name: String,
    pub purchased_at: DateTime<Utc>,
    pub price: Decimal,
    pub is_cancelled: bool,
    pub is_computed: bool,
    pub prize: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbNumberLine {
    pub ticket_id: Uuid,
    pub number: i16,
    pub amount: Decimal,
    pub bonus_amount: Option<Decimal>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbMonazoLine {
    pub ticket_id: Uuid,
    pub first_number: i16,
    pub second_number: i16,
    pub third_number: i16,
    pub bet_type: i16,
    pub amount: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbParleyLine {
    pub ticket_id: Uuid,
    pub first_number: i16,
    pub second_number: i16,
    pub amount: Decimal,
}

// ============================================================================
// Result Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbCommonResultRow {
    pub drawing_id: Uuid,
    pub number: i16,
    pub prize_id: Uuid,
    pub multiplier: Decimal,
}

impl DbCommonResultRow {
    pub fn into_domain(self) -> CommonWinningNumber {
        CommonWinningNumber {
            number: self.number,
            prize_id: PrizeId(self.prize_id),
            multiplier: self.multiplier,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbReventadoResult {
    pub drawing_id: Uuid,
    pub number: i16,
    pub ball_type_id: Uuid,
}

impl DbReventadoResult {
    pub fn into_domain(self) -> ReventadoResult {
        ReventadoResult {
            number: self.number,
            ball_type_id: BallTypeId(self.ball_type_id),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbTripleResult {
    pub drawing_id: Uuid,
    pub first_number: i16,
    pub second_number: i16,
    pub third_number: i16,
}

impl DbTripleResult {
    pub fn into_monazo(self) -> MonazoResult {
        MonazoResult {
            first: self.first_number,
            second: self.second_number,
            third: self.third_number,
        }
    }

    pub fn into_parley(self) -> ParleyResult {
        ParleyResult {
            first: self.first_number,
            second: self.second_number,
            third: self.third_number,
        }
    }
}

// ============================================================================
// Settlement Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbCommission {
    pub seller_id: Uuid,
    pub lottery_id: Uuid,
    pub percent: Decimal,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBillingStatement {
    pub id: Uuid,
    pub drawing_id: Uuid,
    pub billing_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbSellerBillingLine {
    pub id: Uuid,
    pub statement_id: Uuid,
    pub seller_id: Uuid,
    pub quantity_sold: Decimal,
    pub commission: Decimal,
    pub prize_to_be_paid: Decimal,
}

impl DbSellerBillingLine {
    pub fn into_domain(self) -> SellerBillingLine {
        SellerBillingLine {
            seller_id: SellerId(self.seller_id),
            quantity_sold: self.quantity_sold,
            commission: self.commission,
            prize_to_be_paid: self.prize_to_be_paid,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbSellerBalance {
    pub seller_id: Uuid,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl DbSellerBalance {
    pub fn into_domain(self) -> SellerBalance {
        SellerBalance {
            seller_id: SellerId(self.seller_id),
            balance: self.balance,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbCashOperation {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl DbCashOperation {
    pub fn into_domain(self) -> Option<CashOperation> {
        let kind = match self.kind.as_str() {
            "collection" => CashOperationKind::Collection,
            "payment" => CashOperationKind::Payment,
            _ => return None,
        };
        Some(CashOperation {
            id: CashOperationId(self.id),
            seller_id: SellerId(self.seller_id),
            kind,
            amount: self.amount,
            created_at: self.created_at,
        })
    }
}
