//! Billing endpoint bodies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorteo_types::BillingStatement;

/// Settlement request, one per variant endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    /// The drawing ("programming") to bill
    pub lottery_programming_id: Uuid,
}

/// One seller line of a settlement response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingLineDto {
    pub seller_id: Uuid,
    pub quantity_sold: Decimal,
    pub commission: Decimal,
    pub prize_to_be_paid: Decimal,
    pub balance_delta: Decimal,
}

/// Settlement response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleResponse {
    pub ok: bool,
    pub statement_id: Uuid,
    pub billing_date: DateTime<Utc>,
    pub lines: Vec<BillingLineDto>,
}

impl From<BillingStatement> for SettleResponse {
    fn from(statement: BillingStatement) -> Self {
        Self {
            ok: true,
            statement_id: statement.id.0,
            billing_date: statement.billing_date,
            lines: statement
                .lines
                .into_iter()
                .map(|l| BillingLineDto {
                    seller_id: l.seller_id.0,
                    quantity_sold: l.quantity_sold,
                    commission: l.commission,
                    prize_to_be_paid: l.prize_to_be_paid,
                    balance_delta: l.balance_delta(),
                })
                .collect(),
        }
    }
}
