//! Seller balance and payment bodies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorteo_db::{DbCashOperation, DbSellerBalance};

/// Seller balance representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub seller_id: Uuid,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSellerBalance> for BalanceResponse {
    fn from(b: DbSellerBalance) -> Self {
        Self {
            seller_id: b.seller_id,
            balance: b.balance,
            updated_at: b.updated_at,
        }
    }
}

/// A payment/collection that cleared a balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashOperationResponse {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<DbCashOperation> for CashOperationResponse {
    fn from(op: DbCashOperation) -> Self {
        Self {
            id: op.id,
            seller_id: op.seller_id,
            kind: op.kind,
            amount: op.amount,
            created_at: op.created_at,
        }
    }
}
