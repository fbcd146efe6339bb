//! Billing statements and seller balance records
//!
//! A statement is the immutable settlement record for one drawing's billing
//! run: one row per run, owning one line per participating seller. Statements
//! are never updated after insertion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CashOperationId, DrawingId, SellerId, StatementId, TicketId};

/// Per-seller totals for one settlement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerBillingLine {
    pub seller_id: SellerId,
    /// Gross ticket sales for the drawing.
    pub quantity_sold: Decimal,
    /// House cut owed to the seller.
    pub commission: Decimal,
    /// Prize money the seller must pay out to winners.
    pub prize_to_be_paid: Decimal,
}

impl SellerBillingLine {
    /// Signed delta applied to the seller's running balance.
    ///
    /// Positive means the seller owes the bank.
    pub fn balance_delta(&self) -> Decimal {
        self.quantity_sold - self.commission - self.prize_to_be_paid
    }
}

/// The append-only settlement record for one drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingStatement {
    pub id: StatementId,
    pub drawing_id: DrawingId,
    pub billing_date: DateTime<Utc>,
    pub lines: Vec<SellerBillingLine>,
}

/// A winning ticket and the amount it won, recorded at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinnerTicket {
    pub ticket_id: TicketId,
    pub win_amount: Decimal,
}

/// Running signed balance per seller.
///
/// Positive = seller owes the bank; negative = bank owes the seller. Mutated
/// only by settlement deltas and by payment operations that clear it to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerBalance {
    pub seller_id: SellerId,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// The kind of cash movement that cleared a seller balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashOperationKind {
    /// Seller paid the bank (balance was positive).
    Collection,
    /// Bank paid the seller (balance was negative).
    Payment,
}

/// A payment/collection that zeroed out a seller balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOperation {
    pub id: CashOperationId,
    pub seller_id: SellerId,
    pub kind: CashOperationKind,
    /// Absolute amount transferred.
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_delta_can_go_negative() {
        let line = SellerBillingLine {
            seller_id: SellerId::new(),
            quantity_sold: dec!(150),
            commission: dec!(15),
            prize_to_be_paid: dec!(500),
        };
        assert_eq!(line.balance_delta(), dec!(-365));
    }
}
