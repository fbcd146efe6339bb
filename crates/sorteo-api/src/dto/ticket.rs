//! Ticket issuance bodies

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sorteo_db::DbTicket;
use sorteo_types::BetLines;

/// Issue a ticket against an open drawing
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTicketRequest {
    pub drawing_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_name: String,
    /// Variant-tagged bet lines
    pub lines: BetLines,
}

/// Ticket representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
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

impl From<DbTicket> for TicketResponse {
    fn from(t: DbTicket) -> Self {
        Self {
            id: t.id,
            drawing_id: t.drawing_id,
            seller_id: t.seller_id,
            buyer_name: t.buyer_name,
            purchased_at: t.purchased_at,
            price: t.price,
            is_cancelled: t.is_cancelled,
            is_computed: t.is_computed,
            prize: t.prize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sorteo_types::LotteryVariant;

    #[test]
    fn issue_request_parses_tagged_lines() {
        let body = serde_json::json!({
            "drawing_id": "7f1f38f3-32c0-41f2-b8a0-8f2f4a3da6a1",
            "seller_id": "f2c7a9b1-6e2c-4f60-9f4e-6a8e32b6c111",
            "buyer_name": "walk-in",
            "lines": {
                "variant": "reventado",
                "lines": [
                    { "number": 33, "amount": "100", "bonus_amount": "50" },
                    { "number": 7, "amount": "25", "bonus_amount": null }
                ]
            }
        });

        let request: IssueTicketRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.lines.variant(), LotteryVariant::Reventado);
        assert_eq!(request.lines.total_amount(), dec!(175));
    }

    #[test]
    fn monazo_lines_parse_with_bet_type() {
        let body = serde_json::json!({
            "variant": "monazo",
            "lines": [
                { "first": 3, "second": 1, "third": 4, "bet_type": "disorder", "amount": "10" }
            ]
        });

        let lines: BetLines = serde_json::from_value(body).unwrap();
        assert_eq!(lines.variant(), LotteryVariant::Monazo);
        assert_eq!(lines.len(), 1);
    }
}
