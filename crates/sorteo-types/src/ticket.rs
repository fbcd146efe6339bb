//! Tickets: one sale against one drawing by one seller

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BetLines, DrawingId, SellerId, TicketId};

/// A single ticket sale.
///
/// Invariants: a cancelled ticket is permanently excluded from billing;
/// `is_computed` becomes true only via the settlement transaction for the
/// owning drawing, so a ticket can never be billed twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub drawing_id: DrawingId,
    pub seller_id: SellerId,
    pub buyer_name: String,
    pub purchased_at: DateTime<Utc>,
    /// Sum of the bet-line amounts, fixed at purchase.
    pub price: Decimal,
    pub is_cancelled: bool,
    pub is_computed: bool,
    /// Accumulated winnings, credited at settlement. Starts at zero.
    pub prize: Decimal,
    pub lines: BetLines,
}

impl Ticket {
    /// True when the ticket participates in the next settlement run.
    pub fn is_billable(&self) -> bool {
        !self.is_cancelled && !self.is_computed
    }
}
