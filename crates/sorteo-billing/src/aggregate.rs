//! Billing aggregation
//!
//! Folds the billable tickets of a drawing into per-seller totals plus the
//! winners list. Accumulators live in a `BTreeMap` keyed by seller id, so the
//! emitted lines come out in a stable order and the sums themselves are
//! associative over any ticket permutation.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use sorteo_payout::ticket_win;
use sorteo_types::{
    SellerBillingLine, SellerId, Ticket, TicketId, VariantConfig, WinnerTicket, WinningRecord,
};

use crate::{CommissionTable, SettlementResult};

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Per-seller totals, ordered by seller id.
    pub lines: Vec<SellerBillingLine>,
    /// Tickets that won, with their win amounts.
    pub winners: Vec<WinnerTicket>,
    /// Every ticket the settlement run consumes (billable tickets only).
    pub consumed: Vec<TicketId>,
}

#[derive(Debug, Default)]
struct Accumulator {
    quantity_sold: Decimal,
    commission: Decimal,
    prize_to_be_paid: Decimal,
}

/// Aggregate billable tickets into seller billing lines and winners.
///
/// Cancelled and already-computed tickets are skipped; a missing commission
/// row for any participating seller aborts the pass.
pub fn aggregate(
    tickets: &[Ticket],
    record: &WinningRecord,
    config: &VariantConfig,
    commissions: &CommissionTable,
) -> SettlementResult<Aggregation> {
    let mut accumulators: BTreeMap<SellerId, Accumulator> = BTreeMap::new();
    let mut winners = Vec::new();
    let mut consumed = Vec::new();

    for ticket in tickets {
        if !ticket.is_billable() {
            continue;
        }

        let commission = commissions.commission_on(ticket.seller_id, ticket.price)?;
        let won = ticket_win(&ticket.lines, record, config)?;

        let acc = accumulators.entry(ticket.seller_id).or_default();
        acc.quantity_sold += ticket.price;
        acc.commission += commission;
        acc.prize_to_be_paid += won;

        if won > Decimal::ZERO {
            winners.push(WinnerTicket {
                ticket_id: ticket.id,
                win_amount: won,
            });
        }
        consumed.push(ticket.id);
    }

    let lines = accumulators
        .into_iter()
        .map(|(seller_id, acc)| SellerBillingLine {
            seller_id,
            quantity_sold: acc.quantity_sold,
            commission: acc.commission,
            prize_to_be_paid: acc.prize_to_be_paid,
        })
        .collect();

    Ok(Aggregation {
        lines,
        winners,
        consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sorteo_types::{BetLines, CommonWinningNumber, DrawingId, LotteryId, NumberLine, PrizeId};

    use crate::CommissionRow;

    fn common_ticket(seller: SellerId, number: i16, amount: Decimal) -> Ticket {
        Ticket {
            id: TicketId::new(),
            drawing_id: DrawingId::new(),
            seller_id: seller,
            buyer_name: "walk-in".into(),
            purchased_at: Utc::now(),
            price: amount,
            is_cancelled: false,
            is_computed: false,
            prize: Decimal::ZERO,
            lines: BetLines::Common(vec![NumberLine {
                number,
                amount,
                bonus_amount: None,
            }]),
        }
    }

    fn record(number: i16, multiplier: Decimal) -> WinningRecord {
        WinningRecord::Common(vec![CommonWinningNumber {
            number,
            prize_id: PrizeId::new(),
            multiplier,
        }])
    }

    fn table(rows: Vec<(SellerId, Decimal)>) -> CommissionTable {
        CommissionTable::new(
            LotteryId::new(),
            rows.into_iter()
                .map(|(seller_id, percent)| CommissionRow { seller_id, percent })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn end_to_end_scenario_totals() {
        // S1 sells 100 on 12 and 50 on 99; 12 wins at x5, commission 10%.
        let s1 = SellerId::new();
        let a = common_ticket(s1, 12, dec!(100));
        let b = common_ticket(s1, 99, dec!(50));
        let agg = aggregate(
            &[a.clone(), b],
            &record(12, dec!(5)),
            &VariantConfig::Common,
            &table(vec![(s1, dec!(10))]),
        )
        .unwrap();

        assert_eq!(agg.lines.len(), 1);
        let line = &agg.lines[0];
        assert_eq!(line.quantity_sold, dec!(150));
        assert_eq!(line.commission, dec!(15));
        assert_eq!(line.prize_to_be_paid, dec!(500));
        assert_eq!(line.balance_delta(), dec!(-365));

        assert_eq!(agg.winners.len(), 1);
        assert_eq!(agg.winners[0].ticket_id, a.id);
        assert_eq!(agg.winners[0].win_amount, dec!(500));
        assert_eq!(agg.consumed.len(), 2);
    }

    #[test]
    fn cancelled_and_computed_tickets_are_excluded() {
        let s1 = SellerId::new();
        let mut cancelled = common_ticket(s1, 12, dec!(100));
        cancelled.is_cancelled = true;
        let mut computed = common_ticket(s1, 12, dec!(100));
        computed.is_computed = true;
        let live = common_ticket(s1, 12, dec!(30));

        let agg = aggregate(
            &[cancelled, computed, live.clone()],
            &record(12, dec!(5)),
            &VariantConfig::Common,
            &table(vec![(s1, dec!(10))]),
        )
        .unwrap();

        assert_eq!(agg.lines[0].quantity_sold, dec!(30));
        assert_eq!(agg.consumed, vec![live.id]);
        assert_eq!(agg.winners.len(), 1);
    }

    #[test]
    fn totals_are_order_independent() {
        let s1 = SellerId::new();
        let s2 = SellerId::new();
        let tickets = vec![
            common_ticket(s1, 12, dec!(100)),
            common_ticket(s2, 12, dec!(40)),
            common_ticket(s1, 99, dec!(50)),
            common_ticket(s2, 7, dec!(25)),
        ];
        let mut reversed = tickets.clone();
        reversed.reverse();

        let commissions = table(vec![(s1, dec!(10)), (s2, dec!(5))]);
        let rec = record(12, dec!(5));

        let forward = aggregate(&tickets, &rec, &VariantConfig::Common, &commissions).unwrap();
        let backward = aggregate(&reversed, &rec, &VariantConfig::Common, &commissions).unwrap();

        assert_eq!(forward.lines, backward.lines);
    }

    #[test]
    fn conservation_of_quantity_sold() {
        let s1 = SellerId::new();
        let s2 = SellerId::new();
        let tickets = vec![
            common_ticket(s1, 1, dec!(10)),
            common_ticket(s2, 2, dec!(20)),
            common_ticket(s1, 3, dec!(30)),
        ];
        let agg = aggregate(
            &tickets,
            &record(50, dec!(5)),
            &VariantConfig::Common,
            &table(vec![(s1, dec!(10)), (s2, dec!(10))]),
        )
        .unwrap();

        let ticket_total: Decimal = tickets.iter().map(|t| t.price).sum();
        let line_total: Decimal = agg.lines.iter().map(|l| l.quantity_sold).sum();
        assert_eq!(ticket_total, line_total);
        assert!(agg.winners.is_empty());
    }

    #[test]
    fn missing_commission_aborts() {
        let s1 = SellerId::new();
        let tickets = vec![common_ticket(s1, 12, dec!(100))];
        let err = aggregate(
            &tickets,
            &record(12, dec!(5)),
            &VariantConfig::Common,
            &table(vec![]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::SettlementError::MissingCommission { .. }
        ));
    }
}
