//! Common (straight-number) payout

use rust_decimal::Decimal;
use sorteo_types::{CommonWinningNumber, NumberLine};

/// Win amount of a Common ticket.
///
/// Each line pays against every declared winning row it matches, so a ticket
/// can collect several prize tiers at once.
pub fn common_win(lines: &[NumberLine], rows: &[CommonWinningNumber]) -> Decimal {
    let mut won = Decimal::ZERO;
    for line in lines {
        for row in rows {
            if line.number == row.number {
                won += line.amount * row.multiplier;
            }
        }
    }
    won
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sorteo_types::PrizeId;

    fn row(number: i16, multiplier: Decimal) -> CommonWinningNumber {
        CommonWinningNumber {
            number,
            prize_id: PrizeId::new(),
            multiplier,
        }
    }

    fn line(number: i16, amount: Decimal) -> NumberLine {
        NumberLine {
            number,
            amount,
            bonus_amount: None,
        }
    }

    #[test]
    fn matching_line_pays_amount_times_multiplier() {
        let won = common_win(&[line(12, dec!(100))], &[row(12, dec!(5))]);
        assert_eq!(won, dec!(500));
    }

    #[test]
    fn non_matching_line_pays_nothing() {
        let won = common_win(&[line(99, dec!(50))], &[row(12, dec!(5))]);
        assert_eq!(won, Decimal::ZERO);
    }

    #[test]
    fn multiple_lines_can_win_distinct_tiers() {
        let rows = [row(12, dec!(70)), row(34, dec!(10))];
        let lines = [line(12, dec!(100)), line(34, dec!(20)), line(55, dec!(5))];
        // 100*70 + 20*10
        assert_eq!(common_win(&lines, &rows), dec!(7200));
    }

    #[test]
    fn same_number_in_two_tiers_pays_both() {
        let rows = [row(12, dec!(70)), row(12, dec!(10))];
        assert_eq!(common_win(&[line(12, dec!(10))], &rows), dec!(800));
    }
}
