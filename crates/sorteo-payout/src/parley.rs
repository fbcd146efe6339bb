//! Parley (two-number combination) payout

use rust_decimal::Decimal;
use sorteo_types::{ParleyConfig, ParleyLine, ParleyResult};

use crate::matching::distinct_hits;

/// Win amount of a Parley ticket.
///
/// A line wins iff at least two of its numbers appear, as a set, within the
/// winning triple. With two bet numbers that means both must hit; a doubled
/// bet number counts once and can never win.
pub fn parley_win(lines: &[ParleyLine], result: &ParleyResult, cfg: &ParleyConfig) -> Decimal {
    let drawn = result.triple();
    let mut won = Decimal::ZERO;

    for line in lines {
        if distinct_hits(&[line.first, line.second], &drawn) >= 2 {
            won += line.amount * cfg.multiplier;
        }
    }
    won
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> ParleyConfig {
        ParleyConfig {
            multiplier: dec!(20),
        }
    }

    fn line(first: i16, second: i16, amount: Decimal) -> ParleyLine {
        ParleyLine {
            first,
            second,
            amount,
        }
    }

    fn drawn(a: i16, b: i16, c: i16) -> ParleyResult {
        ParleyResult {
            first: a,
            second: b,
            third: c,
        }
    }

    #[test]
    fn both_numbers_in_triple_wins() {
        let won = parley_win(&[line(7, 2, dec!(10))], &drawn(7, 2, 9), &cfg());
        assert_eq!(won, dec!(200));
    }

    #[test]
    fn one_hit_is_not_enough() {
        let won = parley_win(&[line(7, 5, dec!(10))], &drawn(7, 2, 9), &cfg());
        assert_eq!(won, Decimal::ZERO);
    }

    #[test]
    fn order_within_the_triple_is_irrelevant() {
        let won = parley_win(&[line(9, 7, dec!(10))], &drawn(7, 2, 9), &cfg());
        assert_eq!(won, dec!(200));
    }

    #[test]
    fn doubled_bet_number_never_wins() {
        let won = parley_win(&[line(7, 7, dec!(10))], &drawn(7, 2, 9), &cfg());
        assert_eq!(won, Decimal::ZERO);
    }

    #[test]
    fn lines_accumulate() {
        let lines = [line(7, 2, dec!(10)), line(2, 9, dec!(5)), line(1, 3, dec!(50))];
        let won = parley_win(&lines, &drawn(7, 2, 9), &cfg());
        assert_eq!(won, dec!(300));
    }
}
