//! Monazo (three-digit combination) payout

use rust_decimal::Decimal;
use sorteo_types::{MonazoBetType, MonazoConfig, MonazoLine, MonazoResult};

use crate::matching::multiset_eq;

/// Win amount of a Monazo ticket.
///
/// Dispatch per line on the bet sub-type:
///
/// - `Order`: positional triple match, pays `cfg.order`.
/// - `Disorder`: multiset match, pays `cfg.disorder`.
/// - `Combo`: exact match pays `cfg.combo_order`, else a permuted match pays
///   `cfg.combo_disorder`; the tiers are mutually exclusive.
/// - `PartialCombo`: full positional match, or the last two digits positional
///   regardless of the first, pays `cfg.partial_order`.
pub fn monazo_win(lines: &[MonazoLine], result: &MonazoResult, cfg: &MonazoConfig) -> Decimal {
    let drawn = result.triple();
    let mut won = Decimal::ZERO;

    for line in lines {
        let bet = [line.first, line.second, line.third];
        let exact = bet == drawn;

        let multiplier = match line.bet_type {
            MonazoBetType::Order if exact => Some(cfg.order),
            MonazoBetType::Disorder if multiset_eq(bet, drawn) => Some(cfg.disorder),
            MonazoBetType::Combo if exact => Some(cfg.combo_order),
            MonazoBetType::Combo if multiset_eq(bet, drawn) => Some(cfg.combo_disorder),
            MonazoBetType::PartialCombo
                if exact || (line.second == result.second && line.third == result.third) =>
            {
                Some(cfg.partial_order)
            }
            _ => None,
        };

        if let Some(m) = multiplier {
            won += line.amount * m;
        }
    }
    won
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cfg() -> MonazoConfig {
        MonazoConfig {
            order: dec!(400),
            disorder: dec!(80),
            combo_order: dec!(200),
            combo_disorder: dec!(40),
            partial_order: dec!(100),
        }
    }

    fn line(triple: [i16; 3], bet_type: MonazoBetType, amount: Decimal) -> MonazoLine {
        MonazoLine {
            first: triple[0],
            second: triple[1],
            third: triple[2],
            bet_type,
            amount,
        }
    }

    fn drawn(first: i16, second: i16, third: i16) -> MonazoResult {
        MonazoResult {
            first,
            second,
            third,
        }
    }

    #[test]
    fn order_requires_positional_match() {
        let l = [line([3, 1, 4], MonazoBetType::Order, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(3, 1, 4), &cfg()), dec!(4000));
        assert_eq!(monazo_win(&l, &drawn(4, 3, 1), &cfg()), Decimal::ZERO);
    }

    // Corrected bug area: disorder is multiset equality, not inclusion.
    #[test]
    fn disorder_wins_on_permutation() {
        let l = [line([3, 1, 4], MonazoBetType::Disorder, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(4, 3, 1), &cfg()), dec!(800));
    }

    #[test]
    fn disorder_loses_on_partial_overlap() {
        let l = [line([3, 1, 4], MonazoBetType::Disorder, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(4, 3, 2), &cfg()), Decimal::ZERO);
    }

    #[test]
    fn disorder_respects_digit_multiplicity() {
        let l = [line([1, 1, 2], MonazoBetType::Disorder, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(1, 2, 2), &cfg()), Decimal::ZERO);
        assert_eq!(monazo_win(&l, &drawn(2, 1, 1), &cfg()), dec!(800));
    }

    #[test]
    fn combo_pays_order_tier_on_exact_hit() {
        let l = [line([7, 8, 9], MonazoBetType::Combo, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(7, 8, 9), &cfg()), dec!(2000));
    }

    #[test]
    fn combo_pays_disorder_tier_on_permuted_hit() {
        let l = [line([7, 8, 9], MonazoBetType::Combo, dec!(10))];
        assert_eq!(monazo_win(&l, &drawn(9, 7, 8), &cfg()), dec!(400));
    }

    #[test]
    fn partial_combo_pays_on_last_two_positional() {
        let l = [line([5, 8, 9], MonazoBetType::PartialCombo, dec!(10))];
        // First digit wrong, last two positional.
        assert_eq!(monazo_win(&l, &drawn(2, 8, 9), &cfg()), dec!(1000));
        // Full positional match also pays.
        assert_eq!(monazo_win(&l, &drawn(5, 8, 9), &cfg()), dec!(1000));
        // Last two present but swapped: no win.
        assert_eq!(monazo_win(&l, &drawn(5, 9, 8), &cfg()), Decimal::ZERO);
    }

    #[test]
    fn lines_accumulate_independently() {
        let l = [
            line([3, 1, 4], MonazoBetType::Order, dec!(10)),
            line([4, 3, 1], MonazoBetType::Disorder, dec!(5)),
        ];
        // Order line misses, disorder line hits: 5*80.
        assert_eq!(monazo_win(&l, &drawn(1, 4, 3), &cfg()), dec!(400));
    }
}
