//! Sorteo Payout - variant payout calculators
//!
//! One pure function per lottery variant maps a ticket's bet lines plus the
//! drawing's declared result to a non-negative won amount. No side effects,
//! deterministic, exact decimal arithmetic.
//!
//! [`ticket_win`] dispatches on the `(BetLines, WinningRecord, VariantConfig)`
//! triple and fails loudly when the shapes disagree instead of paying zero.

pub mod common;
pub mod matching;
pub mod monazo;
pub mod parley;
pub mod reventado;

pub use common::common_win;
pub use monazo::monazo_win;
pub use parley::parley_win;
pub use reventado::reventado_win;

use rust_decimal::Decimal;
use sorteo_types::{BetLines, Result, SorteoError, VariantConfig, WinningRecord};

/// Compute the total won amount of one ticket against a declared result.
///
/// Errors if the bet lines, winning record, and configuration do not all
/// belong to the same variant.
pub fn ticket_win(
    lines: &BetLines,
    record: &WinningRecord,
    config: &VariantConfig,
) -> Result<Decimal> {
    if lines.variant() != record.variant() {
        return Err(SorteoError::VariantMismatch {
            expected: record.variant(),
            actual: lines.variant(),
        });
    }
    if config.variant() != record.variant() {
        return Err(SorteoError::VariantMismatch {
            expected: record.variant(),
            actual: config.variant(),
        });
    }

    let won = match (lines, record, config) {
        (BetLines::Common(lines), WinningRecord::Common(rows), VariantConfig::Common) => {
            common_win(lines, rows)
        }
        (
            BetLines::Reventado(lines),
            WinningRecord::Reventado(result),
            VariantConfig::Reventado(cfg),
        ) => reventado_win(lines, result, cfg),
        (BetLines::Monazo(lines), WinningRecord::Monazo(result), VariantConfig::Monazo(cfg)) => {
            monazo_win(lines, result, cfg)
        }
        (BetLines::Parley(lines), WinningRecord::Parley(result), VariantConfig::Parley(cfg)) => {
            parley_win(lines, result, cfg)
        }
        // Variants already checked equal above; mixed shapes cannot reach here.
        _ => unreachable!("variant tags verified before dispatch"),
    };

    Ok(won)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sorteo_types::{
        LotteryVariant, MonazoBetType, MonazoConfig, MonazoLine, MonazoResult, NumberLine,
        ParleyConfig, ParleyLine, ParleyResult,
    };

    fn monazo_cfg() -> MonazoConfig {
        MonazoConfig {
            order: dec!(400),
            disorder: dec!(80),
            combo_order: dec!(200),
            combo_disorder: dec!(40),
            partial_order: dec!(100),
        }
    }

    #[test]
    fn dispatches_to_the_right_calculator() {
        let lines = BetLines::Monazo(vec![MonazoLine {
            first: 1,
            second: 2,
            third: 3,
            bet_type: MonazoBetType::Order,
            amount: dec!(10),
        }]);
        let record = WinningRecord::Monazo(MonazoResult {
            first: 1,
            second: 2,
            third: 3,
        });
        let config = VariantConfig::Monazo(monazo_cfg());

        assert_eq!(ticket_win(&lines, &record, &config).unwrap(), dec!(4000));
    }

    #[test]
    fn rejects_mismatched_lines() {
        let lines = BetLines::Common(vec![NumberLine {
            number: 1,
            amount: dec!(10),
            bonus_amount: None,
        }]);
        let record = WinningRecord::Parley(ParleyResult {
            first: 1,
            second: 2,
            third: 3,
        });
        let config = VariantConfig::Parley(ParleyConfig {
            multiplier: dec!(20),
        });

        let err = ticket_win(&lines, &record, &config).unwrap_err();
        assert_eq!(
            err,
            SorteoError::VariantMismatch {
                expected: LotteryVariant::Parley,
                actual: LotteryVariant::Common,
            }
        );
    }

    #[test]
    fn rejects_mismatched_config() {
        let lines = BetLines::Parley(vec![ParleyLine {
            first: 1,
            second: 2,
            amount: dec!(10),
        }]);
        let record = WinningRecord::Parley(ParleyResult {
            first: 1,
            second: 2,
            third: 3,
        });
        let config = VariantConfig::Common;

        assert!(ticket_win(&lines, &record, &config).is_err());
    }
}
