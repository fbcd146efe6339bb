//! Reventado (bonus-ball) payout

use rust_decimal::Decimal;
use sorteo_types::{NumberLine, ReventadoConfig, ReventadoResult};

/// Win amount of a Reventado ticket.
///
/// A line whose number equals the drawn number pays the main stake times the
/// lottery's base multiplier. A bonus-ball stake on that line additionally
/// pays `bonus * multiplier` exactly once, using the multiplier of the
/// configured ball type that was actually drawn; an unconfigured drawn ball
/// type pays no bonus.
pub fn reventado_win(
    lines: &[NumberLine],
    result: &ReventadoResult,
    cfg: &ReventadoConfig,
) -> Decimal {
    let mut won = Decimal::ZERO;
    for line in lines {
        if line.number != result.number {
            continue;
        }
        won += line.amount * cfg.base_multiplier;
        if let Some(bonus) = line.bonus_amount {
            if let Some(multiplier) = cfg.ball_multiplier(result.ball_type_id) {
                won += bonus * multiplier;
            }
        }
    }
    won
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sorteo_types::{BallType, BallTypeId};

    fn cfg_with(ball_types: Vec<BallType>) -> ReventadoConfig {
        ReventadoConfig {
            base_multiplier: dec!(70),
            ball_types,
        }
    }

    fn ball(id: BallTypeId, name: &str, multiplier: Decimal) -> BallType {
        BallType {
            id,
            name: name.into(),
            multiplier,
        }
    }

    #[test]
    fn number_hit_pays_base_multiplier() {
        let red = BallTypeId::new();
        let cfg = cfg_with(vec![ball(red, "red", dec!(100))]);
        let lines = [NumberLine {
            number: 33,
            amount: dec!(10),
            bonus_amount: None,
        }];
        let result = ReventadoResult {
            number: 33,
            ball_type_id: red,
        };
        assert_eq!(reventado_win(&lines, &result, &cfg), dec!(700));
    }

    #[test]
    fn miss_pays_nothing_even_with_bonus_stake() {
        let red = BallTypeId::new();
        let cfg = cfg_with(vec![ball(red, "red", dec!(100))]);
        let lines = [NumberLine {
            number: 11,
            amount: dec!(10),
            bonus_amount: Some(dec!(5)),
        }];
        let result = ReventadoResult {
            number: 33,
            ball_type_id: red,
        };
        assert_eq!(reventado_win(&lines, &result, &cfg), Decimal::ZERO);
    }

    // Two ball types configured: only the drawn type's multiplier applies,
    // and it applies exactly once.
    #[test]
    fn two_ball_types_pay_the_drawn_type_once() {
        let red = BallTypeId::new();
        let white = BallTypeId::new();
        let cfg = cfg_with(vec![
            ball(red, "red", dec!(100)),
            ball(white, "white", dec!(2)),
        ]);
        let lines = [NumberLine {
            number: 33,
            amount: dec!(10),
            bonus_amount: Some(dec!(5)),
        }];

        // Drawn red: 10*70 + 5*100, the red multiplier applied once.
        let drawn_red = ReventadoResult {
            number: 33,
            ball_type_id: red,
        };
        assert_eq!(reventado_win(&lines, &drawn_red, &cfg), dec!(1200));

        // Drawn white: 10*70 + 5*2; the red multiplier does not leak in.
        let drawn_white = ReventadoResult {
            number: 33,
            ball_type_id: white,
        };
        assert_eq!(reventado_win(&lines, &drawn_white, &cfg), dec!(710));
    }

    #[test]
    fn unconfigured_drawn_ball_pays_no_bonus() {
        let red = BallTypeId::new();
        let cfg = cfg_with(vec![ball(red, "red", dec!(100))]);
        let lines = [NumberLine {
            number: 33,
            amount: dec!(10),
            bonus_amount: Some(dec!(5)),
        }];
        let result = ReventadoResult {
            number: 33,
            ball_type_id: BallTypeId::new(),
        };
        assert_eq!(reventado_win(&lines, &result, &cfg), dec!(700));
    }
}
