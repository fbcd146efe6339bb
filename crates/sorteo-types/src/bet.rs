//! Bet-line shapes, one per variant family
//!
//! A ticket carries a homogeneous list of lines. The `BetLines` enum keeps the
//! variant tag with the data so payout dispatch cannot mix shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LotteryVariant, MonazoBetType};

/// One stake on a single number (Common and Reventado).
///
/// `bonus_amount` is the reventado bonus-ball stake; Common lotteries carry
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLine {
    pub number: i16,
    pub amount: Decimal,
    pub bonus_amount: Option<Decimal>,
}

/// One stake on a three-digit combination (Monazo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonazoLine {
    pub first: i16,
    pub second: i16,
    pub third: i16,
    pub bet_type: MonazoBetType,
    pub amount: Decimal,
}

/// One stake on a two-number combination (Parley).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParleyLine {
    pub first: i16,
    pub second: i16,
    pub amount: Decimal,
}

/// The bet lines of one ticket, tagged by variant family.
///
/// Common and Reventado share the `NumberLine` shape; the owning lottery's
/// variant decides which payout rules apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "lines", rename_all = "snake_case")]
pub enum BetLines {
    Common(Vec<NumberLine>),
    Reventado(Vec<NumberLine>),
    Monazo(Vec<MonazoLine>),
    Parley(Vec<ParleyLine>),
}

impl BetLines {
    /// Variant family these lines belong to.
    pub fn variant(&self) -> LotteryVariant {
        match self {
            Self::Common(_) => LotteryVariant::Common,
            Self::Reventado(_) => LotteryVariant::Reventado,
            Self::Monazo(_) => LotteryVariant::Monazo,
            Self::Parley(_) => LotteryVariant::Parley,
        }
    }

    /// Number of lines on the ticket.
    pub fn len(&self) -> usize {
        match self {
            Self::Common(l) | Self::Reventado(l) => l.len(),
            Self::Monazo(l) => l.len(),
            Self::Parley(l) => l.len(),
        }
    }

    /// True when the ticket carries no lines.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all stake amounts, bonus stakes included.
    ///
    /// This is the ticket price by construction.
    pub fn total_amount(&self) -> Decimal {
        match self {
            Self::Common(lines) | Self::Reventado(lines) => lines
                .iter()
                .map(|l| l.amount + l.bonus_amount.unwrap_or(Decimal::ZERO))
                .sum(),
            Self::Monazo(lines) => lines.iter().map(|l| l.amount).sum(),
            Self::Parley(lines) => lines.iter().map(|l| l.amount).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_amount_includes_bonus_stakes() {
        let lines = BetLines::Reventado(vec![
            NumberLine {
                number: 7,
                amount: dec!(100),
                bonus_amount: Some(dec!(50)),
            },
            NumberLine {
                number: 12,
                amount: dec!(25),
                bonus_amount: None,
            },
        ]);
        assert_eq!(lines.total_amount(), dec!(175));
        assert_eq!(lines.variant(), LotteryVariant::Reventado);
    }

    #[test]
    fn monazo_total_is_sum_of_line_amounts() {
        let lines = BetLines::Monazo(vec![
            MonazoLine {
                first: 1,
                second: 2,
                third: 3,
                bet_type: MonazoBetType::Order,
                amount: dec!(10),
            },
            MonazoLine {
                first: 4,
                second: 5,
                third: 6,
                bet_type: MonazoBetType::Disorder,
                amount: dec!(15),
            },
        ]);
        assert_eq!(lines.total_amount(), dec!(25));
        assert_eq!(lines.len(), 2);
    }
}
