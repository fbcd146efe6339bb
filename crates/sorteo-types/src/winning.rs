//! Declared drawing results, one shape per variant
//!
//! At most one record set exists per drawing per variant. Settlement treats
//! absence as an unresolved drawing and refuses to proceed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BallTypeId, LotteryVariant, PrizeId};

/// One winning number row for a Common drawing.
///
/// A drawing may declare several rows (multiple prize tiers); the multiplier
/// rides on the linked prize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonWinningNumber {
    pub number: i16,
    pub prize_id: PrizeId,
    pub multiplier: Decimal,
}

/// The single result of a Reventado drawing: the winning number plus the
/// color of the drawn bonus ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReventadoResult {
    pub number: i16,
    pub ball_type_id: BallTypeId,
}

/// The three-digit result of a Monazo drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonazoResult {
    pub first: i16,
    pub second: i16,
    pub third: i16,
}

impl MonazoResult {
    /// The result as a positional triple.
    pub fn triple(&self) -> [i16; 3] {
        [self.first, self.second, self.third]
    }
}

/// The three-number result a Parley drawing is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParleyResult {
    pub first: i16,
    pub second: i16,
    pub third: i16,
}

impl ParleyResult {
    /// The result as a triple.
    pub fn triple(&self) -> [i16; 3] {
        [self.first, self.second, self.third]
    }
}

/// Declared result for a drawing, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "result", rename_all = "snake_case")]
pub enum WinningRecord {
    Common(Vec<CommonWinningNumber>),
    Reventado(ReventadoResult),
    Monazo(MonazoResult),
    Parley(ParleyResult),
}

impl WinningRecord {
    /// Variant family this record resolves.
    pub fn variant(&self) -> LotteryVariant {
        match self {
            Self::Common(_) => LotteryVariant::Common,
            Self::Reventado(_) => LotteryVariant::Reventado,
            Self::Monazo(_) => LotteryVariant::Monazo,
            Self::Parley(_) => LotteryVariant::Parley,
        }
    }
}
