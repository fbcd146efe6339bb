//! Lottery variant tags
//!
//! Each variant family is a closed enum so payout dispatch is exhaustive at
//! compile time; raw numeric ids exist only at the storage boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four sellable lottery variants.
///
/// Wire/storage values: Common=1, Reventado=2, Monazo=3, Parley=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryVariant {
    /// Straight numbered bets paid against one-or-many winning prize tiers.
    Common,
    /// Numbered bets with an optional bonus-ball stake on colored balls.
    Reventado,
    /// Three-digit combinations with order/disorder payout tiers.
    Monazo,
    /// Two-number combinations scored against a three-number draw.
    Parley,
}

impl LotteryVariant {
    /// Storage representation (numeric id).
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Common => 1,
            Self::Reventado => 2,
            Self::Monazo => 3,
            Self::Parley => 4,
        }
    }

    /// Parse the storage representation.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Common),
            2 => Some(Self::Reventado),
            3 => Some(Self::Monazo),
            4 => Some(Self::Parley),
            _ => None,
        }
    }
}

impl fmt::Display for LotteryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Common => "common",
            Self::Reventado => "reventado",
            Self::Monazo => "monazo",
            Self::Parley => "parley",
        };
        write!(f, "{name}")
    }
}

/// Monazo bet sub-types.
///
/// Storage values: Order=1, Disorder=2, Combo=3, PartialCombo=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonazoBetType {
    /// Win iff the triple matches positionally.
    Order,
    /// Win iff the triple matches as a multiset, order-independent.
    Disorder,
    /// Exact order first, else disorder; mutually exclusive tiers.
    Combo,
    /// Full positional match, or last two digits positional regardless of first.
    PartialCombo,
}

impl MonazoBetType {
    /// Storage representation (numeric id).
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Order => 1,
            Self::Disorder => 2,
            Self::Combo => 3,
            Self::PartialCombo => 4,
        }
    }

    /// Parse the storage representation.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Order),
            2 => Some(Self::Disorder),
            3 => Some(Self::Combo),
            4 => Some(Self::PartialCombo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_ids_round_trip() {
        for v in [
            LotteryVariant::Common,
            LotteryVariant::Reventado,
            LotteryVariant::Monazo,
            LotteryVariant::Parley,
        ] {
            assert_eq!(LotteryVariant::from_i16(v.as_i16()), Some(v));
        }
        assert_eq!(LotteryVariant::from_i16(0), None);
        assert_eq!(LotteryVariant::from_i16(5), None);
    }

    #[test]
    fn monazo_ids_round_trip() {
        for t in [
            MonazoBetType::Order,
            MonazoBetType::Disorder,
            MonazoBetType::Combo,
            MonazoBetType::PartialCombo,
        ] {
            assert_eq!(MonazoBetType::from_i16(t.as_i16()), Some(t));
        }
        assert_eq!(MonazoBetType::from_i16(9), None);
    }
}
