//! Variant payout configuration
//!
//! Multipliers live with the lottery, not the drawing: every drawing of a
//! lottery settles against the same configuration. Common is the exception,
//! its multipliers ride on the declared winning rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BallTypeId, LotteryVariant};

/// A configured reventado bonus-ball type with its payout multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallType {
    pub id: BallTypeId,
    pub name: String,
    pub multiplier: Decimal,
}

/// Reventado payout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReventadoConfig {
    /// Multiplier applied to the main stake on a number hit.
    pub base_multiplier: Decimal,
    /// Configured bonus-ball types; the drawn ball selects one.
    pub ball_types: Vec<BallType>,
}

impl ReventadoConfig {
    /// Multiplier of the configured ball type with the given id, if any.
    pub fn ball_multiplier(&self, id: BallTypeId) -> Option<Decimal> {
        self.ball_types
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.multiplier)
    }
}

/// Monazo payout configuration, one multiplier per bet-type tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonazoConfig {
    /// Type 1: exact positional match.
    pub order: Decimal,
    /// Type 2: multiset match.
    pub disorder: Decimal,
    /// Type 3, exact hit.
    pub combo_order: Decimal,
    /// Type 3, permuted hit.
    pub combo_disorder: Decimal,
    /// Type 4: full or last-two positional match.
    pub partial_order: Decimal,
}

/// Parley payout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParleyConfig {
    pub multiplier: Decimal,
}

/// Payout configuration for one lottery, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "config", rename_all = "snake_case")]
pub enum VariantConfig {
    /// Multipliers are carried by the winning rows themselves.
    Common,
    Reventado(ReventadoConfig),
    Monazo(MonazoConfig),
    Parley(ParleyConfig),
}

impl VariantConfig {
    /// Variant family this configuration belongs to.
    pub fn variant(&self) -> LotteryVariant {
        match self {
            Self::Common => LotteryVariant::Common,
            Self::Reventado(_) => LotteryVariant::Reventado,
            Self::Monazo(_) => LotteryVariant::Monazo,
            Self::Parley(_) => LotteryVariant::Parley,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ball_multiplier_lookup() {
        let red = BallTypeId::new();
        let white = BallTypeId::new();
        let cfg = ReventadoConfig {
            base_multiplier: dec!(70),
            ball_types: vec![
                BallType {
                    id: red,
                    name: "red".into(),
                    multiplier: dec!(100),
                },
                BallType {
                    id: white,
                    name: "white".into(),
                    multiplier: dec!(2),
                },
            ],
        };
        assert_eq!(cfg.ball_multiplier(red), Some(dec!(100)));
        assert_eq!(cfg.ball_multiplier(white), Some(dec!(2)));
        assert_eq!(cfg.ball_multiplier(BallTypeId::new()), None);
    }
}
