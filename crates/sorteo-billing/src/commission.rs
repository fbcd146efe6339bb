//! Seller commission lookup
//!
//! A flat, pre-provisioned percentage per (seller, lottery) pair. A seller
//! who sold tickets but has no row is a data-integrity failure, fatal to the
//! whole settlement; defaulting to zero would silently under-bill the house.

use rust_decimal::Decimal;
use std::collections::HashMap;

use sorteo_types::{LotteryId, SellerId, SorteoError};

use crate::{SettlementError, SettlementResult};

/// One provisioned commission row.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRow {
    pub seller_id: SellerId,
    pub percent: Decimal,
}

/// Commission percentages for the sellers of one lottery.
#[derive(Debug, Clone)]
pub struct CommissionTable {
    lottery_id: LotteryId,
    by_seller: HashMap<SellerId, Decimal>,
}

impl CommissionTable {
    /// Build a table from provisioned rows, validating each percent into
    /// [0, 100].
    pub fn new(lottery_id: LotteryId, rows: Vec<CommissionRow>) -> SettlementResult<Self> {
        let mut by_seller = HashMap::with_capacity(rows.len());
        for row in rows {
            if row.percent < Decimal::ZERO || row.percent > Decimal::ONE_HUNDRED {
                return Err(SorteoError::PercentOutOfRange {
                    percent: row.percent.to_string(),
                }
                .into());
            }
            by_seller.insert(row.seller_id, row.percent);
        }
        Ok(Self {
            lottery_id,
            by_seller,
        })
    }

    /// Commission percent for a seller; absence is fatal.
    pub fn percent_for(&self, seller_id: SellerId) -> SettlementResult<Decimal> {
        self.by_seller
            .get(&seller_id)
            .copied()
            .ok_or(SettlementError::MissingCommission {
                seller_id,
                lottery_id: self.lottery_id,
            })
    }

    /// House cut on a gross sale amount.
    pub fn commission_on(&self, seller_id: SellerId, gross: Decimal) -> SettlementResult<Decimal> {
        let percent = self.percent_for(seller_id)?;
        Ok(gross * percent / Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn commission_is_percent_of_gross() {
        let seller = SellerId::new();
        let table = CommissionTable::new(
            LotteryId::new(),
            vec![CommissionRow {
                seller_id: seller,
                percent: dec!(10),
            }],
        )
        .unwrap();

        assert_eq!(table.commission_on(seller, dec!(150)).unwrap(), dec!(15));
    }

    #[test]
    fn missing_seller_is_fatal() {
        let table = CommissionTable::new(LotteryId::new(), vec![]).unwrap();
        let err = table.percent_for(SellerId::new()).unwrap_err();
        assert!(matches!(err, SettlementError::MissingCommission { .. }));
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        let result = CommissionTable::new(
            LotteryId::new(),
            vec![CommissionRow {
                seller_id: SellerId::new(),
                percent: dec!(101),
            }],
        );
        assert!(result.is_err());

        let result = CommissionTable::new(
            LotteryId::new(),
            vec![CommissionRow {
                seller_id: SellerId::new(),
                percent: dec!(-1),
            }],
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_and_hundred_are_valid_bounds() {
        let s1 = SellerId::new();
        let s2 = SellerId::new();
        let table = CommissionTable::new(
            LotteryId::new(),
            vec![
                CommissionRow {
                    seller_id: s1,
                    percent: dec!(0),
                },
                CommissionRow {
                    seller_id: s2,
                    percent: dec!(100),
                },
            ],
        )
        .unwrap();
        assert_eq!(table.commission_on(s1, dec!(50)).unwrap(), dec!(0));
        assert_eq!(table.commission_on(s2, dec!(50)).unwrap(), dec!(50));
    }
}
