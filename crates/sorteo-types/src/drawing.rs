//! Lotteries and their scheduled drawings

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{BankId, DrawingId, LotteryId, LotteryVariant};

/// A sellable game template owned by a bank.
///
/// The variant is immutable once tickets exist against any of its drawings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lottery {
    pub id: LotteryId,
    pub bank_id: BankId,
    pub name: String,
    pub variant: LotteryVariant,
    /// Last moment tickets may be sold, local time.
    pub closing_time: NaiveTime,
    /// Scheduled draw moment, local time.
    pub draw_time: NaiveTime,
    pub is_deleted: bool,
}

/// One scheduled instance of a lottery for a specific date.
///
/// Lifecycle: `Scheduled -> Resolved (winning numbers declared) -> Computed`.
/// `is_computed` flips to true exactly once, inside the settlement
/// transaction, and is never un-set; it gates both ticket sales and
/// re-billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: DrawingId,
    pub lottery_id: LotteryId,
    pub date: NaiveDate,
    pub is_deleted: bool,
    pub is_computed: bool,
}

impl Drawing {
    /// True while the drawing may still accept tickets or be settled.
    pub fn is_open(&self) -> bool {
        !self.is_deleted && !self.is_computed
    }
}
