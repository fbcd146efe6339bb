//! End-to-end settlement properties against the in-memory store.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sorteo_billing::{
    DrawingSnapshot, OwnerOrAdminAccess, SettlementEngine, SettlementError, SettlementStore,
    SettlementWriteSet, StoreError,
};
use sorteo_billing::InMemoryStore;
use sorteo_types::{
    Actor, BankId, BetLines, CommonWinningNumber, Drawing, DrawingId, LotteryId, LotteryVariant,
    NumberLine, ParleyConfig, ParleyLine, ParleyResult, PrizeId, Role, SellerId, Ticket, TicketId,
    UserId, VariantConfig, WinningRecord,
};

struct Fixture {
    store: InMemoryStore,
    drawing_id: DrawingId,
    lottery_id: LotteryId,
    owner: UserId,
}

async fn common_fixture() -> Fixture {
    let store = InMemoryStore::new();
    let drawing_id = DrawingId::new();
    let lottery_id = LotteryId::new();
    let owner = UserId::new();

    store
        .insert_drawing(DrawingSnapshot {
            drawing: Drawing {
                id: drawing_id,
                lottery_id,
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                is_deleted: false,
                is_computed: false,
            },
            lottery_id,
            variant: LotteryVariant::Common,
            config: VariantConfig::Common,
            bank_id: BankId::new(),
            bank_owner: owner,
        })
        .await;

    Fixture {
        store,
        drawing_id,
        lottery_id,
        owner,
    }
}

fn common_ticket(
    drawing_id: DrawingId,
    seller_id: SellerId,
    number: i16,
    amount: Decimal,
) -> Ticket {
    Ticket {
        id: TicketId::new(),
        drawing_id,
        seller_id,
        buyer_name: "walk-in".into(),
        purchased_at: Utc::now(),
        price: amount,
        is_cancelled: false,
        is_computed: false,
        prize: Decimal::ZERO,
        lines: BetLines::Common(vec![NumberLine {
            number,
            amount,
            bonus_amount: None,
        }]),
    }
}

fn winning_12_at_5() -> WinningRecord {
    WinningRecord::Common(vec![CommonWinningNumber {
        number: 12,
        prize_id: PrizeId::new(),
        multiplier: dec!(5),
    }])
}

fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin)
}

#[tokio::test]
async fn common_end_to_end_scenario() {
    let fx = common_fixture().await;
    let s1 = SellerId::new();

    let ticket_a = common_ticket(fx.drawing_id, s1, 12, dec!(100));
    let ticket_b = common_ticket(fx.drawing_id, s1, 99, dec!(50));
    fx.store.insert_ticket(ticket_a.clone()).await;
    fx.store.insert_ticket(ticket_b.clone()).await;
    fx.store.set_commission(fx.lottery_id, s1, dec!(10)).await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let statement = engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await
        .unwrap();

    assert_eq!(statement.lines.len(), 1);
    let line = &statement.lines[0];
    assert_eq!(line.quantity_sold, dec!(150));
    assert_eq!(line.commission, dec!(15));
    assert_eq!(line.prize_to_be_paid, dec!(500));

    // Balance delta = 150 - 15 - 500.
    assert_eq!(fx.store.balance(s1).await, dec!(-365));

    // Winner credited, loser untouched, both consumed.
    let a = fx.store.ticket(ticket_a.id).await.unwrap();
    let b = fx.store.ticket(ticket_b.id).await.unwrap();
    assert_eq!(a.prize, dec!(500));
    assert_eq!(b.prize, Decimal::ZERO);
    assert!(a.is_computed);
    assert!(b.is_computed);
}

#[tokio::test]
async fn settling_twice_yields_one_statement_and_one_delta() {
    let fx = common_fixture().await;
    let s1 = SellerId::new();
    fx.store
        .insert_ticket(common_ticket(fx.drawing_id, s1, 12, dec!(100)))
        .await;
    fx.store.set_commission(fx.lottery_id, s1, dec!(10)).await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await
        .unwrap();
    let balance_after_first = fx.store.balance(s1).await;

    let second = engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await;
    assert!(matches!(
        second,
        Err(SettlementError::AlreadySettled { .. })
    ));

    assert_eq!(fx.store.statements_for(fx.drawing_id).await.len(), 1);
    assert_eq!(fx.store.balance(s1).await, balance_after_first);
}

#[tokio::test]
async fn concurrent_apply_loses_to_the_computed_guard() {
    let fx = common_fixture().await;
    let s1 = SellerId::new();
    fx.store
        .insert_ticket(common_ticket(fx.drawing_id, s1, 12, dec!(100)))
        .await;

    // Two racers built the same write set from the same pre-state; only the
    // first commit wins.
    let write_set = SettlementWriteSet {
        drawing_id: fx.drawing_id,
        billing_date: Utc::now(),
        lines: vec![],
        winners: vec![],
        consumed: vec![],
    };
    fx.store.apply(write_set.clone()).await.unwrap();
    let second = fx.store.apply(write_set).await;
    assert!(matches!(second, Err(StoreError::Conflict(_))));
    assert_eq!(fx.store.statements_for(fx.drawing_id).await.len(), 1);
}

#[tokio::test]
async fn cancelled_tickets_stay_out_of_settlement() {
    let fx = common_fixture().await;
    let s1 = SellerId::new();

    let mut cancelled = common_ticket(fx.drawing_id, s1, 12, dec!(100));
    cancelled.is_cancelled = true;
    let live = common_ticket(fx.drawing_id, s1, 99, dec!(50));
    fx.store.insert_ticket(cancelled.clone()).await;
    fx.store.insert_ticket(live).await;
    fx.store.set_commission(fx.lottery_id, s1, dec!(10)).await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let statement = engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await
        .unwrap();

    // Only the live ticket contributes; the cancelled one stays unconsumed
    // and unpaid even though its number matched.
    assert_eq!(statement.lines[0].quantity_sold, dec!(50));
    let c = fx.store.ticket(cancelled.id).await.unwrap();
    assert!(!c.is_computed);
    assert_eq!(c.prize, Decimal::ZERO);
}

#[tokio::test]
async fn unresolved_drawing_is_refused_without_side_effects() {
    let fx = common_fixture().await;
    let s1 = SellerId::new();
    let ticket = common_ticket(fx.drawing_id, s1, 12, dec!(100));
    fx.store.insert_ticket(ticket.clone()).await;
    fx.store.set_commission(fx.lottery_id, s1, dec!(10)).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let result = engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await;
    assert!(matches!(result, Err(SettlementError::Unresolved { .. })));

    assert!(fx.store.statements_for(fx.drawing_id).await.is_empty());
    assert!(!fx.store.ticket(ticket.id).await.unwrap().is_computed);
    assert_eq!(fx.store.balance(s1).await, Decimal::ZERO);
}

#[tokio::test]
async fn missing_commission_aborts_the_whole_run() {
    let fx = common_fixture().await;
    let with_commission = SellerId::new();
    let without_commission = SellerId::new();

    fx.store
        .insert_ticket(common_ticket(fx.drawing_id, with_commission, 12, dec!(100)))
        .await;
    fx.store
        .insert_ticket(common_ticket(
            fx.drawing_id,
            without_commission,
            99,
            dec!(50),
        ))
        .await;
    fx.store
        .set_commission(fx.lottery_id, with_commission, dec!(10))
        .await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let result = engine
        .settle(fx.drawing_id, LotteryVariant::Common, admin())
        .await;
    assert!(matches!(
        result,
        Err(SettlementError::MissingCommission { .. })
    ));

    // Not partially applied: neither seller was billed.
    assert!(fx.store.statements_for(fx.drawing_id).await.is_empty());
    assert_eq!(fx.store.balance(with_commission).await, Decimal::ZERO);
}

#[tokio::test]
async fn wrong_variant_endpoint_is_refused() {
    let fx = common_fixture().await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let result = engine
        .settle(fx.drawing_id, LotteryVariant::Parley, admin())
        .await;
    assert!(matches!(
        result,
        Err(SettlementError::VariantMismatch { .. })
    ));
}

#[tokio::test]
async fn unauthorized_caller_is_refused() {
    let fx = common_fixture().await;
    fx.store.declare(fx.drawing_id, winning_12_at_5()).await;

    let engine = SettlementEngine::new(fx.store.clone(), OwnerOrAdminAccess);
    let outsider = Actor::new(UserId::new(), Role::Seller);
    let result = engine
        .settle(fx.drawing_id, LotteryVariant::Common, outsider)
        .await;
    assert!(matches!(result, Err(SettlementError::NotAuthorized)));

    // The owner themselves is allowed.
    let owner = Actor::new(fx.owner, Role::BankOwner);
    let result = engine
        .settle(fx.drawing_id, LotteryVariant::Common, owner)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn parley_settles_with_any_two_rule() {
    let store = InMemoryStore::new();
    let drawing_id = DrawingId::new();
    let lottery_id = LotteryId::new();

    store
        .insert_drawing(DrawingSnapshot {
            drawing: Drawing {
                id: drawing_id,
                lottery_id,
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                is_deleted: false,
                is_computed: false,
            },
            lottery_id,
            variant: LotteryVariant::Parley,
            config: VariantConfig::Parley(ParleyConfig {
                multiplier: dec!(20),
            }),
            bank_id: BankId::new(),
            bank_owner: UserId::new(),
        })
        .await;

    let seller = SellerId::new();
    let winner = Ticket {
        id: TicketId::new(),
        drawing_id,
        seller_id: seller,
        buyer_name: "walk-in".into(),
        purchased_at: Utc::now(),
        price: dec!(10),
        is_cancelled: false,
        is_computed: false,
        prize: Decimal::ZERO,
        lines: BetLines::Parley(vec![ParleyLine {
            first: 7,
            second: 2,
            amount: dec!(10),
        }]),
    };
    let loser = Ticket {
        id: TicketId::new(),
        lines: BetLines::Parley(vec![ParleyLine {
            first: 7,
            second: 5,
            amount: dec!(10),
        }]),
        ..winner.clone()
    };
    store.insert_ticket(winner.clone()).await;
    store.insert_ticket(loser.clone()).await;
    store.set_commission(lottery_id, seller, dec!(12)).await;
    store
        .declare(
            drawing_id,
            WinningRecord::Parley(ParleyResult {
                first: 7,
                second: 2,
                third: 9,
            }),
        )
        .await;

    let engine = SettlementEngine::new(store.clone(), OwnerOrAdminAccess);
    let statement = engine
        .settle(drawing_id, LotteryVariant::Parley, admin())
        .await
        .unwrap();

    let line = &statement.lines[0];
    assert_eq!(line.quantity_sold, dec!(20));
    assert_eq!(line.prize_to_be_paid, dec!(200));
    assert_eq!(store.ticket(winner.id).await.unwrap().prize, dec!(200));
    assert_eq!(store.ticket(loser.id).await.unwrap().prize, Decimal::ZERO);
}
