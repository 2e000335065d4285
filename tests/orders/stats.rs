use rust_decimal_macros::dec;
use storefront::orders::{OrderStatus, UpdateOrderStatus};

use crate::support::{self, ManualClock, ALICE, BOB, CASE, CHARGER, HEADPHONES};

#[test]
fn stats_count_statuses_and_this_months_revenue() {
    let clock = ManualClock::at(2024, 2, 28);
    let service = support::service_with_clock(&clock);

    let february = service.place(ALICE, &support::cart(&[(CASE, 2)])).unwrap();
    clock.set(2024, 3, 2);
    let cancelled = service.place(BOB, &support::cart(&[(CHARGER, 1)])).unwrap();
    clock.set(2024, 3, 10);
    service.place(ALICE, &support::cart(&[(HEADPHONES, 1)])).unwrap();

    clock.set(2024, 3, 11);
    service.cancel(&cancelled.id, &support::bob()).unwrap();
    service
        .update_status(
            &february.id,
            &support::admin(),
            &UpdateOrderStatus {
                order_status: Some(OrderStatus::Delivered),
                ..Default::default()
            },
        )
        .unwrap();

    clock.set(2024, 3, 20);
    let stats = service.stats(&support::admin()).unwrap();

    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.pending_orders, 1);
    assert_eq!(stats.completed_orders, 1);
    assert_eq!(stats.monthly_orders, 2);
    assert_eq!(stats.monthly_revenue, dec!(1416));
}

#[test]
fn empty_store_has_zero_stats() {
    let service = support::service();
    let stats = service.stats(&support::admin()).unwrap();
    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.monthly_revenue, dec!(0));
}

#[test]
fn stats_are_admin_only() {
    let service = support::service();
    let err = service.stats(&support::alice()).unwrap_err();
    assert_eq!(err.status_code(), 403);
}
