use chrono::Duration;
use storefront::catalog::Category;
use storefront::orders::{MyOrdersQuery, OrderError, OrderStatus};

use crate::support::{self, ManualClock, ALICE, BOB, CASE, CHARGER, HEADPHONES};

#[test]
fn owner_sees_full_product_and_owner_details() {
    let service = support::service();
    let placed = service.place(ALICE, &support::cart(&[(CHARGER, 1)])).unwrap();

    let order = service.get(&placed.id, &support::alice()).unwrap();

    assert_eq!(order.id, placed.id);
    let product = &order.items[0].product;
    assert_eq!(product.name.as_deref(), Some("Fast Charger"));
    assert_eq!(product.category, Some(Category::Chargers));
    assert_eq!(product.brand.as_deref(), Some("Anker"));
    assert_eq!(order.user.first_name.as_deref(), Some("Alice"));
    assert_eq!(order.user.email.as_deref(), Some("alice@example.com"));
}

#[test]
fn other_customers_are_denied_but_admins_are_not() {
    let service = support::service();
    let placed = service.place(ALICE, &support::cart(&[(CASE, 1)])).unwrap();

    let err = service.get(&placed.id, &support::bob()).unwrap_err();
    assert_eq!(err, OrderError::access_denied());

    let order = service.get(&placed.id, &support::admin()).unwrap();
    assert_eq!(order.user.id, ALICE);
}

#[test]
fn missing_order_is_not_found() {
    let service = support::service();
    let err = service.get("missing", &support::alice()).unwrap_err();
    assert_eq!(err.to_string(), "Order not found");
}

#[test]
fn my_orders_are_paged_newest_first() {
    let clock = ManualClock::at(2024, 5, 1);
    let service = support::service_with_clock(&clock);

    let mut placed = Vec::new();
    for _ in 0..3 {
        placed.push(service.place(ALICE, &support::cart(&[(CASE, 1)])).unwrap());
        clock.advance(Duration::hours(1));
    }
    service.place(BOB, &support::cart(&[(CASE, 1)])).unwrap();

    let first = service
        .list_mine(
            &support::alice(),
            &MyOrdersQuery {
                page: Some(1),
                limit: Some(2),
                status: None,
            },
        )
        .unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.current_page, 1);
    let ids: Vec<_> = first.orders.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec![placed[2].id.as_str(), placed[1].id.as_str()]);

    let second = service
        .list_mine(
            &support::alice(),
            &MyOrdersQuery {
                page: Some(2),
                limit: Some(2),
                status: None,
            },
        )
        .unwrap();
    assert_eq!(second.orders.len(), 1);
    assert_eq!(second.orders[0].id, placed[0].id);

    let beyond = service
        .list_mine(
            &support::alice(),
            &MyOrdersQuery {
                page: Some(9),
                limit: Some(2),
                status: None,
            },
        )
        .unwrap();
    assert!(beyond.orders.is_empty());
    assert_eq!(beyond.total, 3);
}

#[test]
fn my_orders_filter_by_status() {
    let service = support::service();
    let keep = service.place(ALICE, &support::cart(&[(CASE, 1)])).unwrap();
    let cancel = service.place(ALICE, &support::cart(&[(HEADPHONES, 1)])).unwrap();
    service.cancel(&cancel.id, &support::alice()).unwrap();

    let page = service
        .list_mine(
            &support::alice(),
            &MyOrdersQuery {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.orders[0].id, cancel.id);
    assert_ne!(page.orders[0].id, keep.id);
}

#[test]
fn list_entries_carry_product_summaries() {
    let service = support::service();
    service.place(ALICE, &support::cart(&[(CHARGER, 1)])).unwrap();

    let page = service
        .list_mine(&support::alice(), &MyOrdersQuery::default())
        .unwrap();

    let product = &page.orders[0].items[0].product;
    assert_eq!(product.name.as_deref(), Some("Fast Charger"));
    assert_eq!(product.category, None);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn customer_with_no_orders_gets_an_empty_page() {
    let service = support::service();
    let page = service
        .list_mine(&support::bob(), &MyOrdersQuery::default())
        .unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.orders.is_empty());
}
