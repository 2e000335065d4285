//! Shared fixtures: a small catalog, two customers and an admin.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use storefront::catalog::{Category, Product};
use storefront::customer::{Customer, Role};
use storefront::model::{InMemoryModelStore, ModelsExt};
use storefront::orders::{
    CartLine, OrderService, PaymentMethod, PlaceOrder, Requester, ShippingAddress,
};

pub const CASE: &str = "phone-case";
pub const CHARGER: &str = "fast-charger";
pub const HEADPHONES: &str = "headphones";

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const ADMIN: &str = "admin";

/// Store with the fixture catalog and customers.
///
/// | id           | price | stock |
/// |--------------|-------|-------|
/// | phone-case   |   250 |    10 |
/// | fast-charger |   600 |     5 |
/// | headphones   |  1200 |     3 |
pub fn store() -> InMemoryModelStore {
    let store = InMemoryModelStore::new();
    store
        .batch()
        .save(
            &Product::new(CASE, "Phone Case", dec!(250), Category::Cases, "Spigen")
                .with_stock(10),
        )
        .save(
            &Product::new(CHARGER, "Fast Charger", dec!(600), Category::Chargers, "Anker")
                .with_stock(5),
        )
        .save(
            &Product::new(HEADPHONES, "Headphones", dec!(1200), Category::Headphones, "Sony")
                .with_stock(3),
        )
        .save(&Customer::new(ALICE, "Alice", "Rao", "alice@example.com"))
        .save(&Customer::new(BOB, "Bob", "Iyer", "bob@example.com"))
        .save(&Customer::new(ADMIN, "Admin", "User", "admin@example.com").with_role(Role::Admin))
        .commit()
        .unwrap();
    store
}

pub fn service() -> OrderService<InMemoryModelStore> {
    OrderService::new(store())
}

/// A clock tests can move by hand.
#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let start = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        ManualClock(Arc::new(Mutex::new(start)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }

    pub fn set(&self, year: i32, month: u32, day: u32) {
        *self.0.lock().unwrap() = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

pub fn service_with_clock(clock: &ManualClock) -> OrderService<InMemoryModelStore> {
    let clock = clock.clone();
    OrderService::new(store()).with_clock(move || clock.now())
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Alice".into(),
        last_name: "Rao".into(),
        email: "alice@example.com".into(),
        phone: "9876543210".into(),
        street: "12 MG Road".into(),
        city: "Bengaluru".into(),
        state: "Karnataka".into(),
        zip_code: "560001".into(),
        country: "India".into(),
    }
}

pub fn cart(lines: &[(&str, u32)]) -> PlaceOrder {
    PlaceOrder {
        items: lines
            .iter()
            .map(|(product_id, quantity)| CartLine {
                product_id: product_id.to_string(),
                quantity: *quantity,
            })
            .collect(),
        shipping_address: address(),
        payment_method: PaymentMethod::CashOnDelivery,
        notes: None,
    }
}

pub fn stock(service: &OrderService<InMemoryModelStore>, product_id: &str) -> u32 {
    service
        .store()
        .models::<Product>()
        .require(product_id)
        .unwrap()
        .data
        .stock
}

pub fn alice() -> Requester {
    Requester::customer(ALICE)
}

pub fn bob() -> Requester {
    Requester::customer(BOB)
}

pub fn admin() -> Requester {
    Requester::admin(ADMIN)
}
