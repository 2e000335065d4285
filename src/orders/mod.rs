//! orders - order lifecycle and stock bookkeeping.
//!
//! `OrderService<S>` runs every order operation against a `ModelStore`:
//!
//! ```ignore
//! use storefront::model::InMemoryModelStore;
//! use storefront::orders::{OrderService, PlaceOrder, Requester};
//!
//! let service = OrderService::new(InMemoryModelStore::new());
//! let order = service.place("user-42", &request)?;
//! service.cancel(&order.id, &Requester::customer("user-42"))?;
//! ```
//!
//! Placement and cancellation commit their order write and all stock
//! adjustments as one atomic batch, conditioned on the versions they read.
//! A batch that loses a race is re-run from fresh reads.

mod admin;
mod cancellation;
mod error;
mod order;
mod placement;
mod pricing;
mod query;
mod service;
mod stats;
mod view;

pub use admin::UpdateOrderStatus;
pub use error::OrderError;
pub use order::{
    Order, OrderLine, OrderStatus, PaymentMethod, PaymentStatus, ShippingAddress,
};
pub use placement::{CartLine, PlaceOrder};
pub use pricing::{Pricing, PricingConfig};
pub use query::{AdminOrdersQuery, MyOrdersQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use service::{Clock, OrderService, Requester};
pub use view::{LineView, OrderPage, OrderStats, OrderView, OwnerRef, ProductDetail, ProductRef};
