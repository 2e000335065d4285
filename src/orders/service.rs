use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::error::OrderError;
use super::order::Order;
use super::pricing::PricingConfig;
use super::view::{OrderView, OwnerRef, ProductDetail, ProductRef};
use crate::catalog::Product;
use crate::customer::{Customer, Role};
use crate::model::{ModelStore, ModelsExt};
use crate::settings::OrderSettings;

/// Source of "now" for timestamps, delivery estimates and monthly stats.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The identity an operation runs on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requester {
    pub user_id: String,
    pub role: Role,
}

impl Requester {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Customer,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub(crate) fn require_admin(&self) -> Result<(), OrderError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(OrderError::access_denied())
        }
    }
}

/// Order lifecycle over a model store: placement, lookup, cancellation,
/// admin updates and statistics.
pub struct OrderService<S> {
    pub(crate) store: S,
    pub(crate) pricing: PricingConfig,
    pub(crate) max_commit_attempts: u32,
    clock: Clock,
}

impl<S: ModelStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pricing: PricingConfig::default(),
            max_commit_attempts: 3,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn from_settings(store: S, pricing: PricingConfig, orders: &OrderSettings) -> Self {
        Self::new(store)
            .with_pricing(pricing)
            .with_max_commit_attempts(orders.max_commit_attempts)
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_max_commit_attempts(mut self, attempts: u32) -> Self {
        self.max_commit_attempts = attempts.max(1);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Run `attempt` again while it fails on a stale version, up to the
    /// configured number of attempts.
    pub(crate) fn retry_on_conflict<T>(
        &self,
        operation: &'static str,
        mut attempt: impl FnMut() -> Result<T, OrderError>,
    ) -> Result<T, OrderError> {
        let mut tries = 1;
        loop {
            match attempt() {
                Err(OrderError::Store(err)) if err.is_conflict() => {
                    if tries >= self.max_commit_attempts {
                        warn!(operation, tries, error = %err, "giving up after repeated conflicts");
                        return Err(OrderError::Conflict(format!(
                            "{} conflicted with concurrent updates, please retry",
                            operation
                        )));
                    }
                    warn!(operation, tries, error = %err, "concurrent update detected, retrying");
                    tries += 1;
                }
                result => return result,
            }
        }
    }

    /// Build the response view of an order, reading current product and
    /// owner records as requested.
    pub(crate) fn view(
        &self,
        order: Order,
        detail: ProductDetail,
        with_owner: bool,
    ) -> Result<OrderView, OrderError> {
        let products = self.store.models::<Product>();
        let mut refs = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let product = match detail {
                ProductDetail::Id => None,
                _ => products.get(&line.product)?.map(|v| v.data),
            };
            refs.push(ProductRef::resolve(line, product.as_ref(), detail));
        }

        let customer = if with_owner {
            self.store.models::<Customer>().get(&order.user)?.map(|v| v.data)
        } else {
            None
        };
        let owner = OwnerRef::resolve(&order.user, customer.as_ref());

        Ok(OrderView::new(order, owner, refs))
    }
}
