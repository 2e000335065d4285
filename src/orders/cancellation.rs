//! Owner-initiated cancellation, restoring the stock the order reserved.

use tracing::{info, instrument, warn};

use super::error::OrderError;
use super::order::{Order, OrderStatus};
use super::service::{OrderService, Requester};
use super::view::{OrderView, ProductDetail};
use crate::catalog::Product;
use crate::model::{ModelStore, ModelsExt, Versioned};

impl<S: ModelStore> OrderService<S> {
    /// Cancel a `pending` or `confirmed` order owned by the requester.
    ///
    /// Stock restoration and the status change are committed together; a
    /// product that no longer exists is skipped.
    #[instrument(skip(self, requester), fields(user = %requester.user_id))]
    pub fn cancel(&self, order_id: &str, requester: &Requester) -> Result<OrderView, OrderError> {
        let order = self.retry_on_conflict("order cancellation", || {
            self.try_cancel(order_id, requester)
        })?;

        info!(order_id = %order.id, order_number = %order.order_number, "order cancelled");
        self.view(order, ProductDetail::Id, false)
    }

    fn try_cancel(&self, order_id: &str, requester: &Requester) -> Result<Order, OrderError> {
        let Versioned { data: mut order, version } = self
            .store
            .models::<Order>()
            .get(order_id)?
            .ok_or_else(OrderError::order_not_found)?;

        if !order.is_owned_by(&requester.user_id) {
            return Err(OrderError::access_denied());
        }
        if !order.order_status.is_cancellable() {
            return Err(OrderError::InvalidState("Order cannot be cancelled".into()));
        }

        let now = self.now();
        let products = self.store.models::<Product>();
        let mut restored: Vec<Versioned<Product>> = Vec::new();

        for line in &order.items {
            if let Some(product) = restored.iter_mut().find(|p| p.data.id == line.product) {
                product.data.restore_stock(line.quantity, now);
                continue;
            }
            match products.get(&line.product)? {
                Some(mut product) => {
                    product.data.restore_stock(line.quantity, now);
                    restored.push(product);
                }
                None => warn!(
                    order_id = %order.id,
                    product_id = %line.product,
                    quantity = line.quantity,
                    "product no longer exists, stock not restored"
                ),
            }
        }

        order.order_status = OrderStatus::Cancelled;
        order.touch(now);

        restored
            .iter()
            .fold(self.store.batch(), |batch, product| {
                batch.update(&product.data, product.version)
            })
            .update(&order, version)
            .commit()?;

        Ok(order)
    }
}
