//! Back-office status updates. Admins may move an order to any status;
//! only owner cancellation is restricted.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::error::OrderError;
use super::order::{Order, OrderStatus, PaymentStatus};
use super::service::{OrderService, Requester};
use super::view::{OrderView, ProductDetail};
use crate::model::{ModelStore, ModelsExt};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatus {
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

impl UpdateOrderStatus {
    fn apply(&self, order: &mut Order) {
        if let Some(status) = self.order_status {
            order.order_status = status;
        }
        if let Some(status) = self.payment_status {
            order.payment_status = status;
        }
        if let Some(tracking) = self.tracking_number.as_deref().map(str::trim) {
            if !tracking.is_empty() {
                order.tracking_number = Some(tracking.to_string());
            }
        }
    }
}

impl<S: ModelStore> OrderService<S> {
    #[instrument(skip(self, requester, update), fields(admin = %requester.user_id))]
    pub fn update_status(
        &self,
        order_id: &str,
        requester: &Requester,
        update: &UpdateOrderStatus,
    ) -> Result<OrderView, OrderError> {
        requester.require_admin()?;

        let order = self.retry_on_conflict("order status update", || {
            let orders = self.store.models::<Order>();
            let mut current = orders
                .get(order_id)?
                .ok_or_else(OrderError::order_not_found)?;
            update.apply(&mut current.data);
            current.data.touch(self.now());
            Ok(orders.update(&current.data, current.version)?.data)
        })?;

        info!(
            order_id = %order.id,
            order_status = ?order.order_status,
            payment_status = ?order.payment_status,
            "order updated"
        );
        self.view(order, ProductDetail::Id, false)
    }
}
