//! Order placement: validate stock, price the cart, and commit the order
//! together with every stock decrement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::error::OrderError;
use super::order::{NewOrder, Order, OrderLine, PaymentMethod, ShippingAddress};
use super::service::OrderService;
use super::view::{OrderView, ProductDetail};
use crate::catalog::Product;
use crate::model::{ModelStore, ModelsExt, Versioned};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub items: Vec<CartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

impl<S: ModelStore> OrderService<S> {
    /// Place an order for `user_id`.
    ///
    /// Either the order is stored and every line's stock is decremented, or
    /// nothing changes. Products modified concurrently cause the whole
    /// placement to be re-validated against fresh stock.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub fn place(&self, user_id: &str, request: &PlaceOrder) -> Result<OrderView, OrderError> {
        validate(request)?;
        let order = self.retry_on_conflict("order placement", || self.try_place(user_id, request))?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            "order placed"
        );
        self.view(order, ProductDetail::Summary, false)
    }

    fn try_place(&self, user_id: &str, request: &PlaceOrder) -> Result<Order, OrderError> {
        let now = self.now();
        let products = self.store.models::<Product>();

        // Each product read once, in first-seen order, with the version the
        // batch commit is conditioned on.
        let mut touched: Vec<Versioned<Product>> = Vec::new();
        let mut lines = Vec::with_capacity(request.items.len());
        let mut subtotal = Decimal::ZERO;

        for item in &request.items {
            let index = match touched.iter().position(|p| p.data.id == item.product_id) {
                Some(index) => index,
                None => {
                    let product = products
                        .get(&item.product_id)?
                        .ok_or_else(|| OrderError::product_not_found(&item.product_id))?;
                    touched.push(product);
                    touched.len() - 1
                }
            };

            let product = &mut touched[index].data;
            if !product.take_stock(item.quantity, now) {
                return Err(OrderError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                });
            }

            let line = OrderLine {
                product: product.id.clone(),
                quantity: item.quantity,
                price: product.price,
                name: product.name.clone(),
                image: product.image.clone(),
            };
            subtotal += line.line_total();
            lines.push(line);
        }

        let order = Order::open(
            NewOrder {
                user: user_id.to_string(),
                items: lines,
                shipping_address: request.shipping_address.clone(),
                payment_method: request.payment_method,
                pricing: self.pricing.price(subtotal),
                notes: request.notes.clone(),
                estimated_delivery: self.pricing.estimated_delivery(now),
            },
            now,
        );

        touched
            .iter()
            .fold(self.store.batch(), |batch, product| {
                batch.update(&product.data, product.version)
            })
            .insert(&order)
            .commit()?;

        Ok(order)
    }
}

fn validate(request: &PlaceOrder) -> Result<(), OrderError> {
    if request.items.is_empty() {
        return Err(OrderError::InvalidRequest(
            "Order must contain at least one item".into(),
        ));
    }
    if let Some(line) = request.items.iter().find(|line| line.quantity == 0) {
        return Err(OrderError::InvalidRequest(format!(
            "Quantity for product {} must be at least 1",
            line.product_id
        )));
    }
    Ok(())
}
