//! Response shapes: orders with product and owner references resolved.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::{Order, OrderLine, OrderStatus, PaymentMethod, PaymentStatus, ShippingAddress};
use crate::catalog::{Category, Product};
use crate::customer::Customer;

/// How much of each line's product to resolve from the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductDetail {
    /// Product id only.
    Id,
    /// Current name and image.
    Summary,
    /// Name, image, category and brand.
    Full,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ProductRef {
    /// Resolve against the current product, falling back to the line's
    /// snapshot when the product has since been removed.
    pub(crate) fn resolve(line: &OrderLine, product: Option<&Product>, detail: ProductDetail) -> Self {
        let mut reference = ProductRef {
            id: line.product.clone(),
            name: None,
            image: None,
            category: None,
            brand: None,
        };
        if detail == ProductDetail::Id {
            return reference;
        }
        match product {
            Some(product) => {
                reference.name = Some(product.name.clone());
                reference.image = Some(product.image.clone());
                if detail == ProductDetail::Full {
                    reference.category = Some(product.category);
                    reference.brand = Some(product.brand.clone());
                }
            }
            None => {
                reference.name = Some(line.name.clone());
                reference.image = Some(line.image.clone());
            }
        }
        reference
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineView {
    pub product: ProductRef,
    pub quantity: u32,
    pub price: Decimal,
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl OwnerRef {
    pub(crate) fn resolve(user_id: &str, customer: Option<&Customer>) -> Self {
        OwnerRef {
            id: user_id.to_string(),
            first_name: customer.map(|c| c.first_name.clone()),
            last_name: customer.map(|c| c.last_name.clone()),
            email: customer.map(|c| c.email.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub order_number: String,
    pub user: OwnerRef,
    pub items: Vec<LineView>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub estimated_delivery: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderView {
    pub(crate) fn new(order: Order, user: OwnerRef, products: Vec<ProductRef>) -> Self {
        let items = order
            .items
            .into_iter()
            .zip(products)
            .map(|(line, product)| LineView {
                product,
                quantity: line.quantity,
                price: line.price,
                name: line.name,
                image: line.image,
            })
            .collect();

        OrderView {
            id: order.id,
            order_number: order.order_number,
            user,
            items,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            order_status: order.order_status,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping_cost: order.shipping_cost,
            total_amount: order.total_amount,
            notes: order.notes,
            tracking_number: order.tracking_number,
            estimated_delivery: order.estimated_delivery,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// One page of orders, newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<OrderView>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub monthly_revenue: Decimal,
    pub monthly_orders: usize,
}
