//! Read side: single lookup, the requester's own orders, and the admin
//! listing with filters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::OrderError;
use super::order::{Order, OrderStatus, PaymentStatus};
use super::service::{OrderService, Requester};
use super::view::{OrderPage, OrderView, ProductDetail};
use crate::model::{ModelStore, ModelsExt};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyOrdersQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrdersQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC), inclusive.
    #[serde(default)]
    pub start_date: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC), inclusive.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Case-insensitive substring of the order number.
    #[serde(default)]
    pub order_number: Option<String>,
}

/// Normalised page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Paging {
    page: usize,
    limit: usize,
}

impl Paging {
    fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Paging {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl<S: ModelStore> OrderService<S> {
    /// Fetch one order. Visible to its owner and to admins.
    pub fn get(&self, order_id: &str, requester: &Requester) -> Result<OrderView, OrderError> {
        let order = self
            .store
            .models::<Order>()
            .get(order_id)?
            .ok_or_else(OrderError::order_not_found)?
            .data;

        if !order.is_owned_by(&requester.user_id) && !requester.is_admin() {
            return Err(OrderError::access_denied());
        }
        self.view(order, ProductDetail::Full, true)
    }

    /// The requester's orders, newest first.
    pub fn list_mine(
        &self,
        requester: &Requester,
        query: &MyOrdersQuery,
    ) -> Result<OrderPage, OrderError> {
        let user_id = requester.user_id.as_str();
        let status = query.status;
        let orders = self.store.models::<Order>().find(&|order: &Order| {
            order.is_owned_by(user_id) && status.map_or(true, |s| order.order_status == s)
        })?;

        self.page(
            orders.into_iter().map(|v| v.data).collect(),
            Paging::new(query.page, query.limit),
            false,
        )
    }

    /// Every order matching the filters, newest first. Admin only.
    #[instrument(skip(self, requester), fields(admin = %requester.user_id))]
    pub fn list_all(
        &self,
        requester: &Requester,
        query: &AdminOrdersQuery,
    ) -> Result<OrderPage, OrderError> {
        requester.require_admin()?;

        let start = query.start_date.as_deref().map(parse_bound).transpose()?;
        let end = query.end_date.as_deref().map(parse_bound).transpose()?;
        let needle = query
            .order_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase);

        let orders = self.store.models::<Order>().find(&|order: &Order| {
            query.status.map_or(true, |s| order.order_status == s)
                && query.payment_status.map_or(true, |s| order.payment_status == s)
                && start.map_or(true, |start| order.created_at >= start)
                && end.map_or(true, |end| order.created_at <= end)
                && needle
                    .as_deref()
                    .map_or(true, |n| order.order_number.to_lowercase().contains(n))
        })?;

        self.page(
            orders.into_iter().map(|v| v.data).collect(),
            Paging::new(query.page, query.limit),
            true,
        )
    }

    fn page(
        &self,
        mut orders: Vec<Order>,
        paging: Paging,
        with_owner: bool,
    ) -> Result<OrderPage, OrderError> {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = orders.len();

        let views = orders
            .into_iter()
            .skip((paging.page - 1).saturating_mul(paging.limit))
            .take(paging.limit)
            .map(|order| self.view(order, ProductDetail::Summary, with_owner))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderPage {
            orders: views,
            total_pages: total.div_ceil(paging.limit),
            current_page: paging.page,
            total,
        })
    }
}

fn parse_bound(raw: &str) -> Result<DateTime<Utc>, OrderError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| OrderError::InvalidRequest(format!("Invalid date: {}", raw)))
}
