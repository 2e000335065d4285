use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use super::error::OrderError;
use super::order::{Order, OrderStatus};
use super::service::{OrderService, Requester};
use super::view::OrderStats;
use crate::model::{ModelStore, ModelsExt};

impl<S: ModelStore> OrderService<S> {
    /// Dashboard counters. Revenue covers this calendar month (UTC) and
    /// leaves out cancelled orders; the monthly count includes them.
    #[instrument(skip_all, fields(admin = %requester.user_id))]
    pub fn stats(&self, requester: &Requester) -> Result<OrderStats, OrderError> {
        requester.require_admin()?;

        let month_start = start_of_month(self.now());
        let orders = self.store.models::<Order>().find(&|_| true)?;

        let mut stats = OrderStats {
            total_orders: orders.len(),
            pending_orders: 0,
            completed_orders: 0,
            monthly_revenue: Decimal::ZERO,
            monthly_orders: 0,
        };

        for order in orders.iter().map(|v| &v.data) {
            match order.order_status {
                OrderStatus::Pending => stats.pending_orders += 1,
                OrderStatus::Delivered => stats.completed_orders += 1,
                _ => {}
            }
            if order.created_at >= month_start {
                stats.monthly_orders += 1;
                if order.order_status != OrderStatus::Cancelled {
                    stats.monthly_revenue += order.total_amount;
                }
            }
        }

        Ok(stats)
    }
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|first| first.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}
