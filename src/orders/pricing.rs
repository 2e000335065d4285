use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pricing rules applied once, when an order is placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fraction of the subtotal charged as tax (GST).
    pub tax_rate: Decimal,
    /// Subtotals strictly above this ship for free.
    pub free_shipping_threshold: Decimal,
    pub flat_shipping_fee: Decimal,
    pub delivery_estimate_days: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.18),
            free_shipping_threshold: dec!(1000),
            flat_shipping_fee: dec!(50),
            delivery_estimate_days: 7,
        }
    }
}

/// The price breakdown stored on an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pricing {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

impl PricingConfig {
    pub fn price(&self, subtotal: Decimal) -> Pricing {
        let tax = (subtotal * self.tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let shipping_cost = if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping_fee
        };
        Pricing {
            subtotal,
            tax,
            shipping_cost,
            total: subtotal + tax + shipping_cost,
        }
    }

    pub fn estimated_delivery(&self, placed_at: DateTime<Utc>) -> DateTime<Utc> {
        placed_at + Duration::days(i64::from(self.delivery_estimate_days))
    }
}
