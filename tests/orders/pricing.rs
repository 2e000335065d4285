use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront::orders::PricingConfig;

proptest! {
    #[test]
    fn totals_add_up(cents in 0i64..10_000_000) {
        let subtotal = Decimal::new(cents, 2);
        let pricing = PricingConfig::default().price(subtotal);

        prop_assert_eq!(pricing.total, subtotal + pricing.tax + pricing.shipping_cost);
        prop_assert!(pricing.tax.scale() <= 2);
        prop_assert!(pricing.tax >= Decimal::ZERO);
        prop_assert!((pricing.tax - subtotal * dec!(0.18)).abs() <= dec!(0.005));
    }

    #[test]
    fn shipping_is_free_only_above_threshold(cents in 0i64..300_000) {
        let subtotal = Decimal::new(cents, 2);
        let pricing = PricingConfig::default().price(subtotal);

        if subtotal > dec!(1000) {
            prop_assert_eq!(pricing.shipping_cost, Decimal::ZERO);
        } else {
            prop_assert_eq!(pricing.shipping_cost, dec!(50));
        }
    }
}
