use std::collections::BTreeMap;

use bon::bon;

use crate::{quantity::price::Price, source::PriceSource};

/// Relative price level of a store against the catalog base price.
#[must_use]
#[derive(Copy, Clone)]
pub struct StoreProfile {
    pub variance: f64,
}

/// Mock price generator standing in for a real scraper.
///
/// Produces a base catalog price scaled by the store's variance and a ±10 %
/// random fluctuation, rounded to whole cents.
#[must_use]
pub struct MockSource {
    stores: BTreeMap<String, StoreProfile>,
    rng: fastrand::Rng,
}

#[bon]
impl MockSource {
    #[builder]
    pub fn new(seed: Option<u64>) -> Self {
        let stores = [
            ("Amazon", 1.2),
            ("Walmart", 1.0),
            ("Best Buy", 1.1),
            ("Target", 0.95),
            ("eBay", 1.15),
        ]
        .into_iter()
        .map(|(name, variance)| (name.to_string(), StoreProfile { variance }))
        .collect();
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { stores, rng }
    }
}

impl MockSource {
    /// Base prices keyed by a product name fragment.
    const BASE_PRICES: [(&'static str, f64); 7] = [
        ("laptop", 899.99),
        ("smartphone", 699.99),
        ("headphones", 199.99),
        ("usb cable", 9.99),
        ("keyboard", 79.99),
        ("monitor", 299.99),
        ("mouse", 29.99),
    ];

    pub fn add_store(&mut self, name: &str, variance: f64) {
        self.stores.insert(name.to_string(), StoreProfile { variance });
    }

    fn base_price(product: &str) -> Option<Price> {
        let product = product.to_lowercase();
        Self::BASE_PRICES
            .iter()
            .find(|(fragment, _)| product.contains(fragment))
            .map(|(_, price)| Price(*price))
    }
}

impl PriceSource for MockSource {
    fn price(&mut self, product: &str, store: &str) -> Option<Price> {
        let base_price = Self::base_price(product)?;
        // Unlisted stores fall back to the neutral variance.
        let variance = self.stores.get(store).map_or(1.0, |profile| profile.variance);
        let fluctuation = 0.9 + self.rng.f64() * 0.2;
        Some(Price(base_price.0 * variance * fluctuation).round_cents())
    }

    fn is_store_available(&self, store: &str) -> bool {
        self.stores.contains_key(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_stays_within_fluctuation_bounds() {
        let mut source = MockSource::builder().seed(1).build();
        for _ in 0..100 {
            let price = source.price("Gaming Laptop", "Walmart").unwrap();
            // Half a cent of slack for the rounding.
            assert!(price >= Price(899.99 * 0.9 - 0.005));
            assert!(price <= Price(899.99 * 1.1 + 0.005));
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut first = MockSource::builder().seed(7).build();
        let mut second = MockSource::builder().seed(7).build();
        assert_eq!(first.price("Monitor", "eBay"), second.price("Monitor", "eBay"));
    }

    #[test]
    fn unknown_product_is_unavailable() {
        let mut source = MockSource::builder().seed(1).build();
        assert_eq!(source.price("Time Machine", "Amazon"), None);
    }

    #[test]
    fn custom_store_is_available_after_adding() {
        let mut source = MockSource::builder().build();
        assert!(!source.is_store_available("Newegg"));
        source.add_store("Newegg", 1.05);
        assert!(source.is_store_available("Newegg"));
        assert!(source.price("Keyboard", "Newegg").is_some());
    }
}
