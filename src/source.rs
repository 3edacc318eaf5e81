pub mod mock;

use crate::quantity::price::Price;

/// Supplies a price for a `(product, store)` pair.
///
/// The comparison engine never depends on which implementation assembled the
/// snapshot: a real scraper and the mock generator are interchangeable here.
pub trait PriceSource {
    /// Current price of the product at the store, `None` when unavailable.
    fn price(&mut self, product: &str, store: &str) -> Option<Price>;

    /// Whether the store is known to this source.
    fn is_store_available(&self, store: &str) -> bool;
}
