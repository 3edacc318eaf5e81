use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    core::snapshot::{PriceSnapshot, StorePrices},
    quantity::{percent::Percent, price::Price},
};

/// The store offering the minimum price for a product.
#[must_use]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BestDeal {
    pub store: String,
    pub price: Price,
}

#[must_use]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStatistics {
    /// Arithmetic mean of all listed prices, rounded to whole cents.
    pub average_price: Price,

    /// Maximum listed price, unrounded.
    pub max_price: Price,

    /// Equals the best deal price.
    pub min_price: Price,

    /// `max_price − min_price`, rounded to whole cents.
    pub price_range: Price,

    /// Fraction of the maximum price saved by taking the best deal.
    ///
    /// Defined as zero when the maximum price is zero.
    pub savings_percentage: Percent,
}

/// Per-product comparison outcome: best deal, the original prices, and statistics.
#[must_use]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub best_deal: BestDeal,
    pub all_prices: StorePrices,
    pub statistics: PriceStatistics,
}

impl Comparison {
    /// Build the comparison for a single product, `None` for an empty price map.
    ///
    /// Ties at the minimum resolve to the first store in iteration order.
    fn from_store_prices(store_prices: &StorePrices) -> Option<Self> {
        let (best_store, best_price) = store_prices
            .iter()
            .min_by_key(|(_, price)| **price)
            .map(|(store, price)| (store.clone(), *price))?;
        let max_price = *store_prices.values().max()?;

        #[expect(clippy::cast_precision_loss)]
        let average_price =
            store_prices.values().copied().sum::<Price>().0 / store_prices.len() as f64;
        let price_range = max_price - best_price;
        let savings_percentage = if max_price > Price::ZERO {
            Percent(price_range.0 / max_price.0 * 100.0).round_hundredths()
        } else {
            Percent::ZERO
        };

        Some(Self {
            best_deal: BestDeal { store: best_store, price: best_price },
            all_prices: store_prices.clone(),
            statistics: PriceStatistics {
                average_price: Price(average_price).round_cents(),
                max_price,
                min_price: best_price,
                price_range: price_range.round_cents(),
                savings_percentage,
            },
        })
    }
}

/// Product → comparison outcome mapping.
pub type ComparisonSet = BTreeMap<String, Comparison>;

/// Compare prices for all products in the snapshot.
///
/// Products with an empty store-price mapping are silently excluded.
/// Pure function of the snapshot: no I/O, no error conditions.
pub fn compare(snapshot: &PriceSnapshot) -> ComparisonSet {
    snapshot
        .0
        .iter()
        .filter_map(|(product, store_prices)| {
            Comparison::from_store_prices(store_prices)
                .map(|comparison| (product.clone(), comparison))
        })
        .collect()
}

/// One product's best deal, as listed under its winning store.
#[must_use]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StoreDeal {
    pub product: String,
    pub price: Price,
}

/// Group the best deals by the store offering them.
///
/// Products within a store's list follow the iteration order of `results`.
pub fn best_deals_by_store(results: &ComparisonSet) -> BTreeMap<String, Vec<StoreDeal>> {
    let mut deals_by_store: BTreeMap<String, Vec<StoreDeal>> = BTreeMap::new();
    for (product, comparison) in results {
        deals_by_store.entry(comparison.best_deal.store.clone()).or_default().push(StoreDeal {
            product: product.clone(),
            price: comparison.best_deal.price,
        });
    }
    deals_by_store
}

/// Retain products whose best price falls within `[min_price, max_price]` inclusive.
pub fn filter_by_price_range(
    results: &ComparisonSet,
    min_price: Price,
    max_price: Price,
) -> ComparisonSet {
    results
        .iter()
        .filter(|(_, comparison)| {
            (min_price..=max_price).contains(&comparison.best_deal.price)
        })
        .map(|(product, comparison)| (product.clone(), comparison.clone()))
        .collect()
}
