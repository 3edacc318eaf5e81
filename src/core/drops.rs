use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    core::comparison::ComparisonSet,
    quantity::{percent::Percent, price::Price},
};

/// Decrease of a product's best price between two snapshots.
#[must_use]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDrop {
    pub old_price: Price,
    pub new_price: Price,
    pub drop_amount: Price,
    pub drop_percentage: Percent,
}

/// Find products whose best price strictly dropped between two comparison runs.
///
/// Products present in only one of the result sets are excluded, as are products
/// whose new best price is equal to or above the old one. A zero old price cannot
/// produce a meaningful percentage and reports no drop.
pub fn find_price_drops(
    old_results: &ComparisonSet,
    new_results: &ComparisonSet,
) -> BTreeMap<String, PriceDrop> {
    let mut drops = BTreeMap::new();
    for (product, new_comparison) in new_results {
        let Some(old_comparison) = old_results.get(product) else {
            continue;
        };
        let old_price = old_comparison.best_deal.price;
        let new_price = new_comparison.best_deal.price;
        if new_price >= old_price || old_price <= Price::ZERO {
            continue;
        }
        let drop_amount = old_price - new_price;
        drops.insert(
            product.clone(),
            PriceDrop {
                old_price,
                new_price,
                drop_amount: drop_amount.round_cents(),
                drop_percentage: Percent(drop_amount.0 / old_price.0 * 100.0).round_hundredths(),
            },
        );
    }
    drops
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{comparison::compare, snapshot::PriceSnapshot};

    fn results_for(product: &str, price: Price) -> ComparisonSet {
        let snapshot = PriceSnapshot(BTreeMap::from([(
            product.to_string(),
            BTreeMap::from([("Amazon".to_string(), price)]),
        )]));
        compare(&snapshot)
    }

    #[test]
    fn drop_is_reported_with_amount_and_percentage() {
        let drops =
            find_price_drops(&results_for("Phone", Price(700.0)), &results_for("Phone", Price(650.0)));
        let drop = &drops["Phone"];
        assert_eq!(drop.old_price, Price(700.0));
        assert_eq!(drop.new_price, Price(650.0));
        assert_abs_diff_eq!(drop.drop_amount.0, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(drop.drop_percentage.0, 7.14, epsilon = 1e-9);
    }

    #[test]
    fn equal_or_higher_price_is_not_a_drop() {
        let old_results = results_for("Phone", Price(700.0));
        assert!(find_price_drops(&old_results, &results_for("Phone", Price(700.0))).is_empty());
        assert!(find_price_drops(&old_results, &results_for("Phone", Price(750.0))).is_empty());
    }

    #[test]
    fn products_in_only_one_snapshot_are_excluded() {
        let drops =
            find_price_drops(&results_for("Phone", Price(700.0)), &results_for("Tablet", Price(650.0)));
        assert!(drops.is_empty());
    }

    #[test]
    fn zero_old_price_reports_no_drop() {
        // Prices are non-negative, so a strict drop below zero cannot happen anyway;
        // the guard keeps the percentage division well-defined.
        let drops =
            find_price_drops(&results_for("Phone", Price::ZERO), &results_for("Phone", Price::ZERO));
        assert!(drops.is_empty());
    }
}
