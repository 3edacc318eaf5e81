use std::{collections::BTreeMap, fs, path::Path};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, quantity::price::Price, source::PriceSource};

/// Store name to price mapping for a single product.
pub type StorePrices = BTreeMap<String, Price>;

/// Point-in-time capture of product → store → price data.
///
/// Immutable input to the comparison engine, assembled once per collection cycle.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PriceSnapshot(pub BTreeMap<String, StorePrices>);

impl PriceSnapshot {
    /// Collect prices for the catalog from the source.
    ///
    /// Products for which no store returned a price are left out of the snapshot.
    #[instrument(skip_all, fields(n_products = catalog.len()))]
    pub fn collect<S: PriceSource + ?Sized>(source: &mut S, catalog: &[CatalogEntry]) -> Self {
        let mut prices = BTreeMap::new();
        for entry in catalog {
            let store_prices: StorePrices = entry
                .stores
                .iter()
                .filter_map(|store| {
                    source.price(&entry.name, store).map(|price| (store.clone(), price))
                })
                .collect();
            if store_prices.is_empty() {
                warn!(product = %entry.name, "no prices found");
            } else {
                debug!(product = %entry.name, n_stores = store_prices.len(), "collected");
                prices.insert(entry.name.clone(), store_prices);
            }
        }
        Self(prices)
    }
}

/// Catalog entry: a product and the stores to query for it.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub name: String,

    #[serde(default)]
    pub stores: Vec<String>,
}

/// Load the product catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read the catalog from `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse the catalog from `{}`", path.display()))
}

/// Snapshot wrapped with its collection timestamp for persistence.
///
/// The timestamp is display-only, the engine never consumes it.
#[must_use]
#[derive(Deserialize, Serialize)]
pub struct SavedSnapshot {
    pub timestamp: DateTime<Local>,
    pub prices: PriceSnapshot,
}

impl SavedSnapshot {
    pub fn new(prices: PriceSnapshot) -> Self {
        Self { timestamp: Local::now(), prices }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the snapshot from `{}`", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse the snapshot from `{}`", path.display()))
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write the snapshot to `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::MockSource;

    #[test]
    fn collect_skips_unknown_products() {
        let mut source = MockSource::builder().seed(42).build();
        let catalog = vec![
            CatalogEntry { name: "Laptop".to_string(), stores: vec!["Amazon".to_string()] },
            CatalogEntry { name: "Flux Capacitor".to_string(), stores: vec!["Amazon".to_string()] },
        ];
        let snapshot = PriceSnapshot::collect(&mut source, &catalog);
        assert!(snapshot.0.contains_key("Laptop"));
        assert!(!snapshot.0.contains_key("Flux Capacitor"));
    }

    #[test]
    fn saved_snapshot_round_trip() -> Result {
        let mut prices = BTreeMap::new();
        prices.insert(
            "Laptop".to_string(),
            BTreeMap::from([("Walmart".to_string(), Price(850.0))]),
        );
        let saved = SavedSnapshot::new(PriceSnapshot(prices));

        let file = tempfile::NamedTempFile::new()?;
        saved.write_to(file.path())?;
        let loaded = SavedSnapshot::read_from(file.path())?;
        assert_eq!(loaded.prices.0["Laptop"]["Walmart"], Price(850.0));
        Ok(())
    }
}
