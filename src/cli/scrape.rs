use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::snapshot::{PriceSnapshot, SavedSnapshot, load_catalog},
    prelude::*,
    source::mock::MockSource,
};

#[derive(Parser)]
pub struct ScrapeArgs {
    /// Product catalog: a JSON array of `{ "name", "stores" }` entries.
    #[clap(long, env = "MAGPIE_CATALOG", default_value = "products.json")]
    pub catalog: PathBuf,

    /// Where to save the timestamped snapshot.
    #[clap(long, env = "MAGPIE_SNAPSHOT", default_value = "prices.json")]
    pub output: PathBuf,

    /// Fixed seed for the mock source, for reproducible snapshots.
    #[clap(long, env = "MAGPIE_SEED")]
    pub seed: Option<u64>,
}

#[instrument(skip_all)]
pub fn scrape(args: &ScrapeArgs) -> Result {
    let catalog = load_catalog(&args.catalog)?;
    ensure!(!catalog.is_empty(), "the catalog is empty, nothing to collect");

    let mut source = MockSource::builder().maybe_seed(args.seed).build();
    let snapshot = PriceSnapshot::collect(&mut source, &catalog);
    ensure!(!snapshot.0.is_empty(), "no prices found for the catalog");
    info!(n_products = snapshot.0.len(), "collected");

    let saved = SavedSnapshot::new(snapshot);
    saved.write_to(&args.output)?;
    info!(path = %args.output.display(), timestamp = %saved.timestamp, "saved");
    Ok(())
}
