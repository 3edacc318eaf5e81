use std::{fs, path::PathBuf};

use clap::{Parser, ValueEnum};

use crate::{
    core::{
        comparison::{self, ComparisonSet, best_deals_by_store, filter_by_price_range},
        snapshot::SavedSnapshot,
    },
    prelude::*,
    quantity::price::Price,
    report,
    tables::{build_comparison_table, build_deals_by_store_table},
};

#[derive(Parser)]
pub struct CompareArgs {
    /// Saved snapshot to compare.
    #[clap(long, env = "MAGPIE_SNAPSHOT", default_value = "prices.json")]
    pub snapshot: PathBuf,

    /// Keep only products whose best price is at or above this.
    #[clap(long = "min-price")]
    pub min_price: Option<Price>,

    /// Keep only products whose best price is at or below this.
    #[clap(long = "max-price")]
    pub max_price: Option<Price>,

    /// Group the best deals by store instead of listing per product.
    #[clap(long = "by-store")]
    pub by_store: bool,

    /// Export format; prints a table when omitted.
    #[clap(long, value_enum)]
    pub report: Option<ReportFormat>,

    /// Report output file, stdout when omitted.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
}

#[instrument(skip_all)]
pub fn compare(args: &CompareArgs) -> Result {
    let saved = SavedSnapshot::read_from(&args.snapshot)?;
    info!(timestamp = %saved.timestamp, "loaded the snapshot");

    let mut results = comparison::compare(&saved.prices);
    if args.min_price.is_some() || args.max_price.is_some() {
        results = filter_by_price_range(
            &results,
            args.min_price.unwrap_or(Price::ZERO),
            args.max_price.unwrap_or(Price(f64::INFINITY)),
        );
        info!(n_products = results.len(), "filtered by price range");
    }

    match args.report {
        Some(format) => export(&results, format, args.output.as_deref()),
        None if args.by_store => {
            println!("{}", build_deals_by_store_table(&best_deals_by_store(&results)));
            Ok(())
        }
        None => {
            println!("{}", build_comparison_table(&results));
            Ok(())
        }
    }
}

fn export(
    results: &ComparisonSet,
    format: ReportFormat,
    output: Option<&std::path::Path>,
) -> Result {
    let rendered = match format {
        ReportFormat::Text => report::text(results),
        ReportFormat::Csv => report::csv(results),
        ReportFormat::Json => report::json(results)?,
    };
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write the report to `{}`", path.display()))?;
            info!(path = %path.display(), "exported");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
