mod compare;
mod drops;
mod scrape;
mod user;

use clap::{Parser, Subcommand};

pub use self::{
    compare::{CompareArgs, compare},
    drops::{DropsArgs, drops},
    scrape::{ScrapeArgs, scrape},
    user::{UserArgs, user},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect a price snapshot for the product catalog and save it.
    #[clap(name = "scrape")]
    Scrape(ScrapeArgs),

    /// Compare a saved snapshot and render or export the results.
    #[clap(name = "compare")]
    Compare(CompareArgs),

    /// Find price drops between two saved snapshots.
    #[clap(name = "drops")]
    Drops(DropsArgs),

    /// Manage user accounts and preferences.
    #[clap(name = "user")]
    User(UserArgs),
}
