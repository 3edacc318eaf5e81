#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod prelude;
mod quantity;
mod report;
mod source;
mod tables;
mod users;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Scrape(args) => cli::scrape(&args)?,
        Command::Compare(args) => cli::compare(&args)?,
        Command::Drops(args) => cli::drops(&args)?,
        Command::User(args) => cli::user(&args)?,
    }

    info!("done!");
    Ok(())
}
