use std::path::PathBuf;

use clap::Parser;

use crate::{
    core::{comparison::compare, drops::find_price_drops, snapshot::SavedSnapshot},
    prelude::*,
    tables::build_drops_table,
};

#[derive(Parser)]
pub struct DropsArgs {
    /// Earlier snapshot.
    pub old: PathBuf,

    /// Later snapshot.
    pub new: PathBuf,
}

#[instrument(skip_all)]
pub fn drops(args: &DropsArgs) -> Result {
    let old_snapshot = SavedSnapshot::read_from(&args.old)?;
    let new_snapshot = SavedSnapshot::read_from(&args.new)?;
    ensure!(
        old_snapshot.timestamp <= new_snapshot.timestamp,
        "`{}` is newer than `{}`, swap the arguments",
        args.old.display(),
        args.new.display(),
    );

    let drops =
        find_price_drops(&compare(&old_snapshot.prices), &compare(&new_snapshot.prices));
    if drops.is_empty() {
        info!("no price drops");
    } else {
        println!("{}", build_drops_table(&drops));
    }
    Ok(())
}
