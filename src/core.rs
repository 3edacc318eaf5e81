pub mod comparison;
pub mod drops;
pub mod snapshot;
