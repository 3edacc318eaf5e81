use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use derive_more::{Add, Sub};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Percentage, `0.0..=100.0` for the comparison statistics.
#[must_use]
#[repr(transparent)]
#[derive(Add, Clone, Copy, Default, Deserialize, Serialize, Sub)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    pub const ZERO: Self = Self(0.0);

    pub fn round_hundredths(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl PartialEq for Percent {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}
