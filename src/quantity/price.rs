use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    iter::Sum,
};

use derive_more::{Add, AddAssign, FromStr, Sub, SubAssign};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Price in dollars.
#[must_use]
#[repr(transparent)]
#[derive(
    Add, AddAssign, Clone, Copy, Default, Deserialize, FromStr, Serialize, Sub, SubAssign,
)]
#[serde(transparent)]
pub struct Price(pub f64);

impl Price {
    pub const ZERO: Self = Self(0.0);

    /// Round to whole cents.
    pub fn round_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Debug for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|price| price.0).sum())
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_ok() {
        assert_eq!(Price(886.663_333).round_cents(), Price(886.66));
        assert_eq!(Price(7.142_857).round_cents(), Price(7.14));
    }

    #[test]
    fn display_ok() {
        assert_eq!(Price(850.0).to_string(), "$850.00");
    }
}
