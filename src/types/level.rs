//! Price levels and book sides.

use serde::{Deserialize, Serialize};

use super::{Price, Size};

/// Side of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sell side, best (lowest) price first
    Ask,
    /// Buy side, best (highest) price first
    Bid,
}

impl Side {
    /// Ranking direction: `+1` for ascending asks, `-1` for descending bids
    pub const fn direction(self) -> i8 {
        match self {
            Side::Ask => 1,
            Side::Bid => -1,
        }
    }

    /// Returns `true` if a level at `existing` must rank after a level at `incoming`.
    ///
    /// This is the ordering break the merge scan stops at: for asks an
    /// existing higher price, for bids an existing lower price.
    #[inline]
    pub fn ranks_after(self, existing: &Price, incoming: &Price) -> bool {
        existing.cmp(incoming) as i8 == self.direction()
    }
}

/// Aggregate resting size at a single price.
///
/// On the wire a level is a two-element array `[price, size]`. Anything else
/// fails deserialization, so a level that reaches the book is always whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Price, Size)", into = "(Price, Size)")]
pub struct PriceLevel {
    /// Level price
    pub price: Price,
    /// Total size at the price; zero on a delta removes the level
    pub size: Size,
}

impl PriceLevel {
    /// Create a new price level
    pub const fn new(price: Price, size: Size) -> Self {
        Self { price, size }
    }

    /// Returns `true` if this level is a removal marker
    #[inline]
    pub fn is_removal(&self) -> bool {
        self.size.is_zero()
    }
}

impl From<(Price, Size)> for PriceLevel {
    fn from((price, size): (Price, Size)) -> Self {
        Self { price, size }
    }
}

impl From<PriceLevel> for (Price, Size) {
    fn from(level: PriceLevel) -> Self {
        (level.price, level.size)
    }
}
