//! One side of the book as a ranked, capped sequence of price levels.
//!
//! The ladder is a plain `Vec` kept sorted best-first and capped at the
//! venue's visibility horizon (100 levels). Each incoming level is placed by a
//! linear scan and a splice.

use crate::types::{Price, PriceLevel, Side, Size};

/// Default number of levels kept per side.
///
/// The venue checksums the first 100 levels, and levels below that rank are
/// never sent updates that would keep them accurate.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Result of scanning a ladder for an incoming price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A level with exactly this price exists at the index
    Existing(usize),
    /// No level with this price; it belongs before the level at the index
    Before(usize),
    /// No level with this price; it belongs after every existing level
    End,
}

/// Ranked price levels for one side of the book.
///
/// # Invariants
///
/// - Asks strictly ascending by price, bids strictly descending
/// - No two levels share a price
/// - No level has zero size
/// - At most `max_depth` levels after every [`Ladder::merge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    side: Side,
    levels: Vec<PriceLevel>,
    max_depth: usize,
}

impl Ladder {
    /// Create an empty ladder with the default depth
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self::with_max_depth(side, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty ladder that keeps at most `max_depth` levels
    #[must_use]
    pub fn with_max_depth(side: Side, max_depth: usize) -> Self {
        Self {
            side,
            // Room for one insert past the cap before truncation
            levels: Vec::with_capacity(max_depth + 1),
            max_depth,
        }
    }

    /// Which side this ladder holds
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Maximum number of levels kept
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Levels, best first
    #[must_use]
    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    /// Best level (lowest ask or highest bid)
    #[must_use]
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first()
    }

    /// Level at a rank (0 = best)
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&PriceLevel> {
        self.levels.get(rank)
    }

    /// Size resting at an exact price
    #[must_use]
    pub fn size_at(&self, price: &Price) -> Option<Size> {
        match self.find(price) {
            Slot::Existing(i) => Some(self.levels[i].size),
            _ => None,
        }
    }

    /// Number of levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the ladder has no levels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total size across all levels
    #[must_use]
    pub fn total_size(&self) -> Size {
        self.levels.iter().map(|l| l.size).sum()
    }

    /// Remove every level
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Merge a batch of level changes, in order, then truncate to `max_depth`.
    pub fn merge<'a, I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = &'a PriceLevel>,
    {
        for level in changes {
            self.merge_level(*level);
        }
        self.levels.truncate(self.max_depth);
    }

    /// Merge a single level change without truncating.
    ///
    /// Zero size removes the level at that price if one exists. Otherwise the
    /// existing level is overwritten in place (same rank), or the level is
    /// spliced in at its rank. An overwrite takes the incoming price's scale
    /// too, since that is what the venue formats into its checksum.
    pub fn merge_level(&mut self, level: PriceLevel) {
        let slot = self.find(&level.price);
        match (slot, level.is_removal()) {
            (Slot::Existing(i), true) => {
                self.levels.remove(i);
            }
            (Slot::Existing(i), false) => self.levels[i] = level,
            (Slot::Before(i), false) => self.levels.insert(i, level),
            (Slot::End, false) => self.levels.push(level),
            // Removal of a price we do not hold
            (Slot::Before(_) | Slot::End, true) => {}
        }
    }

    /// Scan best-first for `price`, stopping at the first exact match or the
    /// first level that ranks after it.
    fn find(&self, price: &Price) -> Slot {
        for (i, existing) in self.levels.iter().enumerate() {
            if existing.price == *price {
                return Slot::Existing(i);
            }
            if self.side.ranks_after(&existing.price, price) {
                return Slot::Before(i);
            }
        }
        Slot::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn lvl(p: &str, s: &str) -> PriceLevel {
        PriceLevel::new(Price::from_str(p).unwrap(), Size::from_str(s).unwrap())
    }

    fn prices(ladder: &Ladder) -> Vec<String> {
        ladder.levels().iter().map(|l| l.price.to_string()).collect()
    }

    #[test]
    fn test_asks_sorted_ascending() {
        let mut asks = Ladder::new(Side::Ask);
        asks.merge(&[lvl("102", "1"), lvl("100", "1"), lvl("101", "1")]);
        assert_eq!(prices(&asks), vec!["100", "101", "102"]);
        assert_eq!(asks.best(), Some(&lvl("100", "1")));
    }

    #[test]
    fn test_bids_sorted_descending() {
        let mut bids = Ladder::new(Side::Bid);
        bids.merge(&[lvl("99", "1"), lvl("101", "1"), lvl("100", "1")]);
        assert_eq!(prices(&bids), vec!["101", "100", "99"]);
    }

    #[test]
    fn test_update_in_place_keeps_rank() {
        let mut asks = Ladder::new(Side::Ask);
        asks.merge(&[lvl("100", "1"), lvl("101", "2"), lvl("102", "3")]);
        asks.merge(&[lvl("101", "7.5")]);

        assert_eq!(prices(&asks), vec!["100", "101", "102"]);
        assert_eq!(asks.get(1), Some(&lvl("101", "7.5")));
    }

    #[test]
    fn test_zero_size_removes_exactly_one_level() {
        let mut bids = Ladder::new(Side::Bid);
        bids.merge(&[lvl("101", "1"), lvl("100", "2"), lvl("99", "3")]);
        bids.merge(&[lvl("100", "0")]);

        assert_eq!(prices(&bids), vec!["101", "99"]);
        assert_eq!(bids.size_at(&Price::from_str("100").unwrap()), None);
    }

    #[test]
    fn test_zero_size_for_absent_price_is_noop() {
        let mut asks = Ladder::new(Side::Ask);
        asks.merge(&[lvl("100", "1"), lvl("102", "1")]);
        let before = asks.clone();

        // Between two levels, below the best, and past the worst
        asks.merge(&[lvl("101", "0"), lvl("99", "0"), lvl("200", "0")]);
        assert_eq!(asks, before);

        let mut empty = Ladder::new(Side::Bid);
        empty.merge(&[lvl("100", "0")]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_price_match_ignores_scale() {
        let mut asks = Ladder::new(Side::Ask);
        asks.merge(&[lvl("100", "1")]);
        asks.merge(&[lvl("100.00", "4")]);

        assert_eq!(asks.len(), 1);
        assert_eq!(asks.best().unwrap().size, Size::from_str("4").unwrap());
        assert_eq!(asks.best().unwrap().price.scale(), 2);
    }

    #[test]
    fn test_duplicate_prices_within_one_delta() {
        let mut bids = Ladder::new(Side::Bid);
        bids.merge(&[lvl("100", "1"), lvl("100", "2"), lvl("100", "0"), lvl("100", "3")]);

        assert_eq!(bids.len(), 1);
        assert_eq!(bids.best(), Some(&lvl("100", "3")));
    }

    #[test]
    fn test_truncates_to_max_depth() {
        let mut asks = Ladder::new(Side::Ask);
        let levels: Vec<_> = (0..150).rev().map(|i| lvl(&i.to_string(), "1")).collect();
        asks.merge(&levels);

        assert_eq!(asks.len(), DEFAULT_MAX_DEPTH);
        assert_eq!(asks.best().unwrap().price, Price::from(0));
        assert_eq!(asks.get(99).unwrap().price, Price::from(99));
    }

    #[test]
    fn test_custom_depth() {
        let mut bids = Ladder::with_max_depth(Side::Bid, 2);
        bids.merge(&[lvl("1", "1"), lvl("2", "1"), lvl("3", "1")]);
        assert_eq!(prices(&bids), vec!["3", "2"]);
    }

    #[test]
    fn test_total_size() {
        let mut asks = Ladder::new(Side::Ask);
        asks.merge(&[lvl("1", "0.25"), lvl("2", "0.5")]);
        assert_eq!(asks.total_size(), Size::from_str("0.75").unwrap());
    }
}
