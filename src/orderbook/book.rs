//! Core order book replica.
//!
//! The replica keeps both ladders of a single market and re-derives the
//! venue checksum after every applied delta. It never decides whether the
//! book is trustworthy; it only reports the checksum its state produces.

use tracing::debug;

use super::checksum;
use super::ladder::{Ladder, DEFAULT_MAX_DEPTH};
use crate::types::{BookDelta, Checksum, Price, PriceLevel, Side, Size};

/// Replica of one market's top of book.
///
/// # Design Decisions
///
/// 1. **Exact decimals**: Prices and sizes are `rust_decimal::Decimal`. The
///    checksum hashes their text, so floats are not an option.
///
/// 2. **Sorted `Vec` ladders**: Depth is capped at 100, so a linear scan and
///    splice beats a tree and keeps ranks directly indexable for the checksum.
///
/// 3. **No sequence tracking**: The venue guarantees ordered delivery per
///    market. Applying deltas out of order yields a wrong book that only the
///    checksum comparison will catch.
///
/// # States
///
/// A replica is *uninitialized* until the first [`apply`](Self::apply) and
/// *synced* afterwards. [`clear`](Self::clear) returns it to uninitialized.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` but not internally synchronized. For
/// concurrent access, wrap in `parking_lot::RwLock` or use
/// [`OrderbookManager`](super::OrderbookManager).
#[derive(Debug, Clone)]
pub struct OrderbookReplica {
    /// Market name
    market: String,

    /// Ask levels, lowest price first
    asks: Ladder,

    /// Bid levels, highest price first
    bids: Ladder,

    /// Checksum of the current state
    checksum: Checksum,

    /// Number of deltas applied since creation or the last clear
    updates: u64,
}

impl OrderbookReplica {
    /// Create a new empty replica for the given market
    #[must_use]
    pub fn new(market: impl Into<String>) -> Self {
        Self::with_max_depth(market, DEFAULT_MAX_DEPTH)
    }

    /// Create a new empty replica that keeps `max_depth` levels per side
    #[must_use]
    pub fn with_max_depth(market: impl Into<String>, max_depth: usize) -> Self {
        Self {
            market: market.into(),
            asks: Ladder::with_max_depth(Side::Ask, max_depth),
            bids: Ladder::with_max_depth(Side::Bid, max_depth),
            checksum: 0,
            updates: 0,
        }
    }

    /// Get the market name
    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Apply a delta and return the checksum of the resulting book.
    ///
    /// Each side is merged independently, level by level in message order,
    /// then truncated to the maximum depth. The checksum covers the state
    /// after the whole delta. A snapshot is applied the same way, normally
    /// onto an empty replica.
    pub fn apply(&mut self, delta: &BookDelta) -> Checksum {
        self.asks.merge(&delta.asks);
        self.bids.merge(&delta.bids);
        self.updates += 1;
        self.checksum = checksum::compute(self.bids.levels(), self.asks.levels());

        debug!(
            market = %self.market,
            asks = self.asks.len(),
            bids = self.bids.len(),
            checksum = self.checksum,
            "applied book delta"
        );

        self.checksum
    }

    /// Replace the book with a snapshot and return its checksum
    pub fn apply_snapshot(&mut self, snapshot: &BookDelta) -> Checksum {
        self.clear();
        self.apply(snapshot)
    }

    /// Checksum of the current state (0 before the first apply)
    #[must_use]
    pub const fn checksum(&self) -> Checksum {
        self.checksum
    }

    /// The exact string the checksum is computed over
    #[must_use]
    pub fn checksum_string(&self) -> String {
        checksum::input_string(self.bids.levels(), self.asks.levels())
    }

    /// Number of deltas applied since creation or the last clear
    #[must_use]
    pub const fn updates(&self) -> u64 {
        self.updates
    }

    /// Returns `true` once at least one delta has been applied
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.updates > 0
    }

    /// Get the best bid (highest bid)
    #[must_use]
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.best().copied()
    }

    /// Get the best ask (lowest ask)
    #[must_use]
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.best().copied()
    }

    /// Get the mid price
    ///
    /// Returns the average of best bid and best ask, or `None` if either is missing.
    #[must_use]
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / Price::TWO),
            _ => None,
        }
    }

    /// Get the spread (best ask minus best bid)
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Check if the book is crossed (best bid >= best ask)
    ///
    /// The venue never publishes a crossed book, so this indicates a bad replica.
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Bid ladder
    #[must_use]
    pub fn bid_ladder(&self) -> &Ladder {
        &self.bids
    }

    /// Ask ladder
    #[must_use]
    pub fn ask_ladder(&self) -> &Ladder {
        &self.asks
    }

    /// All bid levels, sorted by price descending (best first)
    #[must_use]
    pub fn bids(&self) -> &[PriceLevel] {
        self.bids.levels()
    }

    /// All ask levels, sorted by price ascending (best first)
    #[must_use]
    pub fn asks(&self) -> &[PriceLevel] {
        self.asks.levels()
    }

    /// Get the top N bid levels
    #[must_use]
    pub fn top_bids(&self, n: usize) -> &[PriceLevel] {
        let levels = self.bids.levels();
        &levels[..n.min(levels.len())]
    }

    /// Get the top N ask levels
    #[must_use]
    pub fn top_asks(&self, n: usize) -> &[PriceLevel] {
        let levels = self.asks.levels();
        &levels[..n.min(levels.len())]
    }

    /// Get total bid size
    #[must_use]
    pub fn total_bid_size(&self) -> Size {
        self.bids.total_size()
    }

    /// Get total ask size
    #[must_use]
    pub fn total_ask_size(&self) -> Size {
        self.asks.total_size()
    }

    /// Clear the book back to the uninitialized state
    pub fn clear(&mut self) {
        self.asks.clear();
        self.bids.clear();
        self.checksum = 0;
        self.updates = 0;
    }

    /// Check if the book is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Get the number of price levels as `(bids, asks)`
    #[must_use]
    pub fn num_levels(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }
}

impl Default for OrderbookReplica {
    fn default() -> Self {
        Self::new("")
    }
}
