//! Orderbook channel message types.
//!
//! These types mirror the JSON the venue pushes on its `orderbook` channel.
//! Transport and framing live elsewhere; by the time a message reaches this
//! crate it is a string or a `serde_json::Value`.

use serde::{Deserialize, Serialize};

use super::{Checksum, PriceLevel};

/// Kind of orderbook message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookAction {
    /// Full snapshot of the top of book (sent after subscribing)
    Partial,
    /// Incremental changes since the previous message
    Update,
}

/// Changed price levels for both sides of one book.
///
/// Used for both snapshots and incremental updates. Levels within a side are
/// not assumed to be sorted or unique.
///
/// ```json
/// { "asks": [[44706, 0.1237]], "bids": [[44650, 0], [44292, 0.0006]], "checksum": 62906094 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDelta {
    /// Ask levels in message order
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
    /// Bid levels in message order
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    /// Checksum the venue computed after applying this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
    /// Venue timestamp, seconds since the Unix epoch (not interpreted here)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl BookDelta {
    /// Create a delta from ask and bid levels, with no venue checksum
    pub fn new(asks: Vec<PriceLevel>, bids: Vec<PriceLevel>) -> Self {
        Self {
            asks,
            bids,
            checksum: None,
            time: None,
        }
    }

    /// Attach the venue checksum
    #[must_use]
    pub fn with_checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Returns `true` if neither side carries a level
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }
}

/// Orderbook channel message envelope
///
/// ```json
/// { "channel": "orderbook", "market": "BTC-PERP", "type": "update",
///   "data": { "action": "update", "asks": [], "bids": [], "checksum": 0, "time": 1638316800.1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookMessage {
    /// Channel name (`orderbook`)
    pub channel: String,
    /// Market the book belongs to
    pub market: String,
    /// Snapshot or update
    #[serde(rename = "type")]
    pub action: BookAction,
    /// Level changes and venue checksum
    pub data: BookDelta,
}

impl BookMessage {
    /// Returns `true` if this message carries a full snapshot
    pub fn is_partial(&self) -> bool {
        self.action == BookAction::Partial
    }
}
