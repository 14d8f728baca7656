//! Order book replica and checksum.
//!
//! This module reconstructs a venue's top of book from a snapshot and a stream
//! of deltas, and computes the venue's CRC32 checksum after every update:
//!
//! - [`ladder`] - One side of the book, kept sorted and capped at 100 levels
//! - [`checksum`] - Canonical decimal formatting and the interleaved CRC32
//! - [`book`] - [`OrderbookReplica`], the two ladders plus the last checksum
//! - [`manager`] - [`OrderbookManager`], replicas for many markets with
//!   checksum verification
//!
//! # Example
//!
//! ```rust
//! use orderbook_replica::orderbook::OrderbookReplica;
//! use orderbook_replica::types::BookDelta;
//!
//! let mut book = OrderbookReplica::new("BTC-PERP");
//!
//! // Apply a snapshot, then an update
//! let snapshot: BookDelta = serde_json::from_str(
//!     r#"{"asks": [["5001.0", "6"], ["5002.0", "7"]], "bids": [["5000.5", "10"], ["4995.0", "5"]]}"#,
//! ).unwrap();
//! let checksum = book.apply(&snapshot);
//! assert_eq!(book.checksum_string(), "5000.5:10.0:5001:6.0:4995:5.0:5002:7.0");
//!
//! let update: BookDelta = serde_json::from_str(r#"{"asks": [], "bids": [["4995.0", "0"]]}"#).unwrap();
//! assert_ne!(book.apply(&update), checksum);
//!
//! // Get best bid
//! if let Some(level) = book.best_bid() {
//!     println!("Best bid: {} @ {}", level.size, level.price);
//! }
//! ```

pub mod book;
pub mod checksum;
pub mod ladder;
pub mod manager;

pub use book::OrderbookReplica;
pub use ladder::{Ladder, DEFAULT_MAX_DEPTH};
pub use manager::{OrderbookManager, OrderbookState};
