//! # orderbook-replica
//!
//! A client-side replica of a venue's limit order book, rebuilt from a
//! snapshot and a stream of incremental deltas, with the venue's CRC32
//! checksum recomputed after every update.
//!
//! ## Features
//!
//! - **Exact Decimals** - Prices and sizes are `rust_decimal::Decimal`, never floats
//! - **Venue Checksum** - Byte-exact CRC32 over the interleaved top of book
//! - **Capped Ladders** - 100 levels per side, sorted best first
//! - **Multi-Market Manager** - Thread-safe replicas with resync tracking
//!
//! ## Quick Start
//!
//! ```rust
//! use orderbook_replica::orderbook::OrderbookReplica;
//! use orderbook_replica::types::BookMessage;
//!
//! # fn main() -> Result<(), orderbook_replica::Error> {
//! let mut book = OrderbookReplica::new("BTC-PERP");
//!
//! let msg: BookMessage = serde_json::from_str(r#"{
//!     "channel": "orderbook", "market": "BTC-PERP", "type": "partial",
//!     "data": {"action": "partial", "checksum": 0,
//!              "asks": [["5001.0", "6"]], "bids": [["5000.5", "10"]]}
//! }"#)?;
//!
//! let checksum = book.apply(&msg.data);
//! if msg.data.checksum != Some(checksum) {
//!     // Diverged from the venue: drop the book and resubscribe
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Checksum Format
//!
//! The venue hashes `bid:size:ask:size:...` over the first
//! `min(bids, asks)` ranks. Whole numbers are written with a `.0` suffix
//! (`5000` becomes `5000.0`), fractions in minimal form (`0.40` becomes `0.4`).
//!
//! ## Architecture
//!
//! This crate is organized into several modules:
//!
//! - [`orderbook`] - Replica, ladders, checksum, and the multi-market manager
//! - [`types`] - Price levels and orderbook channel messages
//! - [`config`] - Replica configuration
//! - [`error`] - Error types for the crate
//!
//! ## Ordering
//!
//! Deltas must be applied in the order the venue sent them. There is no
//! sequence tracking; an out-of-order apply produces a wrong book that only a
//! checksum comparison will reveal.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod orderbook;
pub mod types;

// Re-export main types at crate root for convenience
pub use config::Config;
pub use error::Error;
pub use orderbook::{OrderbookManager, OrderbookReplica};

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
