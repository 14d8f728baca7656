//! Wire and book types.
//!
//! This module contains the Rust types the replica consumes: price levels,
//! book deltas, and the venue's orderbook channel messages.
//!
//! - [`level`] - Price levels and book sides
//! - [`messages`] - Delta payloads and the orderbook channel envelope

pub mod level;
pub mod messages;

pub use level::{PriceLevel, Side};
pub use messages::{BookAction, BookDelta, BookMessage};

/// Exact decimal price
///
/// Prices are never floating point. The checksum is computed over the
/// decimal's string form, so any rounding would break agreement with the
/// venue after a few thousand updates.
pub type Price = rust_decimal::Decimal;

/// Exact decimal size resting at a price. Zero means "remove the level".
pub type Size = rust_decimal::Decimal;

/// Book checksum
///
/// Logically an unsigned 32-bit CRC, carried as `i64` so it compares directly
/// with the venue's `checksum` field without sign ambiguity.
pub type Checksum = i64;
