//! Error types for the orderbook-replica crate.
//!
//! Applying a delta to a replica never fails. Errors come from the edges:
//! decoding a message, building a configuration, or the manager noticing that
//! a replica no longer agrees with the venue.

use thiserror::Error;

use crate::types::Checksum;

/// The main error type for this crate
#[derive(Debug, Error)]
pub enum Error {
    /// JSON deserialization error (including malformed price levels)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The replica's checksum disagrees with the venue's
    ///
    /// The book should be discarded and re-subscribed for a fresh snapshot.
    #[error("Checksum mismatch for {market}: venue sent {expected}, replica computed {computed}")]
    ChecksumMismatch {
        /// Market whose book diverged
        market: String,
        /// Checksum carried on the venue message
        expected: Checksum,
        /// Checksum of the replica after applying the message
        computed: Checksum,
    },

    /// Market is not tracked by the manager
    #[error("Unknown market: {0}")]
    UnknownMarket(String),
}

impl Error {
    /// Returns `true` if the caller should resubscribe to get a fresh snapshot
    pub fn requires_resync(&self) -> bool {
        matches!(self, Error::ChecksumMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_mismatch_display() {
        let err = Error::ChecksumMismatch {
            market: "BTC-PERP".to_string(),
            expected: 775538454,
            computed: 62906094,
        };
        let msg = err.to_string();
        assert!(msg.contains("BTC-PERP"));
        assert!(msg.contains("775538454"));
        assert!(msg.contains("62906094"));
        assert!(err.requires_resync());
    }

    #[test]
    fn test_json_error_from() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
        assert!(!err.requires_resync());
    }

    #[test]
    fn test_unknown_market_display() {
        let err = Error::UnknownMarket("ETH-PERP".to_string());
        assert!(err.to_string().contains("ETH-PERP"));
    }
}
