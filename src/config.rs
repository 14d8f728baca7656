//! Replica configuration.
//!
//! This module provides the [`Config`] struct used by
//! [`OrderbookManager`](crate::orderbook::OrderbookManager) to build
//! replicas and decide how venue checksums are treated.

use crate::error::Error;
use crate::orderbook::ladder::DEFAULT_MAX_DEPTH;

/// Configuration for order book replicas
///
/// # Example
///
/// ```rust
/// use orderbook_replica::Config;
///
/// let config = Config::new();
/// assert_eq!(config.max_depth(), 100);
///
/// // Keep books but skip comparing against venue checksums
/// let config = Config::new().with_checksum_verification(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Levels kept per side (the venue checksums the top 100)
    max_depth: usize,

    /// Compare each computed checksum with the venue's
    verify_checksums: bool,
}

impl Config {
    /// Create a configuration with venue defaults
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            verify_checksums: true,
        }
    }

    /// Set the number of levels kept per side
    ///
    /// Anything other than 100 will not agree with the venue's checksum once
    /// the book is deeper than the chosen depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable checksum verification
    #[must_use]
    pub fn with_checksum_verification(mut self, enabled: bool) -> Self {
        self.verify_checksums = enabled;
        self
    }

    /// Get the number of levels kept per side
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether checksums are verified
    pub fn verify_checksums(&self) -> bool {
        self.verify_checksums
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_depth` is zero.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_depth(), 100);
        assert!(config.verify_checksums());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::new()
            .with_max_depth(25)
            .with_checksum_verification(false);

        assert_eq!(config.max_depth(), 25);
        assert!(!config.verify_checksums());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let result = Config::new().with_max_depth(0).validate();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
