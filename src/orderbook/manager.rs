//! Orderbook manager for handling multiple markets.
//!
//! This module provides [`OrderbookManager`], a thread-safe container for
//! replicas of several markets, fed with already-decoded orderbook channel
//! messages.
//!
//! # Design
//!
//! The manager uses `parking_lot::RwLock` for each replica, allowing concurrent
//! reads while ensuring exclusive write access during updates. Each replica is
//! still written by one feed at a time, in venue order.
//!
//! # Checksum Verification
//!
//! After every message the replica's checksum is compared with the one the
//! venue attached. On a mismatch the market is marked as needing a resync and
//! its updates are ignored until a new `partial` arrives. The replica is never
//! patched up in place.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::types::{BookDelta, BookMessage, Checksum, Price, PriceLevel};

use super::OrderbookReplica;

/// State of a tracked market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderbookState {
    /// Replica agrees with the venue and is receiving updates
    Synchronized,
    /// Replica diverged from the venue and needs a fresh snapshot
    NeedsResync,
    /// No snapshot received yet
    WaitingForSnapshot,
}

/// Entry in the orderbook manager
#[derive(Debug)]
struct OrderbookEntry {
    book: OrderbookReplica,
    state: OrderbookState,
}

/// Manager for multiple order book replicas.
///
/// This struct provides thread-safe access to multiple replicas and handles
/// orderbook channel messages including:
///
/// - Applying partials (snapshots) and updates
/// - Checksum verification against the venue
/// - State tracking per market
///
/// # Thread Safety
///
/// The manager is safe to share across threads via `Arc<OrderbookManager>`.
/// Individual replicas are protected by `RwLock` for concurrent read access.
///
/// # Example
///
/// ```rust
/// use orderbook_replica::orderbook::{OrderbookManager, OrderbookState};
///
/// let manager = OrderbookManager::new();
/// manager.add_market("BTC-PERP");
///
/// let partial = r#"{"channel":"orderbook","market":"BTC-PERP","type":"partial",
///     "data":{"action":"partial","asks":[["5001.0","6"]],"bids":[["5000.5","10"]]}}"#;
/// manager.process_json(partial).unwrap();
///
/// assert_eq!(manager.get_state("BTC-PERP"), Some(OrderbookState::Synchronized));
/// println!("Best bid: {:?}", manager.best_bid("BTC-PERP"));
/// ```
#[derive(Debug, Default)]
pub struct OrderbookManager {
    /// Replicas by market name
    books: RwLock<FxHashMap<String, RwLock<OrderbookEntry>>>,

    /// Replica settings
    config: Config,
}

impl OrderbookManager {
    /// Create a new orderbook manager with the default configuration
    pub fn new() -> Self {
        Self {
            books: RwLock::new(FxHashMap::default()),
            config: Config::default(),
        }
    }

    /// Create a new orderbook manager with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            books: RwLock::new(FxHashMap::default()),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add a market to track
    ///
    /// Creates an empty replica in `WaitingForSnapshot` state.
    pub fn add_market(&self, market: impl Into<String>) {
        let market = market.into();
        let mut books = self.books.write();
        if books.contains_key(&market) {
            return;
        }
        let book = OrderbookReplica::with_max_depth(&market, self.config.max_depth());
        books.insert(
            market,
            RwLock::new(OrderbookEntry {
                book,
                state: OrderbookState::WaitingForSnapshot,
            }),
        );
    }

    /// Remove a market from tracking
    pub fn remove_market(&self, market: &str) {
        let mut books = self.books.write();
        books.remove(market);
    }

    /// Get the state of a market
    pub fn get_state(&self, market: &str) -> Option<OrderbookState> {
        let books = self.books.read();
        books.get(market).map(|e| e.read().state)
    }

    /// Get all markets that need a snapshot
    pub fn markets_needing_resync(&self) -> Vec<String> {
        let books = self.books.read();
        books
            .iter()
            .filter(|(_, entry)| {
                let e = entry.read();
                matches!(
                    e.state,
                    OrderbookState::NeedsResync | OrderbookState::WaitingForSnapshot
                )
            })
            .map(|(market, _)| market.clone())
            .collect()
    }

    /// Get a copy of a market's replica
    ///
    /// Returns a cloned copy for safe reading without holding locks.
    pub fn get_orderbook(&self, market: &str) -> Option<OrderbookReplica> {
        let books = self.books.read();
        books.get(market).map(|e| e.read().book.clone())
    }

    /// Get the last computed checksum for a market
    pub fn checksum(&self, market: &str) -> Option<Checksum> {
        let books = self.books.read();
        books.get(market).map(|e| e.read().book.checksum())
    }

    /// Get best bid for a market
    pub fn best_bid(&self, market: &str) -> Option<PriceLevel> {
        let books = self.books.read();
        books.get(market).and_then(|e| e.read().book.best_bid())
    }

    /// Get best ask for a market
    pub fn best_ask(&self, market: &str) -> Option<PriceLevel> {
        let books = self.books.read();
        books.get(market).and_then(|e| e.read().book.best_ask())
    }

    /// Get mid price for a market
    pub fn mid_price(&self, market: &str) -> Option<Price> {
        let books = self.books.read();
        books.get(market).and_then(|e| e.read().book.mid_price())
    }

    /// Get spread for a market
    pub fn spread(&self, market: &str) -> Option<Price> {
        let books = self.books.read();
        books.get(market).and_then(|e| e.read().book.spread())
    }

    /// Decode a raw orderbook channel message and process it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a well-formed orderbook
    /// message, otherwise whatever [`process_message`](Self::process_message) returns.
    pub fn process_json(&self, text: &str) -> Result<Option<String>, Error> {
        let message: BookMessage = serde_json::from_str(text)?;
        self.process_message(&message)
    }

    /// Process an orderbook channel message
    ///
    /// Partials reset the market's replica (adding the market if needed);
    /// updates are merged into a synchronized replica.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(market))` - A replica was updated and agrees with the venue
    /// - `Ok(None)` - Market not tracked, or waiting for a snapshot
    /// - `Err(Error::ChecksumMismatch)` - The replica diverged; resync needed
    pub fn process_message(&self, message: &BookMessage) -> Result<Option<String>, Error> {
        if message.is_partial() {
            self.apply_partial(&message.market, &message.data)
        } else {
            self.apply_update(&message.market, &message.data)
        }
    }

    /// Apply a partial (full snapshot)
    fn apply_partial(&self, market: &str, data: &BookDelta) -> Result<Option<String>, Error> {
        // Auto-add market if not tracked
        self.add_market(market);

        let books = self.books.read();
        let Some(entry) = books.get(market) else {
            // Removed between the add and the read
            return Ok(None);
        };
        let mut e = entry.write();
        let computed = e.book.apply_snapshot(data);
        e.state = OrderbookState::Synchronized;

        let (bids, asks) = e.book.num_levels();
        info!(market, bids, asks, checksum = computed, "applied book snapshot");

        self.verify(market, &mut e, data.checksum, computed)?;
        Ok(Some(market.to_string()))
    }

    /// Apply an incremental update
    fn apply_update(&self, market: &str, data: &BookDelta) -> Result<Option<String>, Error> {
        let books = self.books.read();
        let Some(entry) = books.get(market) else {
            return Ok(None);
        };
        let mut e = entry.write();

        // Skip updates until a fresh snapshot arrives
        if e.state != OrderbookState::Synchronized {
            return Ok(None);
        }

        let computed = e.book.apply(data);
        self.verify(market, &mut e, data.checksum, computed)?;
        Ok(Some(market.to_string()))
    }

    /// Compare the replica's checksum with the venue's
    fn verify(
        &self,
        market: &str,
        entry: &mut OrderbookEntry,
        expected: Option<Checksum>,
        computed: Checksum,
    ) -> Result<(), Error> {
        if !self.config.verify_checksums() {
            return Ok(());
        }
        match expected {
            Some(expected) if expected != computed => {
                warn!(market, expected, computed, "book checksum mismatch, resync needed");
                entry.state = OrderbookState::NeedsResync;
                Err(Error::ChecksumMismatch {
                    market: market.to_string(),
                    expected,
                    computed,
                })
            }
            _ => Ok(()),
        }
    }

    /// Mark a market as needing a resync
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMarket`] if the market is not tracked.
    pub fn mark_needs_resync(&self, market: &str) -> Result<(), Error> {
        let books = self.books.read();
        let entry = books
            .get(market)
            .ok_or_else(|| Error::UnknownMarket(market.to_string()))?;
        warn!(market, "marking book for resync");
        entry.write().state = OrderbookState::NeedsResync;
        Ok(())
    }

    /// Clear all replicas
    pub fn clear(&self) {
        let mut books = self.books.write();
        books.clear();
    }

    /// Get number of tracked markets
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Check if manager has no markets
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }

    /// Get all tracked market names
    pub fn market_names(&self) -> Vec<String> {
        self.books.read().keys().cloned().collect()
    }
}
