//! Property-based tests for ladder invariants.
//!
//! Uses Proptest to check that any sequence of deltas leaves the replica
//! sorted, capped, deterministic, and in agreement with a plain map model.

use std::collections::BTreeMap;

use orderbook_replica::orderbook::OrderbookReplica;
use orderbook_replica::types::{BookDelta, Price, PriceLevel, Size};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;

/// Sizes with roughly one removal in four
fn arb_size() -> impl Strategy<Value = Size> {
    prop_oneof![
        1 => Just(Size::ZERO),
        3 => (1i64..10_000i64).prop_map(|units| Size::new(units, 4)),
    ]
}

/// A level within 40.0 of `base`, priced in tenths
fn arb_level(base: i64) -> impl Strategy<Value = PriceLevel> {
    (0i64..400i64, arb_size())
        .prop_map(move |(offset, size)| PriceLevel::new(Price::new(base * 10 + offset, 1), size))
}

/// Unsorted, possibly duplicated changes on both sides
fn arb_delta() -> impl Strategy<Value = BookDelta> {
    (vec(arb_level(5000), 0..30), vec(arb_level(4960), 0..30))
        .prop_map(|(asks, bids)| BookDelta::new(asks, bids))
}

fn arb_deltas(max: usize) -> impl Strategy<Value = Vec<BookDelta>> {
    vec(arb_delta(), 1..max)
}

/// Reference model: unlimited maps, truncated only when compared
#[derive(Default)]
struct Model {
    asks: BTreeMap<Price, Size>,
    bids: BTreeMap<Price, Size>,
}

impl Model {
    fn apply(&mut self, delta: &BookDelta, book: &OrderbookReplica) {
        // Levels the replica dropped below depth 100 are gone for good
        self.asks = book.asks().iter().map(|l| (l.price, l.size)).collect();
        self.bids = book.bids().iter().map(|l| (l.price, l.size)).collect();
        for (side, levels) in [(&mut self.asks, &delta.asks), (&mut self.bids, &delta.bids)] {
            for level in levels {
                if level.size.is_zero() {
                    side.remove(&level.price);
                } else {
                    side.insert(level.price, level.size);
                }
            }
        }
    }

    fn top_asks(&self) -> Vec<(Price, Size)> {
        self.asks.iter().take(100).map(|(p, s)| (*p, *s)).collect()
    }

    fn top_bids(&self) -> Vec<(Price, Size)> {
        self.bids.iter().rev().take(100).map(|(p, s)| (*p, *s)).collect()
    }
}

fn pairs(levels: &[PriceLevel]) -> Vec<(Price, Size)> {
    levels.iter().map(|l| (l.price, l.size)).collect()
}

proptest! {
    #[test]
    fn prop_deltas_match_model(deltas in arb_deltas(40)) {
        let mut book = OrderbookReplica::new("TEST");
        let mut model = Model::default();

        for (round, delta) in deltas.iter().enumerate() {
            model.apply(delta, &book);
            book.apply(delta);

            prop_assert_eq!(pairs(book.asks()), model.top_asks(), "asks diverged at {}", round);
            prop_assert_eq!(pairs(book.bids()), model.top_bids(), "bids diverged at {}", round);
        }
    }

    #[test]
    fn prop_ladders_sorted_and_capped(deltas in arb_deltas(40)) {
        let mut book = OrderbookReplica::new("TEST");

        for delta in &deltas {
            book.apply(delta);
            let (bids, asks) = book.num_levels();
            prop_assert!(bids <= 100 && asks <= 100);
            prop_assert!(book.asks().windows(2).all(|w| w[0].price < w[1].price));
            prop_assert!(book.bids().windows(2).all(|w| w[0].price > w[1].price));
            prop_assert!(book.asks().iter().chain(book.bids()).all(|l| !l.size.is_zero()));
        }
    }

    #[test]
    fn prop_same_deltas_same_checksums(deltas in arb_deltas(30)) {
        let mut a = OrderbookReplica::new("A");
        let mut b = OrderbookReplica::new("B");

        for delta in &deltas {
            prop_assert_eq!(a.apply(delta), b.apply(delta));
        }
    }

    #[test]
    fn prop_empty_delta_keeps_checksum(deltas in arb_deltas(10)) {
        let mut book = OrderbookReplica::new("TEST");
        for delta in &deltas {
            let sum = book.apply(delta);
            prop_assert_eq!(book.apply(&BookDelta::default()), sum);
        }
    }

    #[test]
    fn prop_delete_removes_only_target(deltas in arb_deltas(20), pick in any::<Index>()) {
        let mut book = OrderbookReplica::new("TEST");
        for delta in &deltas {
            book.apply(delta);
        }

        let before = book.asks().to_vec();
        prop_assume!(!before.is_empty());
        let victim = before[pick.index(before.len())];

        book.apply(&BookDelta::new(
            vec![PriceLevel::new(victim.price, Size::ZERO)],
            vec![],
        ));

        let expected: Vec<_> = before.into_iter().filter(|l| *l != victim).collect();
        prop_assert_eq!(book.asks(), expected.as_slice());
    }

    #[test]
    fn prop_update_keeps_rank(deltas in arb_deltas(20), pick in any::<Index>(), units in 1i64..10_000i64) {
        let mut book = OrderbookReplica::new("TEST");
        for delta in &deltas {
            book.apply(delta);
        }

        let before = book.bids().to_vec();
        prop_assume!(!before.is_empty());
        let rank = pick.index(before.len());
        let size = Size::new(units, 2);

        book.apply(&BookDelta::new(
            vec![],
            vec![PriceLevel::new(before[rank].price, size)],
        ));

        prop_assert_eq!(book.bids().len(), before.len());
        prop_assert_eq!(book.bids()[rank], PriceLevel::new(before[rank].price, size));
    }
}

#[test]
fn test_one_sided_book_has_zero_checksum() {
    let mut book = OrderbookReplica::new("TEST");
    let asks = (0..100)
        .map(|i| PriceLevel::new(Price::from(5000 + i), Size::ONE))
        .collect();

    assert_eq!(book.apply(&BookDelta::new(asks, vec![])), 0);
    assert_eq!(book.num_levels(), (0, 100));
}
