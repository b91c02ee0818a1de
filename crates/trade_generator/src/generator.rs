//! Synthetic stock trade generation.
//!
//! Each trade picks a symbol uniformly from the reference table and prices it
//! at a uniform deviation of up to ±20% around the symbol's base price,
//! rounded to cents. Sides are sells with probability 0.4. Quantities are
//! uniform in `1..=10000`. Every generator numbers its trades 1, 2, 3, ...
//! with no gaps.

use crate::reference::ReferenceTable;
use crate::rng::{RandomSource, TradeRng};
use crate::types::{Side, TradeRecord};
use tracing::{debug, trace};

/// Maximum fractional deviation from the base price (20%)
pub const MAX_DEVIATION: f64 = 0.2;

/// Largest quantity a trade can have; the smallest is 1
pub const MAX_QUANTITY: u64 = 10_000;

/// Probability that a trade is a sell (40%)
pub const PROBABILITY_SELL: f64 = 0.4;

/// Round a price to two decimal places, half away from zero.
#[inline]
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Anything that yields a stream of trades.
pub trait TradeSource {
    /// Produce the next trade
    fn next_trade(&mut self) -> TradeRecord;

    /// Produce `count` trades in sequence order
    fn generate_trades(&mut self, count: usize) -> Vec<TradeRecord> {
        (0..count).map(|_| self.next_trade()).collect()
    }

    /// Endless iterator over trades
    fn trades(&mut self) -> Trades<'_, Self>
    where
        Self: Sized,
    {
        Trades { source: self }
    }
}

/// Iterator returned by [`TradeSource::trades`].
#[derive(Debug)]
pub struct Trades<'a, S: ?Sized> {
    source: &'a mut S,
}

impl<S: TradeSource + ?Sized> Iterator for Trades<'_, S> {
    type Item = TradeRecord;

    fn next(&mut self) -> Option<TradeRecord> {
        Some(self.source.next_trade())
    }
}

/// Random stock trade generator.
///
/// Owns its random source and sequence counter exclusively. Give each worker
/// its own instance, or share one through
/// [`SharedTradeGenerator`](crate::shared::SharedTradeGenerator).
///
/// # Examples
///
/// ```rust
/// use trade_generator::TradeGenerator;
///
/// let mut generator = TradeGenerator::with_seed(42);
/// let first = generator.generate();
/// let second = generator.generate();
///
/// assert_eq!(first.sequence_id, 1);
/// assert_eq!(second.sequence_id, 2);
/// assert!((1..=10_000).contains(&first.quantity));
/// ```
#[derive(Debug, Clone)]
pub struct TradeGenerator<R = TradeRng> {
    reference: ReferenceTable,
    source: R,
    next_id: u64,
}

impl TradeGenerator<TradeRng> {
    /// Create a generator seeded from OS entropy, over the standard table
    pub fn new() -> Self {
        let source = TradeRng::from_entropy();
        debug!(seed = source.seed(), "Trade generator seeded from entropy");
        Self::with_source(source)
    }

    /// Create a reproducible generator from a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, "Trade generator seeded");
        Self::with_source(TradeRng::from_seed(seed))
    }

    /// Seed of the underlying random source
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }
}

impl Default for TradeGenerator<TradeRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> TradeGenerator<R> {
    /// Create a generator drawing from the given source
    pub fn with_source(source: R) -> Self {
        Self {
            reference: ReferenceTable::standard(),
            source,
            next_id: 1,
        }
    }

    /// Replace the reference table
    pub fn with_reference(mut self, reference: ReferenceTable) -> Self {
        debug!(
            entries = reference.len(),
            standard = reference.is_standard(),
            "Reference table set"
        );
        self.reference = reference;
        self
    }

    /// Generate one trade.
    ///
    /// Draws, in order: table index, price deviation, side, quantity.
    pub fn generate(&mut self) -> TradeRecord {
        // ReferenceTable is never empty, so the bound is at least 1.
        let index = self.source.next_index(self.reference.len());
        let entry = &self.reference.entries()[index];

        let deviation = (self.source.next_uniform() - 0.5) * 2.0 * MAX_DEVIATION;
        let price = round_price(entry.base_price() * (1.0 + deviation));

        let side = if self.source.next_uniform() < PROBABILITY_SELL {
            Side::Sell
        } else {
            Side::Buy
        };

        let quantity = self.source.next_index(MAX_QUANTITY as usize) as u64 + 1;

        let sequence_id = self.next_id;
        self.next_id += 1;

        let trade = TradeRecord {
            symbol: entry.symbol().to_string(),
            side,
            price,
            quantity,
            sequence_id,
        };
        trace!(%trade, "Trade generated");
        trade
    }

    /// Sequence id the next trade will carry
    pub fn next_sequence_id(&self) -> u64 {
        self.next_id
    }

    /// Number of trades generated so far
    pub fn generated(&self) -> u64 {
        self.next_id - 1
    }

    /// Reference table in use
    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }
}

impl<R: RandomSource> TradeSource for TradeGenerator<R> {
    fn next_trade(&mut self) -> TradeRecord {
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceEntry;
    use approx::assert_relative_eq;
    use std::collections::VecDeque;

    #[derive(Debug)]
    enum Draw {
        Uniform(f64),
        Index(usize),
    }

    /// Replays a fixed script of draws and panics if the generator asks for
    /// a different kind of draw than scripted.
    struct ScriptedSource {
        draws: VecDeque<Draw>,
    }

    impl ScriptedSource {
        fn new(draws: Vec<Draw>) -> Self {
            Self {
                draws: draws.into(),
            }
        }

        /// Script for one trade: index, deviation, side, quantity
        fn trade(index: usize, deviation_u: f64, side_u: f64, quantity_idx: usize) -> Vec<Draw> {
            vec![
                Draw::Index(index),
                Draw::Uniform(deviation_u),
                Draw::Uniform(side_u),
                Draw::Index(quantity_idx),
            ]
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_uniform(&mut self) -> f64 {
            match self.draws.pop_front() {
                Some(Draw::Uniform(u)) => u,
                other => panic!("expected uniform draw, got {:?}", other),
            }
        }

        fn next_index(&mut self, bound: usize) -> usize {
            match self.draws.pop_front() {
                Some(Draw::Index(i)) => {
                    assert!(i < bound, "scripted index {} out of bound {}", i, bound);
                    i
                }
                other => panic!("expected index draw, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_round_price() {
        assert_relative_eq!(round_price(131.692), 131.69);
        assert_relative_eq!(round_price(95.776), 95.78);
        assert_relative_eq!(round_price(42.0), 42.0);
        assert_relative_eq!(round_price(0.125), 0.13);
    }

    #[test]
    fn test_scripted_trade_exact_values() {
        let source = ScriptedSource::new(ScriptedSource::trade(0, 0.75, 0.39, 9_999));
        let mut generator = TradeGenerator::with_source(source);

        let trade = generator.generate();
        assert_eq!(trade.symbol, "AAPL");
        // 119.72 * 1.1 = 131.692
        assert_relative_eq!(trade.price, 131.69);
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.quantity, 10_000);
        assert_eq!(trade.sequence_id, 1);
    }

    #[test]
    fn test_scripted_trade_at_base_price() {
        let source = ScriptedSource::new(ScriptedSource::trade(24, 0.5, 0.4, 0));
        let mut generator = TradeGenerator::with_source(source);

        let trade = generator.generate();
        assert_eq!(trade.symbol, "AMZN");
        assert_relative_eq!(trade.price, 370.56);
        // 0.4 is not below the sell threshold
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.quantity, 1);
    }

    #[test]
    fn test_scripted_trade_lower_bound() {
        let source = ScriptedSource::new(ScriptedSource::trade(0, 0.0, 0.0, 4_999));
        let mut generator = TradeGenerator::with_source(source);

        let trade = generator.generate();
        // 119.72 * 0.8 = 95.776
        assert_relative_eq!(trade.price, 95.78);
        assert_eq!(trade.side, Side::Sell);
        assert_eq!(trade.quantity, 5_000);
    }

    #[test]
    fn test_sequence_ids_independent_of_draws() {
        let mut draws = Vec::new();
        for i in 0..5 {
            draws.extend(ScriptedSource::trade(i, 0.1 * i as f64, 0.9, i));
        }
        let mut generator = TradeGenerator::with_source(ScriptedSource::new(draws));

        let ids: Vec<u64> = (0..5).map(|_| generator.generate().sequence_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(generator.generated(), 5);
        assert_eq!(generator.next_sequence_id(), 6);
    }

    #[test]
    fn test_fresh_generator_state() {
        let generator = TradeGenerator::with_seed(1);
        assert_eq!(generator.next_sequence_id(), 1);
        assert_eq!(generator.generated(), 0);
        assert_eq!(generator.seed(), 1);
        assert!(generator.reference().is_standard());
    }

    #[test]
    fn test_same_seed_same_trades() {
        let mut a = TradeGenerator::with_seed(2024);
        let mut b = TradeGenerator::with_seed(2024);
        assert_eq!(a.generate_trades(50), b.generate_trades(50));
    }

    #[test]
    fn test_custom_reference_used() {
        let table = ReferenceTable::new(vec![ReferenceEntry::new("ONLY", 10.0)]).unwrap();
        let mut generator = TradeGenerator::with_seed(9).with_reference(table);

        for trade in generator.generate_trades(200) {
            assert_eq!(trade.symbol, "ONLY");
            assert!(trade.price >= 8.0 && trade.price <= 12.0);
        }
    }

    #[test]
    fn test_trades_iterator() {
        let mut generator = TradeGenerator::with_seed(5);
        let ids: Vec<u64> = generator.trades().take(3).map(|t| t.sequence_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(generator.next_sequence_id(), 4);
    }

    #[test]
    fn test_entropy_generator_produces_trades() {
        let mut generator = TradeGenerator::new();
        let trade = generator.generate();
        assert!(generator.reference().find(&trade.symbol).is_some());
        assert_eq!(trade.sequence_id, 1);
    }
}
