//! Thread-safe wrapper around a single trade generator.

use crate::generator::{TradeGenerator, TradeSource};
use crate::rng::{RandomSource, TradeRng};
use crate::types::TradeRecord;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`TradeGenerator`] shared between threads.
///
/// Every call holds one lock for the whole generation, so sequence ids stay
/// strictly increasing and gap free across all callers.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use trade_generator::{SharedTradeGenerator, TradeGenerator};
///
/// let shared = Arc::new(SharedTradeGenerator::new(TradeGenerator::with_seed(7)));
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || shared.generate().sequence_id)
///     })
///     .collect();
///
/// let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
/// ids.sort();
/// assert_eq!(ids, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug)]
pub struct SharedTradeGenerator<R = TradeRng> {
    inner: Mutex<TradeGenerator<R>>,
}

impl<R: RandomSource> SharedTradeGenerator<R> {
    /// Wrap a generator for shared use
    pub fn new(generator: TradeGenerator<R>) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    // Generation cannot panic part-way through, so a poisoned lock still
    // guards a consistent generator.
    fn lock(&self) -> MutexGuard<'_, TradeGenerator<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate one trade
    pub fn generate(&self) -> TradeRecord {
        self.lock().generate()
    }

    /// Generate `count` trades with consecutive sequence ids
    pub fn generate_batch(&self, count: usize) -> Vec<TradeRecord> {
        self.lock().generate_trades(count)
    }

    /// Sequence id the next trade will carry
    pub fn next_sequence_id(&self) -> u64 {
        self.lock().next_sequence_id()
    }

    /// Unwrap the inner generator
    pub fn into_inner(self) -> TradeGenerator<R> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RandomSource> From<TradeGenerator<R>> for SharedTradeGenerator<R> {
    fn from(generator: TradeGenerator<R>) -> Self {
        Self::new(generator)
    }
}

impl<R: RandomSource> TradeSource for SharedTradeGenerator<R> {
    fn next_trade(&mut self) -> TradeRecord {
        self.generate()
    }

    fn generate_trades(&mut self, count: usize) -> Vec<TradeRecord> {
        self.generate_batch(count)
    }
}
