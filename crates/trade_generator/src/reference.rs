//! Reference prices that anchor synthetic trades.
//!
//! The standard table holds 25 large-cap symbols with a base price each.
//! Generated prices deviate from these anchors by at most
//! [`MAX_DEVIATION`](crate::generator::MAX_DEVIATION). A custom table can be
//! supplied through configuration; it is validated once on construction and
//! is immutable afterwards.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// A (symbol, base price) anchor for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    symbol: Cow<'static, str>,
    base_price: f64,
}

impl ReferenceEntry {
    /// Create a new reference entry
    pub fn new(symbol: impl Into<String>, base_price: f64) -> Self {
        Self {
            symbol: Cow::Owned(symbol.into()),
            base_price,
        }
    }

    const fn fixed(symbol: &'static str, base_price: f64) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            base_price,
        }
    }

    /// Ticker symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Mean price around which trades are generated
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Inclusive price range reachable with the given maximum deviation,
    /// before rounding.
    pub fn price_bounds(&self, max_deviation: f64) -> (f64, f64) {
        (
            self.base_price * (1.0 - max_deviation),
            self.base_price * (1.0 + max_deviation),
        )
    }
}

/// The standard reference table.
pub static STANDARD_REFERENCE: [ReferenceEntry; 25] = [
    ReferenceEntry::fixed("AAPL", 119.72),
    ReferenceEntry::fixed("XOM", 91.56),
    ReferenceEntry::fixed("GOOG", 527.83),
    ReferenceEntry::fixed("BRK.A", 223999.88),
    ReferenceEntry::fixed("MSFT", 42.36),
    ReferenceEntry::fixed("WFC", 54.21),
    ReferenceEntry::fixed("JNJ", 99.78),
    ReferenceEntry::fixed("WMT", 85.91),
    ReferenceEntry::fixed("CHL", 66.96),
    ReferenceEntry::fixed("GE", 24.64),
    ReferenceEntry::fixed("NVS", 102.46),
    ReferenceEntry::fixed("PG", 85.05),
    ReferenceEntry::fixed("JPM", 57.82),
    ReferenceEntry::fixed("RDS.A", 66.72),
    ReferenceEntry::fixed("CVX", 110.43),
    ReferenceEntry::fixed("PFE", 33.07),
    ReferenceEntry::fixed("FB", 74.44),
    ReferenceEntry::fixed("VZ", 49.09),
    ReferenceEntry::fixed("PTR", 111.08),
    ReferenceEntry::fixed("BUD", 120.39),
    ReferenceEntry::fixed("ORCL", 43.40),
    ReferenceEntry::fixed("KO", 41.23),
    ReferenceEntry::fixed("T", 34.64),
    ReferenceEntry::fixed("DIS", 101.73),
    ReferenceEntry::fixed("AMZN", 370.56),
];

/// Immutable, non-empty set of reference entries.
///
/// The standard table is borrowed from [`STANDARD_REFERENCE`]; custom tables
/// own their entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    entries: Cow<'static, [ReferenceEntry]>,
}

impl ReferenceTable {
    /// The standard 25-symbol table
    pub fn standard() -> Self {
        Self {
            entries: Cow::Borrowed(&STANDARD_REFERENCE),
        }
    }

    /// Build a custom table.
    ///
    /// # Errors
    ///
    /// Fails if `entries` is empty, a symbol is blank or repeated, or a base
    /// price is not a positive finite number.
    pub fn new(entries: Vec<ReferenceEntry>) -> Result<Self> {
        validate_entries(&entries)?;
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// Number of entries (never zero)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; an empty table cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by symbol
    pub fn find(&self, symbol: &str) -> Option<&ReferenceEntry> {
        self.entries.iter().find(|e| e.symbol() == symbol)
    }

    /// Iterate over all entries in table order
    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceEntry> {
        self.entries.iter()
    }

    /// All entries as a slice
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Whether this is the built-in standard table
    pub fn is_standard(&self) -> bool {
        matches!(self.entries, Cow::Borrowed(_))
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a ReferenceTable {
    type Item = &'a ReferenceEntry;
    type IntoIter = std::slice::Iter<'a, ReferenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check a candidate set of entries, reporting the first problem found.
pub(crate) fn validate_entries(entries: &[ReferenceEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(GeneratorError::EmptyReference);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.symbol().trim().is_empty() {
            return Err(GeneratorError::EmptySymbol(index));
        }
        if !(entry.base_price.is_finite() && entry.base_price > 0.0) {
            return Err(GeneratorError::invalid_base_price(
                entry.symbol(),
                entry.base_price,
            ));
        }
        if !seen.insert(entry.symbol()) {
            return Err(GeneratorError::DuplicateSymbol(entry.symbol().to_string()));
        }
    }

    Ok(())
}
