//! Indicator snapshot — named append-only decimal series.
//!
//! Grown by the data collaborator once per bar-close and read-only to the
//! engine. "Current" is the last element, "previous" the second-to-last;
//! values are never rewritten retroactively. The engine re-reads the
//! snapshot on every call instead of caching last-seen values.

use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct IndicatorSnapshot {
    series: HashMap<String, Vec<Decimal>>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a named series wholesale (recomputed externally).
    pub fn insert_series(&mut self, name: impl Into<String>, values: Vec<Decimal>) {
        self.series.insert(name.into(), values);
    }

    /// Append one value to a named series — one per bar-close.
    pub fn push(&mut self, name: impl Into<String>, value: Decimal) {
        self.series.entry(name.into()).or_default().push(value);
    }

    /// Number of bars covered by every series.
    ///
    /// Series are grown in lockstep, one value per bar; the minimum length
    /// is the safe answer if the provider is mid-update.
    pub fn bar_count(&self) -> usize {
        self.series.values().map(Vec::len).min().unwrap_or(0)
    }

    /// Value for the just-closed bar.
    pub fn current(&self, name: &str) -> Option<Decimal> {
        self.series.get(name).and_then(|v| v.last().copied())
    }

    /// Value for the previously closed bar. `None` until two bars exist.
    pub fn previous(&self, name: &str) -> Option<Decimal> {
        let values = self.series.get(name)?;
        let index = values.len().checked_sub(2)?;
        values.get(index).copied()
    }

    /// Number of named series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
