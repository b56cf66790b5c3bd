//! Bar — one completed price aggregation period.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed bar. The engine is called exactly once per finished bar;
/// partial bars never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Bar {
    /// Time of day the bar closed at, checked against the trading window.
    pub fn time_of_day(&self) -> NaiveTime {
        self.timestamp.time()
    }
}
