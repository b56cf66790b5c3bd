//! Dual-band crossover entries with a percent trailing exit.
//!
//! Entry fires only on the bar where band A crosses band B; riding the
//! trend afterwards is the trailing stop's job. The stop follows the
//! current bar's low (longs) or high (shorts) at a fixed percent distance
//! and is re-emitted every bar.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Direction, MarketView};
use crate::snapshot::IndicatorSnapshot;

use super::{EntryVerdict, ExitDecision, SignalEvaluator};

/// Band crossover signal rules.
///
/// # Snapshot dependencies
/// `band_a_{period}` and `band_b_{period}`, current and previous values.
#[derive(Debug, Clone)]
pub struct BandCross {
    pub band_a_period: usize,
    pub band_b_period: usize,
    /// Trail distance in percent of the anchor price (e.g. `1.5` for 1.5%).
    pub trailing_percent: Decimal,
    band_a_key: String,
    band_b_key: String,
}

impl BandCross {
    pub fn new(band_a_period: usize, band_b_period: usize, trailing_percent: Decimal) -> Self {
        assert!(band_a_period >= 1, "band_a_period must be >= 1");
        assert!(band_b_period >= 1, "band_b_period must be >= 1");
        assert!(
            trailing_percent > Decimal::ZERO && trailing_percent < dec!(100),
            "trailing_percent must be in (0, 100)"
        );

        Self {
            band_a_period,
            band_b_period,
            trailing_percent,
            band_a_key: format!("band_a_{band_a_period}"),
            band_b_key: format!("band_b_{band_b_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(26, 52, dec!(1.0))
    }

    fn entry_verdict(&self, snapshot: &IndicatorSnapshot) -> Option<EntryVerdict> {
        let current_a = snapshot.current(&self.band_a_key)?;
        let current_b = snapshot.current(&self.band_b_key)?;
        let previous_a = snapshot.previous(&self.band_a_key)?;
        let previous_b = snapshot.previous(&self.band_b_key)?;

        // Upward cross: A was below B, now above.
        if previous_a < previous_b && current_a > current_b {
            return Some(EntryVerdict::EnterLong);
        }

        // Downward cross: A was above B, now below.
        if previous_a > previous_b && current_a < current_b {
            return Some(EntryVerdict::EnterShort);
        }

        Some(EntryVerdict::None)
    }
}

impl SignalEvaluator for BandCross {
    fn name(&self) -> &str {
        "band_cross"
    }

    fn required_lookback(&self) -> usize {
        self.band_a_period.max(self.band_b_period).max(2)
    }

    fn entry(&self, snapshot: &IndicatorSnapshot) -> EntryVerdict {
        self.entry_verdict(snapshot).unwrap_or(EntryVerdict::None)
    }

    fn exit(
        &self,
        direction: Direction,
        _snapshot: &IndicatorSnapshot,
        market: &dyn MarketView,
    ) -> ExitDecision {
        let fraction = self.trailing_percent / dec!(100);
        let stop_price = match direction {
            Direction::Long => {
                let low = market.current_bar_low();
                low * (Decimal::ONE - fraction)
            }
            Direction::Short => {
                let high = market.current_bar_high();
                high * (Decimal::ONE + fraction)
            }
        };
        ExitDecision::TrailStop { stop_price }
    }
}
