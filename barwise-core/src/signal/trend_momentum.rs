//! Three-line trend ordering confirmed by two bounded oscillators.
//!
//! Entry-long needs fast > middle > slow plus the bears oscillator negative
//! but rising and the bulls oscillator positive and rising; entry-short is
//! the mirror. Exit uses only the fast/slow cross against the position —
//! momentum gates entries, trend reversal alone forces exits.

use rust_decimal::Decimal;

use crate::domain::{Direction, MarketView};
use crate::snapshot::IndicatorSnapshot;

use super::{EntryVerdict, ExitDecision, SignalEvaluator};

/// Trend + momentum signal rules.
///
/// # Snapshot dependencies
/// - Trend lines: `ma_{fast}`, `ma_{middle}`, `ma_{slow}` (current value).
/// - Oscillators: `bears_{period}`, `bulls_{period}` (current and previous).
#[derive(Debug, Clone)]
pub struct TrendMomentum {
    pub fast_period: usize,
    pub middle_period: usize,
    pub slow_period: usize,
    pub bears_period: usize,
    pub bulls_period: usize,
    fast_key: String,
    middle_key: String,
    slow_key: String,
    bears_key: String,
    bulls_key: String,
}

impl TrendMomentum {
    pub fn new(
        fast_period: usize,
        middle_period: usize,
        slow_period: usize,
        bears_period: usize,
        bulls_period: usize,
    ) -> Self {
        assert!(fast_period >= 1, "fast_period must be >= 1");
        assert!(
            middle_period > fast_period,
            "middle_period must be > fast_period"
        );
        assert!(
            slow_period > middle_period,
            "slow_period must be > middle_period"
        );
        assert!(bears_period >= 1, "bears_period must be >= 1");
        assert!(bulls_period >= 1, "bulls_period must be >= 1");

        Self {
            fast_period,
            middle_period,
            slow_period,
            bears_period,
            bulls_period,
            fast_key: format!("ma_{fast_period}"),
            middle_key: format!("ma_{middle_period}"),
            slow_key: format!("ma_{slow_period}"),
            bears_key: format!("bears_{bears_period}"),
            bulls_key: format!("bulls_{bulls_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(10, 20, 30, 20, 20)
    }

    fn entry_verdict(&self, snapshot: &IndicatorSnapshot) -> Option<EntryVerdict> {
        let fast = snapshot.current(&self.fast_key)?;
        let middle = snapshot.current(&self.middle_key)?;
        let slow = snapshot.current(&self.slow_key)?;
        let bears = snapshot.current(&self.bears_key)?;
        let prev_bears = snapshot.previous(&self.bears_key)?;
        let bulls = snapshot.current(&self.bulls_key)?;
        let prev_bulls = snapshot.previous(&self.bulls_key)?;

        // Long: uptrend ordering, bears still negative but recovering,
        // bulls positive and strengthening.
        if fast > middle
            && middle > slow
            && bears < Decimal::ZERO
            && bears > prev_bears
            && bulls > Decimal::ZERO
            && bulls > prev_bulls
        {
            return Some(EntryVerdict::EnterLong);
        }

        // Short: downtrend ordering, bulls still positive but fading,
        // bears negative and deepening.
        if fast < middle
            && middle < slow
            && bulls > Decimal::ZERO
            && bulls < prev_bulls
            && bears < Decimal::ZERO
            && bears < prev_bears
        {
            return Some(EntryVerdict::EnterShort);
        }

        Some(EntryVerdict::None)
    }
}

impl SignalEvaluator for TrendMomentum {
    fn name(&self) -> &str {
        "trend_momentum"
    }

    fn required_lookback(&self) -> usize {
        self.slow_period
            .max(self.bears_period)
            .max(self.bulls_period)
            .max(2)
    }

    fn entry(&self, snapshot: &IndicatorSnapshot) -> EntryVerdict {
        self.entry_verdict(snapshot).unwrap_or(EntryVerdict::None)
    }

    fn exit(
        &self,
        direction: Direction,
        snapshot: &IndicatorSnapshot,
        _market: &dyn MarketView,
    ) -> ExitDecision {
        let (Some(fast), Some(slow)) = (
            snapshot.current(&self.fast_key),
            snapshot.current(&self.slow_key),
        ) else {
            return ExitDecision::Hold;
        };

        let crossed_against = match direction {
            Direction::Long => fast < slow,
            Direction::Short => fast > slow,
        };

        if crossed_against {
            ExitDecision::CloseAtLimit
        } else {
            ExitDecision::Hold
        }
    }
}
