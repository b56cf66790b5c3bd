//! Signal evaluation — entry verdicts and exit decisions per strategy variant.
//!
//! Evaluators are portfolio-agnostic: they see the indicator snapshot and
//! current-bar market data, never balances or open volumes. Regime gating,
//! sizing, and stop monotonicity all belong to the engine.

pub mod band_cross;
pub mod trend_momentum;

pub use band_cross::BandCross;
pub use trend_momentum::TrendMomentum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{StrategyConfig, StrategyVariant};
use crate::domain::{Direction, MarketView};
use crate::snapshot::IndicatorSnapshot;

/// Directional verdict for opening a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryVerdict {
    None,
    EnterLong,
    EnterShort,
}

/// What to do with an open position this bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExitDecision {
    /// Keep the position as is.
    Hold,
    /// Close at a limit derived from the last close and slippage.
    CloseAtLimit,
    /// Replace the protective stop. The engine clamps it tighten-only
    /// before emitting.
    TrailStop { stop_price: Decimal },
}

/// A strategy variant's signal rules.
///
/// # Architecture invariant
/// Evaluators must never reference portfolio state. `entry` receives only
/// the snapshot; `exit` additionally receives current-bar market data for
/// trailing-stop arithmetic and the direction it must judge. If an
/// implementation needs balances or volumes, it violates the separation
/// of concerns.
pub trait SignalEvaluator: Send + Sync {
    /// Human-readable name (e.g., "trend_momentum").
    fn name(&self) -> &str;

    /// Bars required before evaluation is safe. Always at least 2, so a
    /// "previous" value exists for every referenced series.
    fn required_lookback(&self) -> usize;

    /// Entry verdict for a flat instrument.
    fn entry(&self, snapshot: &IndicatorSnapshot) -> EntryVerdict;

    /// Exit decision for an open position in `direction`.
    fn exit(
        &self,
        direction: Direction,
        snapshot: &IndicatorSnapshot,
        market: &dyn MarketView,
    ) -> ExitDecision;
}

/// Null evaluator — never enters, always holds. Test stub.
pub struct NullEvaluator;

impl SignalEvaluator for NullEvaluator {
    fn name(&self) -> &str {
        "null"
    }

    fn required_lookback(&self) -> usize {
        2
    }

    fn entry(&self, _snapshot: &IndicatorSnapshot) -> EntryVerdict {
        EntryVerdict::None
    }

    fn exit(
        &self,
        _direction: Direction,
        _snapshot: &IndicatorSnapshot,
        _market: &dyn MarketView,
    ) -> ExitDecision {
        ExitDecision::Hold
    }
}

/// Build the evaluator for the configured variant.
///
/// The configuration is validated before this is called; constructor
/// assertions only restate those invariants.
pub fn create_evaluator(config: &StrategyConfig) -> Box<dyn SignalEvaluator> {
    match &config.variant {
        StrategyVariant::TrendMomentum {
            fast_period,
            middle_period,
            slow_period,
            bears_period,
            bulls_period,
        } => Box::new(TrendMomentum::new(
            *fast_period,
            *middle_period,
            *slow_period,
            *bears_period,
            *bulls_period,
        )),
        StrategyVariant::BandCross {
            band_a_period,
            band_b_period,
            trailing_percent,
        } => Box::new(BandCross::new(
            *band_a_period,
            *band_b_period,
            *trailing_percent,
        )),
    }
}
