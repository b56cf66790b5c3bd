//! Position lifecycle engine — the one entry point called per bar-close.
//!
//! Gate order: regime, lookback, trading window. With open positions the
//! engine only ever closes or protects them; entries are considered only
//! from flat, and `OnlyClosePosition` stops after the close phase. Every
//! gating failure is quiescence, not an error: the engine returns an empty
//! intent list and waits for the next bar.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ConfigError, Regime, StrategyConfig};
use crate::domain::{
    Bar, Direction, MarketView, OrderIntent, PortfolioView, PositionId, PositionView,
};
use crate::signal::{create_evaluator, EntryVerdict, ExitDecision, SignalEvaluator};
use crate::sizing::compute_volume;
use crate::snapshot::IndicatorSnapshot;

use super::ratchet::StopRatchet;

/// Decision engine for one instrument / one position group.
///
/// Owns only its configuration, the evaluator built from it, and the
/// per-position stop ratchets; everything else is re-read from the call
/// arguments each bar, so two calls with identical inputs emit identical
/// intents.
pub struct LifecycleEngine {
    config: StrategyConfig,
    evaluator: Box<dyn SignalEvaluator>,
    /// Tighten-only stop guard per open position, pruned each bar to the
    /// ids still present in the open-position list.
    ratchets: HashMap<PositionId, StopRatchet>,
}

impl LifecycleEngine {
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = create_evaluator(&config);
        Ok(Self {
            config,
            evaluator,
            ratchets: HashMap::new(),
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Bars of history required before evaluation runs.
    pub fn required_lookback(&self) -> usize {
        self.evaluator.required_lookback()
    }

    /// Swap in a new configuration.
    ///
    /// Returns the new lookback requirement so the host can re-derive its
    /// indicator series. Stop ratchets survive reconfiguration: changing
    /// parameters must never widen a stop already in force.
    pub fn on_config_changed(&mut self, config: StrategyConfig) -> Result<usize, ConfigError> {
        config.validate()?;
        self.evaluator = create_evaluator(&config);
        self.config = config;
        Ok(self.required_lookback())
    }

    /// Evaluate one completed bar and emit order intents.
    pub fn on_bar_close(
        &mut self,
        bar: &Bar,
        snapshot: &IndicatorSnapshot,
        positions: &[PositionView],
        portfolio: &dyn PortfolioView,
        market: &dyn MarketView,
    ) -> Vec<OrderIntent> {
        if self.config.regime == Regime::Off {
            return Vec::new();
        }

        let lookback = self.evaluator.required_lookback();
        if snapshot.bar_count() < lookback {
            debug!(
                bars = snapshot.bar_count(),
                lookback, "insufficient history, skipping bar"
            );
            return Vec::new();
        }

        let time = bar.time_of_day();
        if time < self.config.start_trade_time || time > self.config.end_trade_time {
            debug!(%time, "outside trading window, skipping bar");
            return Vec::new();
        }

        self.prune_ratchets(positions);

        let mut intents = Vec::new();

        if !positions.is_empty() {
            self.close_logic(snapshot, positions, market, &mut intents);
        }

        if self.config.regime == Regime::OnlyClosePosition {
            return intents;
        }

        if positions.is_empty() {
            self.open_logic(snapshot, portfolio, market, &mut intents);
        }

        intents
    }

    fn slippage(&self, market: &dyn MarketView) -> Decimal {
        self.config.slippage_steps * market.price_step()
    }

    fn close_logic(
        &mut self,
        snapshot: &IndicatorSnapshot,
        positions: &[PositionView],
        market: &dyn MarketView,
        intents: &mut Vec<OrderIntent>,
    ) {
        let slippage = self.slippage(market);

        for position in positions {
            if !position.state.is_open() {
                continue;
            }

            match self.evaluator.exit(position.direction, snapshot, market) {
                ExitDecision::Hold => {}
                ExitDecision::CloseAtLimit => {
                    let price = match position.direction {
                        Direction::Long => market.last_close() - slippage,
                        Direction::Short => market.last_close() + slippage,
                    };
                    intents.push(OrderIntent::CloseAtLimit {
                        position_id: position.id,
                        price,
                        volume: position.open_volume,
                    });
                }
                ExitDecision::TrailStop { stop_price } => {
                    let ratchet = self
                        .ratchets
                        .entry(position.id)
                        .or_insert_with(|| StopRatchet::new(position.direction));
                    let stop_price = ratchet.apply(stop_price);
                    intents.push(OrderIntent::CloseAtTrailingStop {
                        position_id: position.id,
                        stop_price,
                    });
                }
            }
        }
    }

    fn open_logic(
        &self,
        snapshot: &IndicatorSnapshot,
        portfolio: &dyn PortfolioView,
        market: &dyn MarketView,
        intents: &mut Vec<OrderIntent>,
    ) {
        let direction = match self.evaluator.entry(snapshot) {
            EntryVerdict::None => return,
            EntryVerdict::EnterLong if self.config.regime == Regime::OnlyShort => return,
            EntryVerdict::EnterShort if self.config.regime == Regime::OnlyLong => return,
            EntryVerdict::EnterLong => Direction::Long,
            EntryVerdict::EnterShort => Direction::Short,
        };

        let volume = compute_volume(&self.config, market, portfolio);
        if volume <= Decimal::ZERO {
            debug!(%volume, "non-positive volume, entry suppressed");
            return;
        }

        let slippage = self.slippage(market);
        intents.push(match direction {
            Direction::Long => OrderIntent::Buy {
                volume,
                limit_price: market.best_ask() + slippage,
            },
            Direction::Short => OrderIntent::Sell {
                volume,
                limit_price: market.best_bid() - slippage,
            },
        });
    }

    fn prune_ratchets(&mut self, positions: &[PositionView]) {
        self.ratchets
            .retain(|id, _| positions.iter().any(|p| p.id == *id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyVariant;
    use rust_decimal_macros::dec;

    #[test]
    fn construction_validates_config() {
        let bad = StrategyConfig {
            volume: Decimal::ZERO,
            ..StrategyConfig::default()
        };
        assert!(LifecycleEngine::new(bad).is_err());
        assert!(LifecycleEngine::new(StrategyConfig::default()).is_ok());
    }

    #[test]
    fn config_change_reports_new_lookback() {
        let mut engine = LifecycleEngine::new(StrategyConfig::default()).unwrap();
        assert_eq!(engine.required_lookback(), 30);

        let band = StrategyConfig {
            variant: StrategyVariant::BandCross {
                band_a_period: 26,
                band_b_period: 52,
                trailing_percent: dec!(1.0),
            },
            ..StrategyConfig::default()
        };
        assert_eq!(engine.on_config_changed(band).unwrap(), 52);
    }

    #[test]
    fn config_change_rejects_invalid_and_keeps_current() {
        let mut engine = LifecycleEngine::new(StrategyConfig::default()).unwrap();
        let bad = StrategyConfig {
            slippage_steps: dec!(-1),
            ..StrategyConfig::default()
        };
        assert!(engine.on_config_changed(bad).is_err());
        assert_eq!(engine.required_lookback(), 30);
        assert_eq!(engine.config().slippage_steps, Decimal::ZERO);
    }
}
