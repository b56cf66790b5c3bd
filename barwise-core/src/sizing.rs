//! Volume sizing — converts the configured mode and portfolio state into an
//! order volume.
//!
//! Sizing never errors: zero means "cannot size" and the engine skips the
//! entry. The only reported condition is a missing or empty balance, which
//! is logged as a diagnostic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::config::{RunMode, StrategyConfig, VolumeMode, PRIMARY_ASSET};
use crate::domain::{MarketView, PortfolioView};

/// Compute the entry volume for the configured sizing mode.
pub fn compute_volume(
    config: &StrategyConfig,
    market: &dyn MarketView,
    portfolio: &dyn PortfolioView,
) -> Decimal {
    match config.volume_mode {
        VolumeMode::Contracts => config.volume,
        VolumeMode::ContractCurrency => contract_currency_volume(config, market),
        VolumeMode::DepositPercent => deposit_percent_volume(config, market, portfolio),
    }
}

/// Venue precision in live mode, configured precision in simulation.
/// Banker's rounding either way.
fn round_volume(config: &StrategyConfig, market: &dyn MarketView, volume: Decimal) -> Decimal {
    let decimals = match config.run_mode {
        RunMode::Live => market.volume_decimals(),
        RunMode::Simulation => config.sim_volume_decimals,
    };
    volume.round_dp(decimals)
}

/// A venue reporting a zero or negative lot is treated as lot 1.
fn effective_lot(market: &dyn MarketView) -> Decimal {
    let lot = market.lot_size();
    if lot <= Decimal::ZERO {
        Decimal::ONE
    } else {
        lot
    }
}

fn contract_currency_volume(config: &StrategyConfig, market: &dyn MarketView) -> Decimal {
    let ask = market.best_ask();
    if ask <= Decimal::ZERO {
        warn!(%ask, "non-positive best ask, cannot size");
        return Decimal::ZERO;
    }

    let lot = effective_lot(market);
    let lot_adjusted =
        config.run_mode == RunMode::Live && market.uses_lot_for_profit() && lot > Decimal::ONE;
    let volume = if lot_adjusted {
        config.volume / (ask * lot)
    } else {
        config.volume / ask
    };

    round_volume(config, market, volume)
}

fn deposit_percent_volume(
    config: &StrategyConfig,
    market: &dyn MarketView,
    portfolio: &dyn PortfolioView,
) -> Decimal {
    let ask = market.best_ask();
    if ask <= Decimal::ZERO {
        warn!(%ask, "non-positive best ask, cannot size");
        return Decimal::ZERO;
    }

    let balance = if config.trade_asset == PRIMARY_ASSET {
        portfolio.primary_equity()
    } else {
        match portfolio.asset_balance(&config.trade_asset) {
            Some(balance) => balance,
            None => {
                warn!(asset = %config.trade_asset, "no matching asset balance in portfolio, cannot size");
                return Decimal::ZERO;
            }
        }
    };

    if balance <= Decimal::ZERO {
        warn!(asset = %config.trade_asset, %balance, "empty balance, cannot size");
        return Decimal::ZERO;
    }

    let money = balance * config.volume / dec!(100);
    let volume = money / ask / effective_lot(market);

    round_volume(config, market, volume)
}
