//! Strategy configuration — immutable per run, validated before any bar.
//!
//! Invalid configurations are rejected at construction or reconfiguration
//! time, never discovered mid-evaluation. Regime and sizing mode are closed
//! enums, so non-enumerated strings fail at parse time.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Asset name selecting the portfolio's primary equity for
/// percent-of-deposit sizing.
pub const PRIMARY_ASSET: &str = "Prime";

/// Enabled/disabled and directional-restriction mode of a strategy instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Off,
    On,
    OnlyLong,
    OnlyShort,
    OnlyClosePosition,
}

/// How the sizing magnitude is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeMode {
    Contracts,
    ContractCurrency,
    DepositPercent,
}

/// Live venue rounding vs. simulation rounding for sized volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    Live,
    Simulation,
}

/// Signal-rule variant plus its indicator periods.
///
/// Periods select the snapshot series the evaluator reads, using the
/// `{prefix}_{period}` naming convention (e.g. `ma_10`, `bears_20`,
/// `band_a_26`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyVariant {
    /// Three-line trend ordering confirmed by two bounded oscillators.
    TrendMomentum {
        fast_period: usize,
        middle_period: usize,
        slow_period: usize,
        bears_period: usize,
        bulls_period: usize,
    },
    /// Dual-band crossover entries with a percent trailing exit.
    BandCross {
        band_a_period: usize,
        band_b_period: usize,
        trailing_percent: Decimal,
    },
}

impl Default for StrategyVariant {
    fn default() -> Self {
        Self::TrendMomentum {
            fast_period: 10,
            middle_period: 20,
            slow_period: 30,
            bears_period: 20,
            bulls_period: 20,
        }
    }
}

/// Complete configuration of one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub regime: Regime,
    /// Slippage tolerance in price-step multiples, added to limit prices.
    pub slippage_steps: Decimal,
    /// Trading window, inclusive at both ends.
    pub start_trade_time: NaiveTime,
    pub end_trade_time: NaiveTime,
    pub volume_mode: VolumeMode,
    /// Sizing magnitude: contracts, currency amount, or percent of deposit,
    /// depending on `volume_mode`.
    pub volume: Decimal,
    /// Asset whose balance backs percent-of-deposit sizing;
    /// [`PRIMARY_ASSET`] selects the portfolio's primary equity.
    pub trade_asset: String,
    pub run_mode: RunMode,
    /// Volume rounding precision in simulation mode. Live mode rounds to
    /// the venue's own precision instead.
    pub sim_volume_decimals: u32,
    pub variant: StrategyVariant,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            regime: Regime::Off,
            slippage_steps: Decimal::ZERO,
            start_trade_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            end_trade_time: NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
            volume_mode: VolumeMode::DepositPercent,
            volume: dec!(20),
            trade_asset: PRIMARY_ASSET.to_string(),
            run_mode: RunMode::Simulation,
            sim_volume_decimals: 6,
            variant: StrategyVariant::default(),
        }
    }
}

/// Configuration errors, surfaced before any bar is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} must be a positive period")]
    NonPositivePeriod { name: &'static str },

    #[error("trend periods must be strictly ordered fast < middle < slow, got {fast}/{middle}/{slow}")]
    UnorderedTrendPeriods {
        fast: usize,
        middle: usize,
        slow: usize,
    },

    #[error("trailing percent must be in (0, 100), got {0}")]
    TrailingPercentOutOfRange(Decimal),

    #[error("slippage steps must be >= 0, got {0}")]
    NegativeSlippage(Decimal),

    #[error("volume magnitude must be > 0, got {0}")]
    NonPositiveVolume(Decimal),

    #[error("trade window is inverted: start {start} is after end {end}")]
    InvertedTradeWindow { start: NaiveTime, end: NaiveTime },

    #[error("trade asset name must not be empty")]
    EmptyTradeAsset,
}

impl StrategyConfig {
    /// Parse from TOML and validate in one step.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slippage_steps < Decimal::ZERO {
            return Err(ConfigError::NegativeSlippage(self.slippage_steps));
        }
        if self.volume <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveVolume(self.volume));
        }
        if self.start_trade_time > self.end_trade_time {
            return Err(ConfigError::InvertedTradeWindow {
                start: self.start_trade_time,
                end: self.end_trade_time,
            });
        }
        if self.trade_asset.is_empty() {
            return Err(ConfigError::EmptyTradeAsset);
        }

        match &self.variant {
            StrategyVariant::TrendMomentum {
                fast_period,
                middle_period,
                slow_period,
                bears_period,
                bulls_period,
            } => {
                check_period("fast_period", *fast_period)?;
                check_period("middle_period", *middle_period)?;
                check_period("slow_period", *slow_period)?;
                check_period("bears_period", *bears_period)?;
                check_period("bulls_period", *bulls_period)?;
                if !(fast_period < middle_period && middle_period < slow_period) {
                    return Err(ConfigError::UnorderedTrendPeriods {
                        fast: *fast_period,
                        middle: *middle_period,
                        slow: *slow_period,
                    });
                }
            }
            StrategyVariant::BandCross {
                band_a_period,
                band_b_period,
                trailing_percent,
            } => {
                check_period("band_a_period", *band_a_period)?;
                check_period("band_b_period", *band_b_period)?;
                if *trailing_percent <= Decimal::ZERO || *trailing_percent >= dec!(100) {
                    return Err(ConfigError::TrailingPercentOutOfRange(*trailing_percent));
                }
            }
        }

        Ok(())
    }

    /// Deterministic identity of this configuration.
    ///
    /// Canonical JSON serialization hashed with BLAKE3; struct fields
    /// serialize in declaration order, so the hash is stable across runs.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("StrategyConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn check_period(name: &'static str, period: usize) -> Result<(), ConfigError> {
    if period == 0 {
        return Err(ConfigError::NonPositivePeriod { name });
    }
    Ok(())
}
