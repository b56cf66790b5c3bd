//! Barwise core — bar-close decision engine for rule-based directional trading.
//!
//! On every completed bar the engine gates on regime, history and trading
//! window, consults the configured signal variant for entry and exit
//! verdicts, sizes entries through the volume policy, and emits order
//! intents for the execution collaborator. It computes no indicators and
//! owns no positions.
//!
//! - Domain types (bars, positions, intents, collaborator views)
//! - Indicator snapshot (named append-only decimal series)
//! - Strategy configuration with validation and hashing
//! - Signal evaluators (trend + momentum, band crossover)
//! - Volume sizing policy
//! - Lifecycle engine with the tighten-only stop guard

pub mod config;
pub mod domain;
pub mod engine;
pub mod signal;
pub mod sizing;
pub mod snapshot;
