//! Collaborator views — state the engine reads but does not own.
//!
//! Both views are synchronous: the caller materializes balances and quotes
//! before the bar-close call, so nothing here blocks or suspends.

use rust_decimal::Decimal;

/// Portfolio balances, supplied by the account collaborator.
pub trait PortfolioView {
    /// The portfolio's primary equity value.
    fn primary_equity(&self) -> Decimal;

    /// Balance of a named asset in the per-asset position list, if present.
    fn asset_balance(&self, name: &str) -> Option<Decimal>;
}

/// Venue parameters and current-bar market data.
pub trait MarketView {
    fn best_ask(&self) -> Decimal;
    fn best_bid(&self) -> Decimal;

    /// Minimum price increment for the instrument.
    fn price_step(&self) -> Decimal;

    fn last_close(&self) -> Decimal;
    fn current_bar_high(&self) -> Decimal;
    fn current_bar_low(&self) -> Decimal;

    /// Minimum tradable unit multiplier.
    fn lot_size(&self) -> Decimal;

    /// Volume rounding precision configured at the venue.
    fn volume_decimals(&self) -> u32;

    /// Whether the venue accounts profit per lot rather than per contract.
    fn uses_lot_for_profit(&self) -> bool;
}
