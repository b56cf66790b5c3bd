//! Domain types and collaborator views.

pub mod bar;
pub mod intent;
pub mod position;
pub mod views;

pub use bar::Bar;
pub use intent::OrderIntent;
pub use position::{Direction, PositionId, PositionState, PositionView};
pub use views::{MarketView, PortfolioView};
