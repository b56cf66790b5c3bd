//! Read-only projection of positions owned by the execution collaborator.
//!
//! The engine never creates or destroys positions — it emits intents, the
//! collaborator fulfills them, and the resulting state becomes visible here
//! on the next bar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the execution collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub u64);

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

/// Lifecycle state reported by the execution collaborator.
///
/// The engine acts only on `Open`; anything else is already in the
/// collaborator's hands (being opened, being closed, or finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Opening,
    Open,
    Closing,
    Done,
}

impl PositionState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// One open position as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionView {
    pub id: PositionId,
    pub direction: Direction,
    pub state: PositionState,
    /// Volume still open; close intents cover it in full.
    pub open_volume: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn only_open_state_is_open() {
        assert!(PositionState::Open.is_open());
        assert!(!PositionState::Opening.is_open());
        assert!(!PositionState::Closing.is_open());
        assert!(!PositionState::Done.is_open());
    }

    #[test]
    fn position_view_serialization_roundtrip() {
        let view = PositionView {
            id: PositionId(7),
            direction: Direction::Short,
            state: PositionState::Open,
            open_volume: dec!(2.5),
        };
        let json = serde_json::to_string(&view).unwrap();
        let deser: PositionView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, deser);
    }
}
