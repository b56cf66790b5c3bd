//! Order intents — the engine's only output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::position::PositionId;

/// An instruction for the execution collaborator.
///
/// Intents are produced fresh on each bar and never retried by the engine;
/// retry and idempotence belong to the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderIntent {
    /// Open long with a limit order.
    Buy { volume: Decimal, limit_price: Decimal },
    /// Open short with a limit order.
    Sell { volume: Decimal, limit_price: Decimal },
    /// Close an open position at a limit price.
    CloseAtLimit {
        position_id: PositionId,
        price: Decimal,
        volume: Decimal,
    },
    /// Replace the trailing stop protecting an open position.
    CloseAtTrailingStop {
        position_id: PositionId,
        stop_price: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn intent_serialization_roundtrip() {
        let intents = vec![
            OrderIntent::Buy {
                volume: dec!(2),
                limit_price: dec!(101.5),
            },
            OrderIntent::Sell {
                volume: dec!(2),
                limit_price: dec!(98.5),
            },
            OrderIntent::CloseAtLimit {
                position_id: PositionId(3),
                price: dec!(99.0),
                volume: dec!(1.5),
            },
            OrderIntent::CloseAtTrailingStop {
                position_id: PositionId(4),
                stop_price: dec!(97.02),
            },
        ];
        for intent in intents {
            let json = serde_json::to_string(&intent).unwrap();
            let deser: OrderIntent = serde_json::from_str(&json).unwrap();
            assert_eq!(intent, deser);
        }
    }
}
