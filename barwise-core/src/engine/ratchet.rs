//! Tighten-only stop guard.
//!
//! A replacement trailing stop may move toward the position (tighten) but
//! never away from it: long stops only rise, short stops only fall. Without
//! this clamp a shallower bar would widen the stop and give back profit the
//! trail had already locked in.

use rust_decimal::Decimal;

use crate::domain::Direction;

/// Per-position stop level with the tighten-only invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRatchet {
    direction: Direction,
    level: Option<Decimal>,
}

impl StopRatchet {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            level: None,
        }
    }

    /// Clamp a proposed stop against the current level.
    ///
    /// The first proposal initializes the level; afterwards longs take the
    /// max and shorts the min of current and proposed.
    pub fn apply(&mut self, proposed: Decimal) -> Decimal {
        let clamped = match self.level {
            None => proposed,
            Some(current) => match self.direction {
                Direction::Long => current.max(proposed),
                Direction::Short => current.min(proposed),
            },
        };
        self.level = Some(clamped);
        clamped
    }

    pub fn level(&self) -> Option<Decimal> {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn long_stop_tightens_up() {
        let mut ratchet = StopRatchet::new(Direction::Long);
        assert_eq!(ratchet.apply(dec!(95)), dec!(95));
        assert_eq!(ratchet.apply(dec!(100)), dec!(100));
    }

    #[test]
    fn long_stop_never_loosens() {
        let mut ratchet = StopRatchet::new(Direction::Long);
        ratchet.apply(dec!(100));
        assert_eq!(ratchet.apply(dec!(90)), dec!(100));
        assert_eq!(ratchet.level(), Some(dec!(100)));
    }

    #[test]
    fn short_stop_tightens_down() {
        let mut ratchet = StopRatchet::new(Direction::Short);
        assert_eq!(ratchet.apply(dec!(105)), dec!(105));
        assert_eq!(ratchet.apply(dec!(100)), dec!(100));
    }

    #[test]
    fn short_stop_never_loosens() {
        let mut ratchet = StopRatchet::new(Direction::Short);
        ratchet.apply(dec!(100));
        assert_eq!(ratchet.apply(dec!(110)), dec!(100));
    }

    #[test]
    fn repeated_apply_is_idempotent() {
        let mut ratchet = StopRatchet::new(Direction::Long);
        assert_eq!(ratchet.apply(dec!(97.02)), dec!(97.02));
        assert_eq!(ratchet.apply(dec!(97.02)), dec!(97.02));
        assert_eq!(ratchet.level(), Some(dec!(97.02)));
    }

    #[test]
    fn starts_unset() {
        let ratchet = StopRatchet::new(Direction::Long);
        assert_eq!(ratchet.level(), None);
        assert_eq!(ratchet.direction(), Direction::Long);
    }
}
