//! Engine — position lifecycle state machine and the stop ratchet.

pub mod lifecycle;
pub mod ratchet;

pub use lifecycle::LifecycleEngine;
pub use ratchet::StopRatchet;
