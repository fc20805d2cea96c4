//! Game clock driven by the host loop

use serde::{Deserialize, Serialize};

/// Accumulated game time in seconds
///
/// Only advances through `advance`; there is no wall-clock coupling, so
/// tests control time exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    now: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds; negative deltas are ignored
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt;
        }
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    /// Seconds elapsed since `start`, never negative
    pub fn since(&self, start: f32) -> f32 {
        (self.now - start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut clock = GameClock::new();
        clock.advance(0.5);
        clock.advance(1.5);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = GameClock::new();
        clock.advance(1.0);
        clock.advance(-3.0);
        assert_eq!(clock.now(), 1.0);
        assert_eq!(clock.since(0.25), 0.75);
        assert_eq!(clock.since(5.0), 0.0);
    }
}
