use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gravity::Gravity;

/// Default number of placements between gravity resamples.
pub const DEFAULT_GRAVITY_INTERVAL: u32 = 10;

/// When gravity gets resampled. Disabled schedules keep gravity Down for the
/// whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravitySchedule {
    pub enabled: bool,
    pub interval: u32,
}

impl GravitySchedule {
    pub fn new(interval: u32) -> Self {
        GravitySchedule {
            enabled: true,
            interval,
        }
    }

    /// Fixed downward gravity.
    pub fn classic() -> Self {
        GravitySchedule {
            enabled: false,
            interval: DEFAULT_GRAVITY_INTERVAL,
        }
    }

    /// True when the placement that brought the counter to `turn` triggers
    /// a resample.
    pub fn is_change_turn(&self, turn: u32) -> bool {
        self.enabled && self.interval > 0 && turn > 0 && turn % self.interval == 0
    }

    /// Draw the next gravity if `turn` is a change turn. The draw is uniform
    /// over all four directions, so the current one may come up again.
    pub fn next_gravity<R: Rng + ?Sized>(&self, turn: u32, rng: &mut R) -> Option<Gravity> {
        if !self.is_change_turn(turn) {
            return None;
        }
        Some(Gravity::ALL[rng.random_range(0..Gravity::ALL.len())])
    }
}

impl Default for GravitySchedule {
    fn default() -> Self {
        GravitySchedule::new(DEFAULT_GRAVITY_INTERVAL)
    }
}
