use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TICKS_PER_SECOND: u32 = 30;

/// Global resource tracking the fixed-step simulation timeline.
#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimClock {
    pub tick: u64,
    pub ticks_per_second: u32,
    pub day: u32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}

impl SimClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick: 0,
            ticks_per_second: ticks_per_second.max(1),
            day: 1,
        }
    }

    /// Seconds covered by one tick.
    pub fn delta_seconds(&self) -> f32 {
        1.0 / self.ticks_per_second as f32
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Pending day rollover, raised by the day-cycle collaborator.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DayCycle {
    pub rollover_pending: bool,
}

/// System: advances the clock after every other phase has run.
pub fn advance_clock_system(mut clock: ResMut<SimClock>) {
    clock.advance();
}
