use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rules::catalog::Archetype;

pub const MAX_EXHAUSTION: f32 = 100.0;

/// Per-agent mental energy pool.
///
/// Invariants held at every observation point:
/// `0 <= current_focus <= max_focus` and `0 <= exhaustion_level <= 100`.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPool {
    pub current_focus: f32,
    pub max_focus: f32,
    pub base_regen_rate: f32,
    pub current_regen_rate: f32,
    pub total_drain_rate: f32,
    pub exhaustion_level: f32,
    pub is_incapacitated: bool,
    pub is_breakdown_risk: bool,
    pub primary_archetype: Archetype,
}

impl FocusPool {
    /// A full, rested pool.
    pub fn new(max_focus: f32, base_regen_rate: f32, primary_archetype: Archetype) -> Self {
        let max_focus = max_focus.max(1.0);
        let base_regen_rate = base_regen_rate.max(0.0);
        Self {
            current_focus: max_focus,
            max_focus,
            base_regen_rate,
            current_regen_rate: base_regen_rate,
            total_drain_rate: 0.0,
            exhaustion_level: 0.0,
            is_incapacitated: false,
            is_breakdown_risk: false,
            primary_archetype,
        }
    }

    /// Pool sized from the agent's primary stat or skill: 50 focus plus one per
    /// point, regenerating 1/s plus one per 25 points.
    pub fn from_attribute(primary_archetype: Archetype, value: f32) -> Self {
        let value = value.clamp(0.0, 100.0);
        Self::new(50.0 + value, 1.0 + value / 25.0, primary_archetype)
    }

    pub fn focus_percent(&self) -> f32 {
        if self.max_focus <= 0.0 {
            return 0.0;
        }
        self.current_focus / self.max_focus
    }

    pub fn set_focus(&mut self, value: f32) {
        self.current_focus = value.clamp(0.0, self.max_focus);
    }

    pub fn add_exhaustion(&mut self, delta: f32) {
        self.exhaustion_level = (self.exhaustion_level + delta).clamp(0.0, MAX_EXHAUSTION);
    }

    pub fn can_afford(&self, amount: f32) -> bool {
        self.current_focus >= amount
    }

    /// Deducts `amount` if the pool can cover it.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.set_focus(self.current_focus - amount);
        true
    }
}

/// Bookkeeping for the exhaustion state machine.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusRecovery {
    pub incapacitated_at_tick: Option<u64>,
    pub min_recovery_ticks: u64,
    pub breakdown_risk_since: Option<u64>,
}

impl FocusRecovery {
    pub fn ticks_incapacitated(&self, tick: u64) -> u64 {
        self.incapacitated_at_tick
            .map(|start| tick.saturating_sub(start))
            .unwrap_or(0)
    }
}

/// Tag present while exhaustion sits at or above the breakdown threshold.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BreakdownRisk;

/// Tag present while the agent is incapacitated.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Incapacitated;
