use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregated modifiers read by crafting, gathering, healing, teaching and
/// refining resolution. Recomputed every tick; never persisted.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfessionModifierSet {
    pub speed: f32,
    pub quality: f32,
    pub waste: f32,
    pub target_count: f32,
    pub per_target_effectiveness: f32,
    pub bonus_chance: f32,
    pub xp: f32,
    pub duration: f32,
}

impl ProfessionModifierSet {
    pub const SPEED_BOUNDS: (f32, f32) = (0.1, 5.0);
    pub const QUALITY_BOUNDS: (f32, f32) = (0.3, 2.0);
    pub const WASTE_BOUNDS: (f32, f32) = (0.1, 2.0);
    pub const TARGET_COUNT_BOUNDS: (f32, f32) = (1.0, 5.0);
    pub const PER_TARGET_BOUNDS: (f32, f32) = (0.2, 1.0);
    pub const BONUS_CHANCE_BOUNDS: (f32, f32) = (0.0, 0.5);
    pub const XP_BOUNDS: (f32, f32) = (0.5, 3.0);
    pub const DURATION_BOUNDS: (f32, f32) = (0.25, 4.0);

    pub fn neutral() -> Self {
        Self {
            speed: 1.0,
            quality: 1.0,
            waste: 1.0,
            target_count: 1.0,
            per_target_effectiveness: 1.0,
            bonus_chance: 0.0,
            xp: 1.0,
            duration: 1.0,
        }
    }

    /// Clamps every multiplier into its bound. `max_targets` may only tighten
    /// the target-count ceiling.
    pub fn clamped(self, max_targets: f32) -> Self {
        let (min_targets, cap_targets) = Self::TARGET_COUNT_BOUNDS;
        let cap_targets = cap_targets.min(max_targets.max(min_targets));
        Self {
            speed: clamp_to(self.speed, Self::SPEED_BOUNDS),
            quality: clamp_to(self.quality, Self::QUALITY_BOUNDS),
            waste: clamp_to(self.waste, Self::WASTE_BOUNDS),
            target_count: self.target_count.clamp(min_targets, cap_targets),
            per_target_effectiveness: clamp_to(
                self.per_target_effectiveness,
                Self::PER_TARGET_BOUNDS,
            ),
            bonus_chance: clamp_to(self.bonus_chance, Self::BONUS_CHANCE_BOUNDS),
            xp: clamp_to(self.xp, Self::XP_BOUNDS),
            duration: clamp_to(self.duration, Self::DURATION_BOUNDS),
        }
    }

    /// Whole number of targets an action reaches.
    pub fn targets(&self) -> u32 {
        self.target_count.floor().max(1.0) as u32
    }

    /// Maps a base item quality through the quality multiplier into
    /// `[min_quality, max_quality]`.
    pub fn scaled_quality(&self, base_quality: f32, min_quality: f32, max_quality: f32) -> f32 {
        (base_quality * self.quality).clamp(min_quality, max_quality)
    }
}

impl Default for ProfessionModifierSet {
    fn default() -> Self {
        Self::neutral()
    }
}

fn clamp_to(value: f32, bounds: (f32, f32)) -> f32 {
    value.clamp(bounds.0, bounds.1)
}
