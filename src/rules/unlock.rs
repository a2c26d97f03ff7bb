use serde::{Deserialize, Serialize};

use crate::rules::catalog::Archetype;

/// Unlock tiers shared by every archetype. Combat archetypes gate on a stat,
/// profession archetypes on a skill; the thresholds differ per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnlockTier {
    Novice,
    Adept,
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockRequirement {
    pub archetype: Archetype,
    pub min_value: f32,
}

const COMBAT_THRESHOLDS: [f32; 3] = [50.0, 70.0, 85.0];
const PROFESSION_THRESHOLDS: [f32; 3] = [25.0, 50.0, 75.0];

/// Effectiveness gained between the unlock threshold and a maxed stat.
const EFFECTIVENESS_SPAN: f32 = 0.5;

impl UnlockTier {
    fn index(self) -> usize {
        match self {
            UnlockTier::Novice => 0,
            UnlockTier::Adept => 1,
            UnlockTier::Master => 2,
        }
    }

    pub fn threshold(self, archetype: Archetype) -> f32 {
        if archetype.is_combat() {
            COMBAT_THRESHOLDS[self.index()]
        } else {
            PROFESSION_THRESHOLDS[self.index()]
        }
    }
}

impl UnlockRequirement {
    pub fn for_tier(archetype: Archetype, tier: UnlockTier) -> Self {
        Self {
            archetype,
            min_value: tier.threshold(archetype),
        }
    }

    pub fn is_met(&self, value: f32) -> bool {
        value >= self.min_value
    }
}

/// Scales an ability's effect by how far the stat sits above the unlock
/// threshold. Returns 0 when the ability is locked.
pub fn effectiveness_multiplier(value: f32, min_value: f32) -> f32 {
    if value < min_value {
        return 0.0;
    }
    let span = 100.0 - min_value;
    if span <= 0.0 {
        return 1.0;
    }
    let above = (value.min(100.0) - min_value) / span;
    1.0 + above * EFFECTIVENESS_SPAN
}
