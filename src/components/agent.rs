use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rules::catalog::Archetype;

/// Stable identifier for addressing agents externally. Also seeds the
/// breakdown roll, so it must not change across replays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Combat stats on a 0-100 scale.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub finesse: f32,
    pub physique: f32,
    pub arcane: f32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            finesse: 50.0,
            physique: 50.0,
            arcane: 50.0,
        }
    }
}

/// Profession skills on a 0-100 scale.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfessionSkills {
    pub crafting: f32,
    pub gathering: f32,
    pub healing: f32,
    pub teaching: f32,
    pub refining: f32,
}

impl Default for ProfessionSkills {
    fn default() -> Self {
        Self {
            crafting: 25.0,
            gathering: 25.0,
            healing: 25.0,
            teaching: 25.0,
            refining: 25.0,
        }
    }
}

impl CombatStats {
    pub fn get(&self, archetype: Archetype) -> Option<f32> {
        match archetype {
            Archetype::Finesse => Some(self.finesse),
            Archetype::Physique => Some(self.physique),
            Archetype::Arcane => Some(self.arcane),
            _ => None,
        }
    }
}

impl ProfessionSkills {
    pub fn get(&self, archetype: Archetype) -> Option<f32> {
        match archetype {
            Archetype::Crafting => Some(self.crafting),
            Archetype::Gathering => Some(self.gathering),
            Archetype::Healing => Some(self.healing),
            Archetype::Teaching => Some(self.teaching),
            Archetype::Refining => Some(self.refining),
            _ => None,
        }
    }
}

/// Stat or skill value an archetype's abilities are gated and scaled by.
pub fn stat_for(archetype: Archetype, stats: &CombatStats, skills: &ProfessionSkills) -> f32 {
    stats
        .get(archetype)
        .or_else(|| skills.get(archetype))
        .unwrap_or(0.0)
}

/// Marker set by the routine collaborator while the agent is resting.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Resting;
