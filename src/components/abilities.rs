use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::agent::AgentId;
use crate::rules::catalog::{AbilityEffect, AbilityId, Archetype, Tradeoff};
use crate::rules::cost::CostType;

/// Upper bound on simultaneously active abilities per agent.
pub const MAX_ACTIVE_ABILITIES: usize = 8;

/// Ability request written by the AI collaborator. At most one per agent per
/// tick; it is removed by the activation phase whatever the outcome.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityActivationRequest {
    pub ability_id: AbilityId,
    pub target: Option<AgentId>,
    pub request_tick: u64,
    pub toggle_off: bool,
}

impl AbilityActivationRequest {
    pub fn activate(ability_id: AbilityId, request_tick: u64) -> Self {
        Self {
            ability_id,
            target: None,
            request_tick,
            toggle_off: false,
        }
    }

    pub fn cancel(ability_id: AbilityId, request_tick: u64) -> Self {
        Self {
            ability_id,
            target: None,
            request_tick,
            toggle_off: true,
        }
    }
}

/// One entry of the active-ability ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbility {
    pub ability_id: AbilityId,
    pub archetype: Archetype,
    pub cost_type: CostType,
    /// Focus per second for toggles; 0 for burst and per-use entries.
    pub drain_rate: f32,
    /// Seconds left; toggles carry 0 and never time out.
    pub remaining_duration: f32,
    /// Base magnitude scaled by effectiveness at activation.
    pub effect_magnitude: f32,
    pub activation_tick: u64,
    pub is_toggle: bool,
    pub effect: AbilityEffect,
    pub tradeoff: Tradeoff,
    /// Per-use charge before skill discounts.
    pub use_cost: f32,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbilities {
    entries: Vec<ActiveAbility>,
}

impl ActiveAbilities {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ACTIVE_ABILITIES
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveAbility> {
        self.entries.iter()
    }

    pub fn get(&self, ability_id: AbilityId) -> Option<&ActiveAbility> {
        self.entries.iter().find(|entry| entry.ability_id == ability_id)
    }

    pub fn has_active(&self, ability_id: AbilityId) -> bool {
        self.get(ability_id).is_some()
    }

    /// Summed magnitude of every live instance of the ability; 0 when inactive.
    pub fn magnitude(&self, ability_id: AbilityId) -> f32 {
        self.entries
            .iter()
            .filter(|entry| entry.ability_id == ability_id)
            .map(|entry| entry.effect_magnitude)
            .sum()
    }

    /// Appends an entry. Returns false if the ledger is full.
    pub fn push(&mut self, entry: ActiveAbility) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes the first instance of the ability.
    pub fn remove(&mut self, ability_id: AbilityId) -> Option<ActiveAbility> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.ability_id == ability_id)?;
        Some(self.entries.remove(index))
    }

    pub fn retain(&mut self, keep: impl FnMut(&mut ActiveAbility) -> bool) {
        self.entries.retain_mut(keep);
    }

    pub fn drain_all(&mut self) -> Vec<ActiveAbility> {
        std::mem::take(&mut self.entries)
    }

    /// Sum of continuous drain across toggled abilities.
    pub fn per_second_drain(&self) -> f32 {
        self.entries
            .iter()
            .filter(|entry| entry.cost_type == CostType::PerSecond)
            .map(|entry| entry.drain_rate)
            .sum()
    }
}
