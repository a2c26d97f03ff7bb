use serde::{Deserialize, Serialize};

use crate::components::abilities::ActiveAbilities;
use crate::rules::catalog::AbilityEffect;

fn channel_total(ledger: &ActiveAbilities, effect: AbilityEffect) -> f32 {
    ledger
        .iter()
        .filter(|entry| entry.effect == effect)
        .map(|entry| entry.effect_magnitude)
        .sum()
}

pub fn attack_speed_multiplier(ledger: &ActiveAbilities) -> f32 {
    1.0 + channel_total(ledger, AbilityEffect::AttackSpeed)
}

pub fn damage_reduction(ledger: &ActiveAbilities) -> f32 {
    channel_total(ledger, AbilityEffect::DamageReduction).clamp(0.0, 0.9)
}

pub fn dodge_bonus(ledger: &ActiveAbilities) -> f32 {
    channel_total(ledger, AbilityEffect::Dodge).clamp(0.0, 0.75)
}

pub fn crit_bonus(ledger: &ActiveAbilities) -> f32 {
    channel_total(ledger, AbilityEffect::Critical).clamp(0.0, 1.0)
}

pub fn cooldown_reduction(ledger: &ActiveAbilities) -> f32 {
    channel_total(ledger, AbilityEffect::CooldownReduction).clamp(0.0, 0.75)
}

pub fn mana_regen_multiplier(ledger: &ActiveAbilities) -> f32 {
    1.0 + channel_total(ledger, AbilityEffect::ManaRegen)
}

/// Snapshot of every combat channel for the combat resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatModifiers {
    pub attack_speed: f32,
    pub damage_reduction: f32,
    pub dodge: f32,
    pub crit: f32,
    pub cooldown_reduction: f32,
    pub mana_regen: f32,
}

impl CombatModifiers {
    pub fn from_ledger(ledger: &ActiveAbilities) -> Self {
        Self {
            attack_speed: attack_speed_multiplier(ledger),
            damage_reduction: damage_reduction(ledger),
            dodge: dodge_bonus(ledger),
            crit: crit_bonus(ledger),
            cooldown_reduction: cooldown_reduction(ledger),
            mana_regen: mana_regen_multiplier(ledger),
        }
    }
}

impl Default for CombatModifiers {
    fn default() -> Self {
        Self::from_ledger(&ActiveAbilities::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::abilities::ActiveAbility;
    use crate::rules::catalog::{AbilityId, Archetype, Tradeoff};
    use crate::rules::cost::CostType;

    fn entry(ability_id: AbilityId, effect: AbilityEffect, magnitude: f32) -> ActiveAbility {
        ActiveAbility {
            ability_id,
            archetype: Archetype::Physique,
            cost_type: CostType::PerSecond,
            drain_rate: 3.0,
            remaining_duration: 0.0,
            effect_magnitude: magnitude,
            activation_tick: 0,
            is_toggle: true,
            effect,
            tradeoff: Tradeoff::IDENTITY,
            use_cost: 3.0,
        }
    }

    #[test]
    fn idle_ledger_is_neutral() {
        let modifiers = CombatModifiers::default();
        assert_eq!(modifiers.attack_speed, 1.0);
        assert_eq!(modifiers.damage_reduction, 0.0);
        assert_eq!(modifiers.mana_regen, 1.0);
    }

    #[test]
    fn channels_sum_and_clamp() {
        let mut ledger = ActiveAbilities::default();
        ledger.push(entry(AbilityId::IronSkin, AbilityEffect::DamageReduction, 0.6));
        ledger.push(entry(AbilityId::Bulwark, AbilityEffect::DamageReduction, 0.5));
        ledger.push(entry(AbilityId::Lunge, AbilityEffect::AttackSpeed, 0.3));
        let modifiers = CombatModifiers::from_ledger(&ledger);
        assert_eq!(modifiers.damage_reduction, 0.9);
        assert!((modifiers.attack_speed - 1.3).abs() < 1e-6);
        assert_eq!(modifiers.dodge, 0.0);
    }
}
