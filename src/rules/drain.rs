use crate::components::abilities::ActiveAbilities;
use crate::components::focus::FocusPool;
use crate::core::config::FocusConfig;
use crate::rules::catalog::AbilityId;
use crate::rules::cost::CostType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryReason {
    /// The pool could not cover this tick's upkeep or action charge.
    InsufficientFocus,
    DurationElapsed,
    /// Cancelled on entering incapacitation.
    Incapacitated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub ability_id: AbilityId,
    pub reason: ExpiryReason,
}

/// Resting doubles regeneration, but any active drain caps the multiplier at
/// the combat rate, even while resting.
pub fn regen_multiplier(resting: bool, total_drain_rate: f32, config: &FocusConfig) -> f32 {
    let mut multiplier = 1.0;
    if resting {
        multiplier *= config.idle_regen_multiplier;
    }
    if total_drain_rate > 0.0 {
        multiplier = f32::min(multiplier, config.combat_regen_multiplier);
    }
    multiplier
}

/// One drain and regeneration step of `dt` seconds. Toggles pay their upkeep
/// entry by entry, then the pool moves by the net of regeneration and total
/// drain. Incapacitated pools are left alone.
pub fn drain_and_regenerate(
    pool: &mut FocusPool,
    ledger: &mut ActiveAbilities,
    resting: bool,
    dt: f32,
    config: &FocusConfig,
) -> Vec<Expiry> {
    let mut expired = Vec::new();
    if pool.is_incapacitated {
        return expired;
    }

    ledger.retain(|entry| {
        if entry.cost_type == CostType::PerSecond {
            let drain = entry.drain_rate * dt;
            if pool.current_focus < drain {
                expired.push(Expiry {
                    ability_id: entry.ability_id,
                    reason: ExpiryReason::InsufficientFocus,
                });
                return false;
            }
            pool.current_focus -= drain;
        }
        if !entry.is_toggle && entry.remaining_duration > 0.0 {
            entry.remaining_duration -= dt;
            if entry.remaining_duration <= 0.0 {
                expired.push(Expiry {
                    ability_id: entry.ability_id,
                    reason: ExpiryReason::DurationElapsed,
                });
                return false;
            }
        }
        true
    });

    pool.total_drain_rate = ledger.per_second_drain();
    pool.current_regen_rate =
        pool.base_regen_rate * regen_multiplier(resting, pool.total_drain_rate, config);
    let net = (pool.current_regen_rate - pool.total_drain_rate) * dt;
    pool.set_focus(pool.current_focus + net);
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::abilities::ActiveAbility;
    use crate::rules::catalog::{AbilityEffect, Archetype, Tradeoff};

    const DT: f32 = 1.0 / 30.0;

    fn toggle(ability_id: AbilityId, drain_rate: f32) -> ActiveAbility {
        ActiveAbility {
            ability_id,
            archetype: Archetype::Physique,
            cost_type: CostType::PerSecond,
            drain_rate,
            remaining_duration: 0.0,
            effect_magnitude: 0.2,
            activation_tick: 0,
            is_toggle: true,
            effect: AbilityEffect::DamageReduction,
            tradeoff: Tradeoff::IDENTITY,
            use_cost: drain_rate,
        }
    }

    fn timed(ability_id: AbilityId, seconds: f32) -> ActiveAbility {
        ActiveAbility {
            ability_id,
            archetype: Archetype::Physique,
            cost_type: CostType::Burst,
            drain_rate: 0.0,
            remaining_duration: seconds,
            effect_magnitude: 0.5,
            activation_tick: 0,
            is_toggle: false,
            effect: AbilityEffect::DamageReduction,
            tradeoff: Tradeoff::IDENTITY,
            use_cost: 25.0,
        }
    }

    #[test]
    fn resting_doubles_regen_without_drain() {
        let config = FocusConfig::default();
        assert_eq!(regen_multiplier(false, 0.0, &config), 1.0);
        assert_eq!(regen_multiplier(true, 0.0, &config), 2.0);
    }

    #[test]
    fn active_drain_suppresses_idle_bonus() {
        let config = FocusConfig::default();
        assert_eq!(regen_multiplier(true, 6.0, &config), 0.5);
        assert_eq!(regen_multiplier(false, 1.0, &config), 0.5);
    }

    #[test]
    fn idle_pool_regenerates_and_clamps() {
        let config = FocusConfig::default();
        let mut pool = FocusPool::new(100.0, 3.0, Archetype::Physique);
        pool.set_focus(99.95);
        let mut ledger = ActiveAbilities::default();
        drain_and_regenerate(&mut pool, &mut ledger, true, DT, &config);
        assert_eq!(pool.current_focus, 100.0);
        assert_eq!(pool.current_regen_rate, 6.0);
        assert_eq!(pool.total_drain_rate, 0.0);
    }

    #[test]
    fn toggle_pays_upkeep_and_net_drain() {
        let config = FocusConfig::default();
        let mut pool = FocusPool::new(100.0, 3.0, Archetype::Physique);
        let mut ledger = ActiveAbilities::default();
        ledger.push(toggle(AbilityId::IronSkin, 6.0));
        for _ in 0..150 {
            drain_and_regenerate(&mut pool, &mut ledger, true, DT, &config);
        }
        // Per second: 6 upkeep plus (1.5 regen - 6 drain) net.
        assert!((pool.current_focus - (100.0 - 10.5 * 5.0)).abs() < 0.05);
        assert_eq!(pool.current_regen_rate, 1.5);
        assert!(ledger.has_active(AbilityId::IronSkin));
    }

    #[test]
    fn toggle_expires_when_pool_cannot_cover_upkeep() {
        let config = FocusConfig::default();
        let mut pool = FocusPool::new(100.0, 0.0, Archetype::Physique);
        pool.set_focus(0.1);
        let mut ledger = ActiveAbilities::default();
        ledger.push(toggle(AbilityId::Berserk, 8.0));
        let expired = drain_and_regenerate(&mut pool, &mut ledger, false, DT, &config);
        assert_eq!(
            expired,
            vec![Expiry {
                ability_id: AbilityId::Berserk,
                reason: ExpiryReason::InsufficientFocus
            }]
        );
        assert!(ledger.is_empty());
        assert_eq!(pool.total_drain_rate, 0.0);
        assert!((pool.current_focus - 0.1).abs() < 1e-6);
    }

    #[test]
    fn timed_entry_expires_after_duration() {
        let config = FocusConfig::default();
        let mut pool = FocusPool::new(100.0, 1.0, Archetype::Physique);
        let mut ledger = ActiveAbilities::default();
        ledger.push(timed(AbilityId::Bulwark, 1.0));
        let mut expiries = Vec::new();
        for _ in 0..31 {
            expiries.extend(drain_and_regenerate(&mut pool, &mut ledger, false, DT, &config));
        }
        assert_eq!(expiries.len(), 1);
        assert_eq!(expiries[0].reason, ExpiryReason::DurationElapsed);
        assert!(ledger.is_empty());
    }

    #[test]
    fn incapacitated_pool_is_skipped() {
        let config = FocusConfig::default();
        let mut pool = FocusPool::new(100.0, 3.0, Archetype::Physique);
        pool.set_focus(10.0);
        pool.is_incapacitated = true;
        let mut ledger = ActiveAbilities::default();
        drain_and_regenerate(&mut pool, &mut ledger, true, DT, &config);
        assert_eq!(pool.current_focus, 10.0);
    }
}
