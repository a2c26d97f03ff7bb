use crate::components::abilities::{AbilityActivationRequest, ActiveAbilities, ActiveAbility};
use crate::components::agent::{stat_for, CombatStats, ProfessionSkills};
use crate::components::focus::FocusPool;
use crate::core::config::ProfessionFocusConfig;
use crate::rules::catalog::{AbilityCatalog, AbilityDefinition, AbilityId, Archetype};
use crate::rules::cost::CostType;
use crate::rules::unlock::effectiveness_multiplier;

/// Why a request was dropped. Drops are silent in gameplay terms; the reason
/// only surfaces through diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NoAbility,
    UnknownAbility,
    Incapacitated,
    Locked,
    NotEnoughFocus,
    AlreadyActive,
    LedgerFull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    Activated {
        ability_id: AbilityId,
        magnitude: f32,
        /// Focus paid up front (burst abilities only).
        focus_spent: f32,
    },
    ToggledOff {
        ability_id: AbilityId,
    },
    /// Toggle-off for an ability that was not active.
    NothingToCancel {
        ability_id: AbilityId,
    },
    Rejected {
        ability_id: AbilityId,
        reason: RejectReason,
    },
}

#[derive(Debug)]
pub struct ActivationContext<'a> {
    pub pool: &'a mut FocusPool,
    pub ledger: &'a mut ActiveAbilities,
    pub stats: &'a CombatStats,
    pub skills: &'a ProfessionSkills,
    pub tick: u64,
}

/// Checks eligibility, affordability and re-entrancy without mutating state.
/// Returns the definition and the effectiveness multiplier to activate with.
pub fn can_activate<'c>(
    ctx: &ActivationContext,
    catalog: &'c AbilityCatalog,
    ability_id: AbilityId,
) -> Result<(&'c AbilityDefinition, f32), RejectReason> {
    if ability_id.is_none() {
        return Err(RejectReason::NoAbility);
    }
    let definition = catalog
        .get(ability_id)
        .ok_or(RejectReason::UnknownAbility)?;
    if ctx.pool.is_incapacitated {
        return Err(RejectReason::Incapacitated);
    }

    let stat = stat_for(definition.unlock.archetype, ctx.stats, ctx.skills);
    if !definition.unlock.is_met(stat) {
        return Err(RejectReason::Locked);
    }

    let threshold = definition
        .cost_type
        .activation_threshold(definition.base_cost);
    if !ctx.pool.can_afford(threshold) {
        return Err(RejectReason::NotEnoughFocus);
    }

    if definition.is_toggle && ctx.ledger.has_active(ability_id) {
        return Err(RejectReason::AlreadyActive);
    }
    if ctx.ledger.is_full() {
        return Err(RejectReason::LedgerFull);
    }

    Ok((
        definition,
        effectiveness_multiplier(stat, definition.unlock.min_value),
    ))
}

/// Runs one request through the activation state machine.
pub fn process_request(
    ctx: &mut ActivationContext,
    catalog: &AbilityCatalog,
    request: &AbilityActivationRequest,
) -> ActivationOutcome {
    let ability_id = request.ability_id;
    if ability_id.is_none() {
        return ActivationOutcome::Rejected {
            ability_id,
            reason: RejectReason::NoAbility,
        };
    }

    if request.toggle_off {
        return match ctx.ledger.remove(ability_id) {
            Some(_) => ActivationOutcome::ToggledOff { ability_id },
            None => ActivationOutcome::NothingToCancel { ability_id },
        };
    }

    let (definition, effectiveness) = match can_activate(ctx, catalog, ability_id) {
        Ok(found) => found,
        Err(reason) => return ActivationOutcome::Rejected { ability_id, reason },
    };

    let magnitude = definition.effect_magnitude * effectiveness;
    let remaining_duration = if definition.is_toggle {
        0.0
    } else {
        definition.default_duration.max(1.0)
    };

    let (drain_rate, focus_spent) = match definition.cost_type {
        CostType::Burst => {
            let paid = ctx.pool.try_spend(definition.base_cost);
            debug_assert!(paid, "burst cost exceeds the checked threshold");
            (0.0, definition.base_cost)
        }
        CostType::PerSecond => (definition.base_cost, 0.0),
        CostType::PerUse => (0.0, 0.0),
    };

    ctx.ledger.push(ActiveAbility {
        ability_id,
        archetype: definition.archetype,
        cost_type: definition.cost_type,
        drain_rate,
        remaining_duration,
        effect_magnitude: magnitude,
        activation_tick: ctx.tick,
        is_toggle: definition.is_toggle,
        effect: definition.effect,
        tradeoff: definition.tradeoff,
        use_cost: definition.base_cost,
    });

    ActivationOutcome::Activated {
        ability_id,
        magnitude,
        focus_spent,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerUseCharge {
    pub focus_spent: f32,
    pub charged: Vec<AbilityId>,
    /// Instances dropped because the pool could not pay for the action.
    pub expired: Vec<AbilityId>,
}

/// Per-use price after the skill discount: `skill_cost_reduction` per ten
/// skill points, never below half price.
pub fn per_use_cost(base_cost: f32, skill: f32, skill_cost_reduction: f32) -> f32 {
    let steps = (skill.clamp(0.0, 100.0) / 10.0).floor();
    base_cost * (1.0 - skill_cost_reduction * steps).max(0.5)
}

/// Charges every active per-use ability of `archetype` for one action.
pub fn charge_per_use(
    pool: &mut FocusPool,
    ledger: &mut ActiveAbilities,
    archetype: Archetype,
    skill: f32,
    config: &ProfessionFocusConfig,
) -> PerUseCharge {
    let mut charge = PerUseCharge::default();
    if pool.is_incapacitated {
        return charge;
    }
    ledger.retain(|entry| {
        if entry.cost_type != CostType::PerUse || entry.archetype != archetype {
            return true;
        }
        let cost = per_use_cost(entry.use_cost, skill, config.skill_cost_reduction);
        if pool.try_spend(cost) {
            charge.focus_spent += cost;
            charge.charged.push(entry.ability_id);
            true
        } else {
            charge.expired.push(entry.ability_id);
            false
        }
    });
    charge
}
