use crate::components::abilities::{ActiveAbilities, ActiveAbility};
use crate::components::agent::ProfessionSkills;
use crate::components::profession::ProfessionModifierSet;
use crate::core::config::ProfessionFocusConfig;
use crate::rules::catalog::{AbilityEffect, ProfessionRole, Tradeoff};

/// Mastery softens tradeoff penalties; bonuses pass through untouched.
pub fn fold_skill(tradeoff: Tradeoff, skill: f32) -> Tradeoff {
    let softening = 1.0 - skill.clamp(0.0, 100.0) / 200.0;
    let soften_low = |value: f32| {
        if value < 1.0 {
            1.0 - (1.0 - value) * softening
        } else {
            value
        }
    };
    let soften_high = |value: f32| {
        if value > 1.0 {
            1.0 + (value - 1.0) * softening
        } else {
            value
        }
    };
    Tradeoff {
        speed: soften_low(tradeoff.speed),
        quality: soften_low(tradeoff.quality),
        waste: soften_high(tradeoff.waste),
    }
}

fn apply_role(set: &mut ProfessionModifierSet, role: ProfessionRole, magnitude: f32) {
    match role {
        ProfessionRole::Batch => set.target_count = set.target_count.max(magnitude),
        ProfessionRole::Precision => set.quality *= 1.0 + magnitude,
        ProfessionRole::Efficiency => set.waste *= 1.0 - magnitude,
        ProfessionRole::Fortune => set.bonus_chance += magnitude,
        ProfessionRole::Insight => set.xp *= 1.0 + magnitude,
        ProfessionRole::Tempo => set.speed *= 1.0 + magnitude,
        ProfessionRole::MultiTarget => {
            set.target_count = set.target_count.max(magnitude);
            if magnitude > 0.0 {
                set.per_target_effectiveness = set.per_target_effectiveness.min(1.8 / magnitude);
            }
        }
        ProfessionRole::MindLink => {
            set.xp *= 1.0 + magnitude;
            set.speed *= 1.0 + magnitude * 0.5;
        }
        ProfessionRole::Endurance => set.duration *= 1.0 + magnitude,
    }
}

fn apply_entry(set: &mut ProfessionModifierSet, entry: &ActiveAbility, skills: &ProfessionSkills) {
    let AbilityEffect::Profession(role) = entry.effect else {
        return;
    };
    let skill = skills.get(entry.archetype).unwrap_or(0.0);
    let tradeoff = fold_skill(entry.tradeoff, skill);
    set.speed *= tradeoff.speed;
    set.quality *= tradeoff.quality;
    set.waste *= tradeoff.waste;
    apply_role(set, role, entry.effect_magnitude);
}

/// Rebuilds the modifier set from scratch out of the profession entries of
/// the ledger.
pub fn aggregate(
    ledger: &ActiveAbilities,
    skills: &ProfessionSkills,
    config: &ProfessionFocusConfig,
) -> ProfessionModifierSet {
    let mut set = ProfessionModifierSet::neutral();
    for entry in ledger.iter().filter(|entry| entry.archetype.is_profession()) {
        apply_entry(&mut set, entry, skills);
    }
    set.clamped(config.max_targets)
}
