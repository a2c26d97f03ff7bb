use crate::rules::catalog::{AbilityEffect, AbilityId, ProfessionRole, Tradeoff};
use crate::rules::cost::CostType;
use crate::rules::unlock::UnlockTier;

/// Raw catalog row. The archetype is implied by the id band.
#[derive(Debug, Clone, Copy)]
pub struct AbilitySpec {
    pub id: AbilityId,
    pub cost_type: CostType,
    pub base_cost: f32,
    pub magnitude: f32,
    pub duration: f32,
    pub tier: UnlockTier,
    pub tradeoff: Tradeoff,
    pub effect: AbilityEffect,
}

const fn combat(
    id: AbilityId,
    cost_type: CostType,
    base_cost: f32,
    magnitude: f32,
    duration: f32,
    tier: UnlockTier,
    effect: AbilityEffect,
) -> AbilitySpec {
    AbilitySpec {
        id,
        cost_type,
        base_cost,
        magnitude,
        duration,
        tier,
        tradeoff: Tradeoff::IDENTITY,
        effect,
    }
}

#[allow(clippy::too_many_arguments)]
const fn profession(
    id: AbilityId,
    cost_type: CostType,
    base_cost: f32,
    magnitude: f32,
    duration: f32,
    tier: UnlockTier,
    tradeoff: Tradeoff,
    role: ProfessionRole,
) -> AbilitySpec {
    AbilitySpec {
        id,
        cost_type,
        base_cost,
        magnitude,
        duration,
        tier,
        tradeoff,
        effect: AbilityEffect::Profession(role),
    }
}

use AbilityEffect::*;
use CostType::*;
use UnlockTier::*;

pub const ABILITY_SPECS: &[AbilitySpec] = &[
    // Finesse
    combat(AbilityId::Quickstep, PerSecond, 4.0, 0.2, 0.0, Novice, Dodge),
    combat(AbilityId::Lunge, Burst, 15.0, 0.3, 4.0, Novice, AttackSpeed),
    combat(AbilityId::PrecisionStrike, Burst, 20.0, 0.3, 5.0, Adept, Critical),
    combat(AbilityId::BladeDance, PerSecond, 6.0, 0.5, 0.0, Adept, AttackSpeed),
    combat(AbilityId::ShadowStep, Burst, 35.0, 0.6, 3.0, Master, Dodge),
    // Physique
    combat(AbilityId::IronSkin, PerSecond, 3.0, 0.2, 0.0, Novice, DamageReduction),
    combat(AbilityId::SecondWind, Burst, 15.0, 0.15, 6.0, Novice, DamageReduction),
    combat(AbilityId::Berserk, PerSecond, 8.0, 0.4, 0.0, Adept, AttackSpeed),
    combat(AbilityId::Bulwark, Burst, 25.0, 0.5, 6.0, Adept, DamageReduction),
    combat(AbilityId::Unstoppable, Burst, 40.0, 0.7, 4.0, Master, DamageReduction),
    // Arcane
    combat(AbilityId::ManaFlow, PerSecond, 3.0, 0.5, 0.0, Novice, ManaRegen),
    combat(AbilityId::Quicken, Burst, 20.0, 0.25, 10.0, Novice, CooldownReduction),
    combat(AbilityId::ArcaneSight, PerSecond, 5.0, 0.25, 0.0, Adept, Critical),
    combat(AbilityId::TimeDilation, Burst, 30.0, 0.5, 8.0, Adept, CooldownReduction),
    combat(AbilityId::Overchannel, PerSecond, 10.0, 2.0, 0.0, Master, ManaRegen),
    // Crafting
    profession(
        AbilityId::SteadyHands,
        PerUse,
        2.0,
        0.2,
        20.0,
        Novice,
        Tradeoff::new(0.9, 1.1, 1.0),
        ProfessionRole::Precision,
    ),
    profession(
        AbilityId::BatchCraft,
        PerUse,
        4.0,
        3.0,
        20.0,
        Novice,
        Tradeoff::new(1.2, 0.9, 1.1),
        ProfessionRole::Batch,
    ),
    profession(
        AbilityId::ThriftyCraft,
        PerSecond,
        2.0,
        0.25,
        0.0,
        Adept,
        Tradeoff::new(0.95, 1.0, 0.9),
        ProfessionRole::Efficiency,
    ),
    profession(
        AbilityId::Masterwork,
        Burst,
        30.0,
        0.5,
        30.0,
        Master,
        Tradeoff::new(0.6, 1.3, 1.2),
        ProfessionRole::Precision,
    ),
    profession(
        AbilityId::Inspiration,
        Burst,
        25.0,
        0.15,
        20.0,
        Adept,
        Tradeoff::IDENTITY,
        ProfessionRole::Fortune,
    ),
    // Gathering
    profession(
        AbilityId::KeenEye,
        PerSecond,
        2.0,
        0.1,
        0.0,
        Novice,
        Tradeoff::new(0.9, 1.1, 1.0),
        ProfessionRole::Fortune,
    ),
    profession(
        AbilityId::RapidHarvest,
        PerUse,
        3.0,
        0.3,
        15.0,
        Novice,
        Tradeoff::new(1.3, 0.85, 1.2),
        ProfessionRole::Tempo,
    ),
    profession(
        AbilityId::CarefulHarvest,
        PerUse,
        3.0,
        0.3,
        15.0,
        Adept,
        Tradeoff::new(0.8, 1.15, 0.8),
        ProfessionRole::Efficiency,
    ),
    profession(
        AbilityId::BountifulHarvest,
        Burst,
        30.0,
        2.0,
        20.0,
        Master,
        Tradeoff::new(1.0, 0.95, 1.0),
        ProfessionRole::Batch,
    ),
    // Healing
    profession(
        AbilityId::SoothingTouch,
        PerUse,
        3.0,
        0.2,
        10.0,
        Novice,
        Tradeoff::new(0.9, 1.1, 1.0),
        ProfessionRole::Precision,
    ),
    profession(
        AbilityId::Triage,
        PerSecond,
        3.0,
        0.3,
        0.0,
        Novice,
        Tradeoff::new(1.2, 0.9, 1.0),
        ProfessionRole::Tempo,
    ),
    profession(
        AbilityId::MassHeal,
        Burst,
        30.0,
        3.0,
        10.0,
        Adept,
        Tradeoff::new(0.9, 1.0, 1.1),
        ProfessionRole::MultiTarget,
    ),
    profession(
        AbilityId::Restoration,
        Burst,
        40.0,
        1.0,
        15.0,
        Master,
        Tradeoff::new(0.8, 1.25, 1.0),
        ProfessionRole::Endurance,
    ),
    // Teaching
    profession(
        AbilityId::Demonstrate,
        PerUse,
        2.0,
        0.25,
        15.0,
        Novice,
        Tradeoff::new(0.95, 1.05, 1.0),
        ProfessionRole::Insight,
    ),
    profession(
        AbilityId::Lecture,
        PerSecond,
        2.0,
        4.0,
        0.0,
        Novice,
        Tradeoff::IDENTITY,
        ProfessionRole::MultiTarget,
    ),
    profession(
        AbilityId::Mentor,
        PerUse,
        3.0,
        0.5,
        20.0,
        Adept,
        Tradeoff::new(0.9, 1.1, 1.0),
        ProfessionRole::Insight,
    ),
    profession(
        AbilityId::MindLink,
        PerSecond,
        6.0,
        1.0,
        0.0,
        Master,
        Tradeoff::IDENTITY,
        ProfessionRole::MindLink,
    ),
    // Refining
    profession(
        AbilityId::Purify,
        PerUse,
        3.0,
        0.3,
        15.0,
        Novice,
        Tradeoff::new(0.8, 1.2, 1.0),
        ProfessionRole::Precision,
    ),
    profession(
        AbilityId::BulkRefine,
        PerUse,
        4.0,
        3.0,
        15.0,
        Novice,
        Tradeoff::new(1.2, 0.9, 1.15),
        ProfessionRole::Batch,
    ),
    profession(
        AbilityId::Conserve,
        PerSecond,
        2.0,
        0.4,
        0.0,
        Adept,
        Tradeoff::new(0.9, 1.0, 0.85),
        ProfessionRole::Efficiency,
    ),
    profession(
        AbilityId::Transmute,
        Burst,
        35.0,
        0.2,
        20.0,
        Master,
        Tradeoff::new(0.7, 1.3, 0.9),
        ProfessionRole::Fortune,
    ),
];
