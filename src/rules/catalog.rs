use std::collections::HashMap;
use std::fmt;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};

use crate::data::abilities::{AbilitySpec, ABILITY_SPECS};
use crate::rules::cost::CostType;
use crate::rules::unlock::UnlockRequirement;

/// Ability family. The first three are combat archetypes gated by stats, the
/// rest are professions gated by skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    Finesse,
    Physique,
    Arcane,
    Crafting,
    Gathering,
    Healing,
    Teaching,
    Refining,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Finesse,
        Archetype::Physique,
        Archetype::Arcane,
        Archetype::Crafting,
        Archetype::Gathering,
        Archetype::Healing,
        Archetype::Teaching,
        Archetype::Refining,
    ];

    pub fn is_combat(self) -> bool {
        matches!(
            self,
            Archetype::Finesse | Archetype::Physique | Archetype::Arcane
        )
    }

    pub fn is_profession(self) -> bool {
        !self.is_combat()
    }

    /// Ability ids are allocated in contiguous bands, one per archetype.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            100..=199 => Some(Archetype::Finesse),
            200..=299 => Some(Archetype::Physique),
            300..=399 => Some(Archetype::Arcane),
            1000..=1099 => Some(Archetype::Crafting),
            1100..=1199 => Some(Archetype::Gathering),
            1200..=1299 => Some(Archetype::Healing),
            1300..=1399 => Some(Archetype::Teaching),
            1400..=1499 => Some(Archetype::Refining),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum AbilityId {
    None = 0,

    Quickstep = 101,
    Lunge = 102,
    PrecisionStrike = 103,
    BladeDance = 104,
    ShadowStep = 105,

    IronSkin = 201,
    SecondWind = 202,
    Berserk = 203,
    Bulwark = 204,
    Unstoppable = 205,

    ManaFlow = 301,
    Quicken = 302,
    ArcaneSight = 303,
    TimeDilation = 304,
    Overchannel = 305,

    SteadyHands = 1001,
    BatchCraft = 1002,
    ThriftyCraft = 1003,
    Masterwork = 1004,
    Inspiration = 1005,

    KeenEye = 1101,
    RapidHarvest = 1102,
    CarefulHarvest = 1103,
    BountifulHarvest = 1104,

    SoothingTouch = 1201,
    Triage = 1202,
    MassHeal = 1203,
    Restoration = 1204,

    Demonstrate = 1301,
    Lecture = 1302,
    Mentor = 1303,
    MindLink = 1304,

    Purify = 1401,
    BulkRefine = 1402,
    Conserve = 1403,
    Transmute = 1404,
}

impl AbilityId {
    pub const ALL: [AbilityId; 36] = [
        AbilityId::Quickstep,
        AbilityId::Lunge,
        AbilityId::PrecisionStrike,
        AbilityId::BladeDance,
        AbilityId::ShadowStep,
        AbilityId::IronSkin,
        AbilityId::SecondWind,
        AbilityId::Berserk,
        AbilityId::Bulwark,
        AbilityId::Unstoppable,
        AbilityId::ManaFlow,
        AbilityId::Quicken,
        AbilityId::ArcaneSight,
        AbilityId::TimeDilation,
        AbilityId::Overchannel,
        AbilityId::SteadyHands,
        AbilityId::BatchCraft,
        AbilityId::ThriftyCraft,
        AbilityId::Masterwork,
        AbilityId::Inspiration,
        AbilityId::KeenEye,
        AbilityId::RapidHarvest,
        AbilityId::CarefulHarvest,
        AbilityId::BountifulHarvest,
        AbilityId::SoothingTouch,
        AbilityId::Triage,
        AbilityId::MassHeal,
        AbilityId::Restoration,
        AbilityId::Demonstrate,
        AbilityId::Lecture,
        AbilityId::Mentor,
        AbilityId::MindLink,
        AbilityId::Purify,
        AbilityId::BulkRefine,
        AbilityId::Conserve,
        AbilityId::Transmute,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        if code == 0 {
            return Some(AbilityId::None);
        }
        AbilityId::ALL.iter().copied().find(|id| id.code() == code)
    }

    pub fn is_none(self) -> bool {
        self == AbilityId::None
    }

    pub fn archetype(self) -> Option<Archetype> {
        Archetype::from_code(self.code())
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// Speed / quality / waste multipliers a profession ability trades between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub speed: f32,
    pub quality: f32,
    pub waste: f32,
}

impl Tradeoff {
    pub const IDENTITY: Tradeoff = Tradeoff::new(1.0, 1.0, 1.0);

    pub const fn new(speed: f32, quality: f32, waste: f32) -> Self {
        Self {
            speed,
            quality,
            waste,
        }
    }
}

/// Role a profession ability plays when modifiers are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfessionRole {
    /// Works several items at once.
    Batch,
    /// Precision or reinforcement: raises quality.
    Precision,
    /// Lowers material waste.
    Efficiency,
    /// Inspiration or luck: raises bonus-result chance.
    Fortune,
    /// Teaching insight: raises experience gain.
    Insight,
    /// Raises working speed.
    Tempo,
    /// Spreads the effect across targets at reduced strength each.
    MultiTarget,
    /// Shared mind: raises experience and speed.
    MindLink,
    /// Extends the duration of produced effects.
    Endurance,
}

/// Channel an ability's magnitude feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityEffect {
    AttackSpeed,
    DamageReduction,
    Dodge,
    Critical,
    CooldownReduction,
    ManaRegen,
    Profession(ProfessionRole),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub archetype: Archetype,
    pub cost_type: CostType,
    pub base_cost: f32,
    pub effect_magnitude: f32,
    /// Seconds; 0 means instant or toggle.
    pub default_duration: f32,
    pub is_toggle: bool,
    pub unlock: UnlockRequirement,
    pub tradeoff: Tradeoff,
    pub effect: AbilityEffect,
}

impl AbilityDefinition {
    fn from_spec(spec: &AbilitySpec) -> Option<Self> {
        let archetype = spec.id.archetype()?;
        let tradeoff = if archetype.is_profession() {
            spec.tradeoff
        } else {
            Tradeoff::IDENTITY
        };
        Some(Self {
            id: spec.id,
            archetype,
            cost_type: spec.cost_type,
            base_cost: spec.base_cost,
            effect_magnitude: spec.magnitude,
            default_duration: spec.duration,
            is_toggle: spec.cost_type.is_toggle(),
            unlock: UnlockRequirement::for_tier(archetype, spec.tier),
            tradeoff,
            effect: spec.effect,
        })
    }
}

/// Immutable ability lookup table, built once before the first tick.
#[derive(Resource, Debug, Clone)]
pub struct AbilityCatalog {
    definitions: HashMap<AbilityId, AbilityDefinition>,
}

impl AbilityCatalog {
    pub fn standard() -> Self {
        Self::from_specs(ABILITY_SPECS)
    }

    pub fn from_specs(specs: &[AbilitySpec]) -> Self {
        let mut definitions = HashMap::with_capacity(specs.len());
        for spec in specs {
            match AbilityDefinition::from_spec(spec) {
                Some(definition) => {
                    definitions.insert(spec.id, definition);
                }
                None => warn!("ability {} has no archetype band; skipped", spec.id),
            }
        }
        Self { definitions }
    }

    pub fn get(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.definitions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn archetype(&self, id: AbilityId) -> Option<Archetype> {
        id.archetype()
    }

    pub fn base_cost(&self, id: AbilityId) -> f32 {
        self.get(id).map(|def| def.base_cost).unwrap_or(0.0)
    }

    pub fn cost_type(&self, id: AbilityId) -> Option<CostType> {
        self.get(id).map(|def| def.cost_type)
    }

    pub fn effect_magnitude(&self, id: AbilityId) -> f32 {
        self.get(id).map(|def| def.effect_magnitude).unwrap_or(0.0)
    }

    pub fn default_duration(&self, id: AbilityId) -> f32 {
        self.get(id).map(|def| def.default_duration).unwrap_or(0.0)
    }

    pub fn is_toggle(&self, id: AbilityId) -> bool {
        self.cost_type(id) == Some(CostType::PerSecond)
    }

    pub fn unlock_requirement(&self, id: AbilityId) -> Option<UnlockRequirement> {
        self.get(id).map(|def| def.unlock)
    }

    pub fn tradeoff(&self, id: AbilityId) -> Tradeoff {
        self.get(id)
            .map(|def| def.tradeoff)
            .unwrap_or(Tradeoff::IDENTITY)
    }

    /// Ids belonging to one archetype, in ascending code order.
    pub fn abilities_for(&self, archetype: Archetype) -> Vec<AbilityId> {
        let mut ids: Vec<AbilityId> = self
            .definitions
            .values()
            .filter(|def| def.archetype == archetype)
            .map(|def| def.id)
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::unlock::UnlockTier;

    #[test]
    fn standard_catalog_covers_every_id() {
        let catalog = AbilityCatalog::standard();
        assert_eq!(catalog.len(), AbilityId::ALL.len());
        for id in AbilityId::ALL {
            assert!(catalog.get(id).is_some(), "missing {}", id);
        }
        assert!(catalog.get(AbilityId::None).is_none());
    }

    #[test]
    fn archetype_follows_id_band() {
        assert_eq!(AbilityId::Lunge.archetype(), Some(Archetype::Finesse));
        assert_eq!(AbilityId::Bulwark.archetype(), Some(Archetype::Physique));
        assert_eq!(AbilityId::Overchannel.archetype(), Some(Archetype::Arcane));
        assert_eq!(AbilityId::MassHeal.archetype(), Some(Archetype::Healing));
        assert_eq!(AbilityId::Conserve.archetype(), Some(Archetype::Refining));
        assert_eq!(AbilityId::None.archetype(), None);
        assert_eq!(Archetype::from_code(999), None);
    }

    #[test]
    fn toggles_are_exactly_per_second_abilities() {
        let catalog = AbilityCatalog::standard();
        for id in AbilityId::ALL {
            let is_per_second = catalog.cost_type(id) == Some(CostType::PerSecond);
            assert_eq!(catalog.is_toggle(id), is_per_second, "{}", id);
        }
    }

    #[test]
    fn combat_abilities_have_identity_tradeoff() {
        let catalog = AbilityCatalog::standard();
        for id in AbilityId::ALL {
            if id.archetype().map(Archetype::is_combat).unwrap_or(false) {
                assert_eq!(catalog.tradeoff(id), Tradeoff::IDENTITY);
            }
        }
        assert_eq!(catalog.tradeoff(AbilityId::None), Tradeoff::IDENTITY);
    }

    #[test]
    fn unlock_requirement_uses_archetype_thresholds() {
        let catalog = AbilityCatalog::standard();
        let requirement = catalog
            .unlock_requirement(AbilityId::ShadowStep)
            .unwrap();
        assert_eq!(requirement.archetype, Archetype::Finesse);
        assert_eq!(
            requirement.min_value,
            UnlockTier::Master.threshold(Archetype::Finesse)
        );
    }

    #[test]
    fn codes_round_trip_through_lookup() {
        assert_eq!(AbilityId::from_code(1304), Some(AbilityId::MindLink));
        assert_eq!(AbilityId::from_code(0), Some(AbilityId::None));
        assert_eq!(AbilityId::from_code(106), None);
    }

    #[test]
    fn unknown_ids_fall_back_to_neutral_values() {
        let catalog = AbilityCatalog::standard();
        assert_eq!(catalog.base_cost(AbilityId::None), 0.0);
        assert_eq!(catalog.cost_type(AbilityId::None), None);
        assert!(!catalog.is_toggle(AbilityId::None));
    }
}
