use std::collections::HashMap;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::debug;
use serde::{Deserialize, Serialize};

use crate::components::abilities::{AbilityActivationRequest, ActiveAbilities};
use crate::components::agent::{stat_for, AgentId, CombatStats, ProfessionSkills, Resting};
use crate::components::focus::{FocusPool, FocusRecovery};
use crate::components::growth::{FocusGrowth, Motivation, MotivationContext};
use crate::components::profession::ProfessionModifierSet;
use crate::core::config::{FocusConfigs, FocusGrowthConfig, ProfessionFocusConfig};
use crate::core::ecs::{create_schedule, create_world};
use crate::rules::activation::charge_per_use;
use crate::rules::catalog::{AbilityCatalog, AbilityId, Archetype};
use crate::rules::combat::CombatModifiers;
use crate::rules::drain::ExpiryReason;
use crate::rules::profession::aggregate;
use crate::simulation::events::{
    FocusDiagnostics, FocusEvent, FocusEventHook, FocusEventKind, FocusEventLog,
    PendingFocusEvents,
};
use crate::simulation::growth::{attribute_bonus, daily_ratio, experience_for_action, record_focus_spent};
use crate::simulation::time::{DayCycle, SimClock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    UnknownAgent(AgentId),
    NotAProfession(Archetype),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::UnknownAgent(id) => write!(f, "no agent with id {}", id.0),
            EngineError::NotAProfession(archetype) => {
                write!(f, "{:?} is not a profession archetype", archetype)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Everything needed to spawn an agent. When no pool is given it is sized
/// from the primary archetype's stat.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub primary: Archetype,
    pub stats: CombatStats,
    pub skills: ProfessionSkills,
    pub drive_personality: f32,
    pub pool: Option<FocusPool>,
}

impl AgentSpec {
    pub fn new(primary: Archetype) -> Self {
        Self {
            primary,
            stats: CombatStats::default(),
            skills: ProfessionSkills::default(),
            drive_personality: 0.5,
            pool: None,
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_skills(mut self, skills: ProfessionSkills) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_drive(mut self, drive_personality: f32) -> Self {
        self.drive_personality = drive_personality;
        self
    }

    pub fn with_pool(mut self, pool: FocusPool) -> Self {
        self.pool = Some(pool);
        self
    }
}

impl Default for AgentSpec {
    fn default() -> Self {
        Self::new(Archetype::Finesse)
    }
}

#[derive(Bundle)]
pub struct FocusAgentBundle {
    pub id: AgentId,
    pub pool: FocusPool,
    pub recovery: FocusRecovery,
    pub ledger: ActiveAbilities,
    pub growth: FocusGrowth,
    pub motivation: MotivationContext,
    pub stats: CombatStats,
    pub skills: ProfessionSkills,
    pub modifiers: ProfessionModifierSet,
    pub events: PendingFocusEvents,
}

impl FocusAgentBundle {
    pub fn from_spec(id: AgentId, spec: AgentSpec) -> Self {
        let pool = spec.pool.unwrap_or_else(|| {
            FocusPool::from_attribute(spec.primary, stat_for(spec.primary, &spec.stats, &spec.skills))
        });
        Self {
            id,
            pool,
            recovery: FocusRecovery::default(),
            ledger: ActiveAbilities::default(),
            growth: FocusGrowth::new(spec.drive_personality),
            motivation: MotivationContext::default(),
            stats: spec.stats,
            skills: spec.skills,
            modifiers: ProfessionModifierSet::neutral(),
            events: PendingFocusEvents::default(),
        }
    }
}

#[derive(Resource, Debug)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn alloc(&mut self) -> AgentId {
        let id = self.next;
        self.next += 1;
        AgentId(id)
    }
}

/// Stable agent id to entity lookup for the façade.
#[derive(Resource, Debug, Default)]
pub struct AgentIndex(pub HashMap<AgentId, Entity>);

/// Observable per-agent state, for persistence collaborators and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFocusSnapshot {
    pub agent_id: AgentId,
    pub current_focus: f32,
    pub max_focus: f32,
    pub exhaustion_level: f32,
    pub is_incapacitated: bool,
    pub is_breakdown_risk: bool,
    pub active_abilities: Vec<AbilityId>,
    pub motivation: Motivation,
    pub total_focus_spent: f32,
    pub daily_focus_spent: f32,
    pub attribute_bonus: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfessionActionOutcome {
    pub focus_spent: f32,
    pub experience: f32,
    /// Base quality scaled by the modifier set, within the configured bounds.
    pub quality: f32,
    /// Modifiers in force for this action, after any per-use expiries.
    pub modifiers: ProfessionModifierSet,
    pub expired: Vec<AbilityId>,
}

/// Wrapper around the ECS world and schedule.
pub struct FocusEngine {
    world: World,
    schedule: Schedule,
}

impl FocusEngine {
    pub fn new(configs: FocusConfigs) -> Self {
        Self {
            world: create_world(configs),
            schedule: create_schedule(),
        }
    }

    pub fn spawn_agent(&mut self, spec: AgentSpec) -> AgentId {
        let id = self.world.resource_mut::<IdAllocator>().alloc();
        let entity = self.world.spawn(FocusAgentBundle::from_spec(id, spec)).id();
        self.world.resource_mut::<AgentIndex>().0.insert(id, entity);
        debug!("spawned agent {}", id.0);
        id
    }

    fn entity(&self, id: AgentId) -> Result<Entity, EngineError> {
        self.world
            .resource::<AgentIndex>()
            .0
            .get(&id)
            .copied()
            .ok_or(EngineError::UnknownAgent(id))
    }

    /// Queues a request for the next tick, replacing any unprocessed one.
    pub fn request_ability(
        &mut self,
        id: AgentId,
        request: AbilityActivationRequest,
    ) -> Result<(), EngineError> {
        let entity = self.entity(id)?;
        self.world.entity_mut(entity).insert(request);
        Ok(())
    }

    pub fn activate(&mut self, id: AgentId, ability_id: AbilityId) -> Result<(), EngineError> {
        let tick = self.clock().tick;
        self.request_ability(id, AbilityActivationRequest::activate(ability_id, tick))
    }

    pub fn toggle_off(&mut self, id: AgentId, ability_id: AbilityId) -> Result<(), EngineError> {
        let tick = self.clock().tick;
        self.request_ability(id, AbilityActivationRequest::cancel(ability_id, tick))
    }

    pub fn set_resting(&mut self, id: AgentId, resting: bool) -> Result<(), EngineError> {
        let entity = self.entity(id)?;
        let mut agent = self.world.entity_mut(entity);
        if resting {
            agent.insert(Resting);
        } else {
            agent.remove::<Resting>();
        }
        Ok(())
    }

    pub fn set_motivation_context(
        &mut self,
        id: AgentId,
        context: MotivationContext,
    ) -> Result<(), EngineError> {
        let entity = self.entity(id)?;
        self.world.entity_mut(entity).insert(context);
        Ok(())
    }

    /// Closes the day at the start of the next tick.
    pub fn end_day(&mut self) {
        self.world.resource_mut::<DayCycle>().rollover_pending = true;
    }

    /// Runs one fixed step and returns the events it produced.
    pub fn tick(&mut self) -> &[FocusEvent] {
        self.schedule.run(&mut self.world);
        &self.world.resource::<FocusEventLog>().0
    }

    /// Runs `count` ticks and collects every event in order.
    pub fn run_ticks(&mut self, count: u64) -> Vec<FocusEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            events.extend_from_slice(self.tick());
        }
        events
    }

    /// Charges the agent's per-use abilities of `archetype` for one action
    /// and awards experience for it. Incapacitated agents get a neutral
    /// outcome: nothing is charged and no experience is earned.
    pub fn perform_profession_action(
        &mut self,
        id: AgentId,
        archetype: Archetype,
        base_quality: f32,
    ) -> Result<ProfessionActionOutcome, EngineError> {
        if !archetype.is_profession() {
            return Err(EngineError::NotAProfession(archetype));
        }
        let entity = self.entity(id)?;
        let profession = self.world.resource::<ProfessionFocusConfig>().clone();
        let growth_config = self.world.resource::<FocusGrowthConfig>().clone();
        let tick = self.clock().tick;

        let mut query = self.world.query::<(
            &mut FocusPool,
            &mut ActiveAbilities,
            &mut FocusGrowth,
            &ProfessionSkills,
            &mut PendingFocusEvents,
        )>();
        let (mut pool, mut ledger, mut growth, skills, mut events) = query
            .get_mut(&mut self.world, entity)
            .map_err(|_| EngineError::UnknownAgent(id))?;

        if pool.is_incapacitated {
            let modifiers = aggregate(&ledger, skills, &profession);
            return Ok(ProfessionActionOutcome {
                focus_spent: 0.0,
                experience: 0.0,
                quality: modifiers.scaled_quality(
                    base_quality,
                    profession.min_quality,
                    profession.max_quality,
                ),
                modifiers,
                expired: Vec::new(),
            });
        }

        let skill = skills.get(archetype).unwrap_or(0.0);
        let charge = charge_per_use(&mut pool, &mut ledger, archetype, skill, &profession);
        record_focus_spent(&mut growth, charge.focus_spent);
        for ability_id in &charge.expired {
            events.push(
                id,
                tick,
                FocusEventKind::Expired {
                    ability_id: *ability_id,
                    reason: ExpiryReason::InsufficientFocus,
                },
            );
        }

        let modifiers = aggregate(&ledger, skills, &profession);
        let ratio = daily_ratio(&growth, pool.max_focus);
        let experience = experience_for_action(
            profession.base_xp_per_action,
            charge.focus_spent,
            ratio,
            &growth_config,
        ) * modifiers.xp;

        Ok(ProfessionActionOutcome {
            focus_spent: charge.focus_spent,
            experience,
            quality: modifiers.scaled_quality(
                base_quality,
                profession.min_quality,
                profession.max_quality,
            ),
            modifiers,
            expired: charge.expired,
        })
    }

    pub fn attribute_bonus(&self, id: AgentId) -> Option<f32> {
        let growth = self.growth(id)?;
        Some(attribute_bonus(
            growth.total_focus_spent,
            self.world.resource::<FocusGrowthConfig>(),
        ))
    }

    pub fn pool(&self, id: AgentId) -> Option<&FocusPool> {
        self.world.get::<FocusPool>(self.entity(id).ok()?)
    }

    /// Direct pool access for setup and external collaborators.
    pub fn pool_mut(&mut self, id: AgentId) -> Option<Mut<'_, FocusPool>> {
        let entity = self.entity(id).ok()?;
        self.world.get_mut::<FocusPool>(entity)
    }

    pub fn ledger(&self, id: AgentId) -> Option<&ActiveAbilities> {
        self.world.get::<ActiveAbilities>(self.entity(id).ok()?)
    }

    pub fn growth(&self, id: AgentId) -> Option<&FocusGrowth> {
        self.world.get::<FocusGrowth>(self.entity(id).ok()?)
    }

    pub fn profession_modifiers(&self, id: AgentId) -> Option<&ProfessionModifierSet> {
        self.world.get::<ProfessionModifierSet>(self.entity(id).ok()?)
    }

    pub fn combat_modifiers(&self, id: AgentId) -> Option<CombatModifiers> {
        self.ledger(id).map(CombatModifiers::from_ledger)
    }

    pub fn has_active(&self, id: AgentId, ability_id: AbilityId) -> bool {
        self.ledger(id)
            .map(|ledger| ledger.has_active(ability_id))
            .unwrap_or(false)
    }

    pub fn magnitude(&self, id: AgentId, ability_id: AbilityId) -> f32 {
        self.ledger(id)
            .map(|ledger| ledger.magnitude(ability_id))
            .unwrap_or(0.0)
    }

    pub fn has_component<T: Component>(&self, id: AgentId) -> bool {
        self.entity(id)
            .map(|entity| self.world.get::<T>(entity).is_some())
            .unwrap_or(false)
    }

    pub fn snapshot(&self, id: AgentId) -> Option<AgentFocusSnapshot> {
        let pool = self.pool(id)?;
        let ledger = self.ledger(id)?;
        let growth = self.growth(id)?;
        Some(AgentFocusSnapshot {
            agent_id: id,
            current_focus: pool.current_focus,
            max_focus: pool.max_focus,
            exhaustion_level: pool.exhaustion_level,
            is_incapacitated: pool.is_incapacitated,
            is_breakdown_risk: pool.is_breakdown_risk,
            active_abilities: ledger.iter().map(|entry| entry.ability_id).collect(),
            motivation: growth.motivation,
            total_focus_spent: growth.total_focus_spent,
            daily_focus_spent: growth.daily_focus_spent,
            attribute_bonus: self.attribute_bonus(id)?,
        })
    }

    /// Snapshots of every agent, ordered by id.
    pub fn snapshots(&self) -> Vec<AgentFocusSnapshot> {
        let mut ids: Vec<AgentId> = self.world.resource::<AgentIndex>().0.keys().copied().collect();
        ids.sort();
        ids.into_iter().filter_map(|id| self.snapshot(id)).collect()
    }

    pub fn set_diagnostic_hook(&mut self, hook: FocusEventHook) {
        self.world.resource_mut::<FocusDiagnostics>().set_hook(hook);
    }

    pub fn clock(&self) -> &SimClock {
        self.world.resource::<SimClock>()
    }

    pub fn catalog(&self) -> &AbilityCatalog {
        self.world.resource::<AbilityCatalog>()
    }
}
