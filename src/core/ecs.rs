use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;
use bevy_tasks::{ComputeTaskPool, TaskPool};

use crate::core::config::FocusConfigs;
use crate::core::world::{AgentIndex, IdAllocator};
use crate::rules::catalog::AbilityCatalog;
use crate::simulation::events::{FocusDiagnostics, FocusEventLog};
use crate::simulation::time::{advance_clock_system, DayCycle, SimClock};
use crate::systems::activation::activation_system;
use crate::systems::assert_well_formed_agents_system;
use crate::systems::drain::drain_system;
use crate::systems::events::flush_events_system;
use crate::systems::exhaustion::exhaustion_system;
use crate::systems::growth::{daily_reset_system, growth_system};
use crate::systems::profession::profession_modifier_system;

/// Canonical tick ordering. Each phase sees the deferred commands of the
/// phases before it.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FocusSet {
    Intake,
    Activation,
    Drain,
    Exhaustion,
    Growth,
    Modifiers,
    Events,
    Time,
}

/// Build the ECS world with the catalog, configs and tick bookkeeping.
pub fn create_world(configs: FocusConfigs) -> World {
    ComputeTaskPool::get_or_init(TaskPool::default);

    let mut world = World::new();
    world.insert_resource(AbilityCatalog::standard());
    world.insert_resource(configs.focus);
    world.insert_resource(configs.profession);
    world.insert_resource(configs.growth);
    world.insert_resource(SimClock::default());
    world.insert_resource(DayCycle::default());
    world.insert_resource(FocusEventLog::default());
    world.insert_resource(FocusDiagnostics::default());
    world.insert_resource(IdAllocator::default());
    world.insert_resource(AgentIndex::default());
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (
            FocusSet::Intake,
            FocusSet::Activation,
            FocusSet::Drain,
            FocusSet::Exhaustion,
            FocusSet::Growth,
            FocusSet::Modifiers,
            FocusSet::Events,
            FocusSet::Time,
        )
            .chain(),
    );

    schedule.add_systems((
        (assert_well_formed_agents_system, daily_reset_system)
            .chain()
            .in_set(FocusSet::Intake),
        activation_system.in_set(FocusSet::Activation),
        drain_system.in_set(FocusSet::Drain),
        exhaustion_system.in_set(FocusSet::Exhaustion),
        growth_system.in_set(FocusSet::Growth),
        profession_modifier_system.in_set(FocusSet::Modifiers),
        flush_events_system.in_set(FocusSet::Events),
        advance_clock_system.in_set(FocusSet::Time),
    ));

    schedule
}
