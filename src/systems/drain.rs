use bevy_ecs::prelude::*;
use bevy_utils::tracing::debug;

use crate::components::abilities::ActiveAbilities;
use crate::components::agent::{AgentId, Resting};
use crate::components::focus::FocusPool;
use crate::core::config::FocusConfig;
use crate::rules::drain::drain_and_regenerate;
use crate::simulation::events::{FocusEventKind, PendingFocusEvents};
use crate::simulation::time::SimClock;

/// System: charges toggle upkeep, times out durations and regenerates focus.
pub fn drain_system(
    config: Res<FocusConfig>,
    clock: Res<SimClock>,
    mut agents: Query<(
        &AgentId,
        &mut FocusPool,
        &mut ActiveAbilities,
        Has<Resting>,
        &mut PendingFocusEvents,
    )>,
) {
    let config = &*config;
    let tick = clock.tick;
    let dt = clock.delta_seconds();

    agents
        .par_iter_mut()
        .for_each(|(agent_id, mut pool, mut ledger, resting, mut events)| {
            let expired = drain_and_regenerate(&mut pool, &mut ledger, resting, dt, config);
            for expiry in expired {
                debug!(
                    "agent {} lost {} ({:?})",
                    agent_id.0, expiry.ability_id, expiry.reason
                );
                events.push(
                    *agent_id,
                    tick,
                    FocusEventKind::Expired {
                        ability_id: expiry.ability_id,
                        reason: expiry.reason,
                    },
                );
            }
        });
}
