use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info};

use crate::components::agent::AgentId;
use crate::components::focus::FocusPool;
use crate::components::growth::{FocusGrowth, MotivationContext};
use crate::core::config::FocusGrowthConfig;
use crate::simulation::growth::{
    close_day, record_focus_usage, refresh_motivation, EffortRating,
};
use crate::simulation::time::{DayCycle, SimClock};

/// System: folds sustained drain into the usage history and refreshes
/// motivation on its cadence.
pub fn growth_system(
    config: Res<FocusGrowthConfig>,
    clock: Res<SimClock>,
    mut agents: Query<(&AgentId, &FocusPool, &mut FocusGrowth, Option<&MotivationContext>)>,
) {
    let config = &*config;
    let tick = clock.tick;
    let dt = clock.delta_seconds();

    agents
        .par_iter_mut()
        .for_each(|(agent_id, pool, mut growth, context)| {
            record_focus_usage(&mut growth, pool.total_drain_rate, pool.max_focus, dt);
            let context = context.copied().unwrap_or_default();
            if refresh_motivation(&mut growth, context, tick, config) {
                debug!("agent {} motivation now {:?}", agent_id.0, growth.motivation);
            }
        });
}

/// System: closes the day when the day-cycle collaborator has asked for it.
pub fn daily_reset_system(
    config: Res<FocusGrowthConfig>,
    mut cycle: ResMut<DayCycle>,
    mut clock: ResMut<SimClock>,
    mut agents: Query<(&FocusPool, &mut FocusGrowth)>,
) {
    if !cycle.rollover_pending {
        return;
    }
    cycle.rollover_pending = false;

    let mut high = 0;
    let mut low = 0;
    for (pool, mut growth) in agents.iter_mut() {
        match close_day(&mut growth, pool.max_focus, &config) {
            EffortRating::High => high += 1,
            EffortRating::Low => low += 1,
            EffortRating::Normal => {}
        }
    }
    info!(
        "day {} closed: {} high-effort, {} low-effort agents",
        clock.day, high, low
    );
    clock.day += 1;
}
