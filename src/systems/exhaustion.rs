use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info};

use crate::components::abilities::ActiveAbilities;
use crate::components::agent::AgentId;
use crate::components::focus::{BreakdownRisk, FocusPool, FocusRecovery, Incapacitated};
use crate::core::config::FocusConfig;
use crate::rules::drain::ExpiryReason;
use crate::simulation::events::{FocusEventKind, PendingFocusEvents};
use crate::simulation::exhaustion::{evaluate_exhaustion, update_incapacitated};
use crate::simulation::time::SimClock;

/// System: runs the exhaustion state machine and mirrors its flags onto the
/// `BreakdownRisk` and `Incapacitated` tags.
pub fn exhaustion_system(
    config: Res<FocusConfig>,
    clock: Res<SimClock>,
    par_commands: ParallelCommands,
    mut agents: Query<(
        Entity,
        &AgentId,
        &mut FocusPool,
        &mut FocusRecovery,
        &mut ActiveAbilities,
        &mut PendingFocusEvents,
    )>,
) {
    let config = &*config;
    let tick = clock.tick;
    let dt = clock.delta_seconds();

    agents.par_iter_mut().for_each(
        |(entity, agent_id, mut pool, mut recovery, mut ledger, mut events)| {
            let report = if pool.is_incapacitated {
                update_incapacitated(&mut pool, &mut recovery, tick, dt, config)
            } else {
                evaluate_exhaustion(
                    &mut pool,
                    &mut recovery,
                    &mut ledger,
                    agent_id.0,
                    tick,
                    dt,
                    config,
                )
            };

            if report.risk_entered {
                debug!(
                    "agent {} at breakdown risk (exhaustion {:.1})",
                    agent_id.0, pool.exhaustion_level
                );
                events.push(*agent_id, tick, FocusEventKind::BreakdownRiskEntered);
            }
            if report.risk_cleared {
                events.push(*agent_id, tick, FocusEventKind::BreakdownRiskCleared);
            }
            if let Some(breakdown) = report.breakdown {
                if breakdown.triggered {
                    info!("agent {} broke down (roll {})", agent_id.0, breakdown.roll);
                    events.push(
                        *agent_id,
                        tick,
                        FocusEventKind::Breakdown {
                            roll: breakdown.roll,
                        },
                    );
                }
            }
            for ability_id in &report.cancelled {
                events.push(
                    *agent_id,
                    tick,
                    FocusEventKind::Expired {
                        ability_id: *ability_id,
                        reason: ExpiryReason::Incapacitated,
                    },
                );
            }
            if report.incapacitated {
                info!("agent {} incapacitated at tick {}", agent_id.0, tick);
                events.push(*agent_id, tick, FocusEventKind::Incapacitated);
            }
            if report.recovered {
                info!("agent {} recovered at tick {}", agent_id.0, tick);
                events.push(*agent_id, tick, FocusEventKind::Recovered);
            }

            if report.risk_entered
                || report.risk_cleared
                || report.incapacitated
                || report.recovered
            {
                par_commands.command_scope(|mut commands| {
                    let mut agent = commands.entity(entity);
                    if report.risk_entered {
                        agent.insert(BreakdownRisk);
                    }
                    if report.risk_cleared {
                        agent.remove::<BreakdownRisk>();
                    }
                    if report.incapacitated {
                        agent.insert(Incapacitated);
                    }
                    if report.recovered {
                        agent.remove::<Incapacitated>();
                    }
                });
            }
        },
    );
}
