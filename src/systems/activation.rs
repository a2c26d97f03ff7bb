use bevy_ecs::prelude::*;
use bevy_utils::tracing::debug;

use crate::components::abilities::{AbilityActivationRequest, ActiveAbilities};
use crate::components::agent::{AgentId, CombatStats, ProfessionSkills};
use crate::components::focus::FocusPool;
use crate::components::growth::FocusGrowth;
use crate::rules::activation::{process_request, ActivationContext, ActivationOutcome};
use crate::rules::catalog::AbilityCatalog;
use crate::simulation::events::{FocusEventKind, PendingFocusEvents};
use crate::simulation::growth::record_focus_spent;
use crate::simulation::time::SimClock;

/// System: resolves pending ability requests. Every request is consumed,
/// whatever the outcome.
#[allow(clippy::type_complexity)]
pub fn activation_system(
    catalog: Res<AbilityCatalog>,
    clock: Res<SimClock>,
    par_commands: ParallelCommands,
    mut agents: Query<(
        Entity,
        &AgentId,
        &AbilityActivationRequest,
        &mut FocusPool,
        &mut ActiveAbilities,
        &CombatStats,
        &ProfessionSkills,
        &mut FocusGrowth,
        &mut PendingFocusEvents,
    )>,
) {
    let catalog = &*catalog;
    let tick = clock.tick;

    agents.par_iter_mut().for_each(
        |(entity, agent_id, request, mut pool, mut ledger, stats, skills, mut growth, mut events)| {
            let mut ctx = ActivationContext {
                pool: &mut *pool,
                ledger: &mut *ledger,
                stats,
                skills,
                tick,
            };
            let outcome = process_request(&mut ctx, catalog, request);

            match outcome {
                ActivationOutcome::Activated {
                    ability_id,
                    magnitude,
                    focus_spent,
                } => {
                    record_focus_spent(&mut growth, focus_spent);
                    debug!(
                        "agent {} activated {} (magnitude {:.2})",
                        agent_id.0, ability_id, magnitude
                    );
                    events.push(
                        *agent_id,
                        tick,
                        FocusEventKind::Activated {
                            ability_id,
                            magnitude,
                        },
                    );
                }
                ActivationOutcome::ToggledOff { ability_id } => {
                    debug!("agent {} toggled off {}", agent_id.0, ability_id);
                    events.push(*agent_id, tick, FocusEventKind::ToggledOff { ability_id });
                }
                ActivationOutcome::NothingToCancel { .. } => {}
                ActivationOutcome::Rejected { ability_id, reason } => {
                    events.push(
                        *agent_id,
                        tick,
                        FocusEventKind::Rejected { ability_id, reason },
                    );
                }
            }

            par_commands.command_scope(|mut commands| {
                commands.entity(entity).remove::<AbilityActivationRequest>();
            });
        },
    );
}
