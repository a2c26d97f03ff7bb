pub mod activation;
pub mod drain;
pub mod events;
pub mod exhaustion;
pub mod growth;
pub mod profession;

use bevy_ecs::prelude::*;

use crate::components::abilities::ActiveAbilities;
use crate::components::agent::AgentId;
use crate::components::focus::FocusPool;
use crate::components::growth::FocusGrowth;

/// System: every agent must carry a pool, a ledger and a growth tracker.
/// A partially built agent is a setup bug, so it fails fast.
pub fn assert_well_formed_agents_system(
    agents: Query<(&AgentId, Has<FocusPool>, Has<ActiveAbilities>, Has<FocusGrowth>)>,
) {
    for (agent_id, has_pool, has_ledger, has_growth) in agents.iter() {
        assert!(
            has_pool && has_ledger && has_growth,
            "agent {} is malformed (pool: {}, ledger: {}, growth: {})",
            agent_id.0,
            has_pool,
            has_ledger,
            has_growth
        );
    }
}
