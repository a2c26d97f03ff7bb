use bevy_ecs::prelude::*;

use crate::components::abilities::ActiveAbilities;
use crate::components::agent::ProfessionSkills;
use crate::components::profession::ProfessionModifierSet;
use crate::core::config::ProfessionFocusConfig;
use crate::rules::profession::aggregate;

/// System: rebuilds each agent's profession modifiers from its ledger.
pub fn profession_modifier_system(
    config: Res<ProfessionFocusConfig>,
    mut agents: Query<(&ActiveAbilities, &ProfessionSkills, &mut ProfessionModifierSet)>,
) {
    let config = &*config;
    agents
        .par_iter_mut()
        .for_each(|(ledger, skills, mut modifiers)| {
            let next = aggregate(ledger, skills, config);
            if *modifiers != next {
                *modifiers = next;
            }
        });
}
