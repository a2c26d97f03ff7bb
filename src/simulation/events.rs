use bevy_ecs::prelude::*;

use crate::components::agent::AgentId;
use crate::rules::activation::RejectReason;
use crate::rules::catalog::AbilityId;
use crate::rules::drain::ExpiryReason;

#[derive(Debug, Clone, PartialEq)]
pub enum FocusEventKind {
    Activated { ability_id: AbilityId, magnitude: f32 },
    ToggledOff { ability_id: AbilityId },
    /// Diagnostic only; rejected requests never change gameplay state.
    Rejected { ability_id: AbilityId, reason: RejectReason },
    Expired { ability_id: AbilityId, reason: ExpiryReason },
    BreakdownRiskEntered,
    BreakdownRiskCleared,
    Breakdown { roll: u64 },
    Incapacitated,
    Recovered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusEvent {
    pub agent_id: AgentId,
    pub tick: u64,
    pub kind: FocusEventKind,
}

/// Per-agent buffer written during the parallel phases and merged once per
/// tick, so event order never depends on worker scheduling.
#[derive(Component, Debug, Default, Clone)]
pub struct PendingFocusEvents(pub Vec<FocusEvent>);

impl PendingFocusEvents {
    pub fn push(&mut self, agent_id: AgentId, tick: u64, kind: FocusEventKind) {
        self.0.push(FocusEvent {
            agent_id,
            tick,
            kind,
        });
    }
}

/// Resource holding the merged events of the most recent tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct FocusEventLog(pub Vec<FocusEvent>);

pub type FocusEventHook = Box<dyn Fn(&FocusEvent) + Send + Sync>;

/// Optional callback invoked for every merged event, including rejections.
#[derive(Resource, Default)]
pub struct FocusDiagnostics {
    hook: Option<FocusEventHook>,
}

impl FocusDiagnostics {
    pub fn set_hook(&mut self, hook: FocusEventHook) {
        self.hook = Some(hook);
    }

    pub fn notify(&self, event: &FocusEvent) {
        if let Some(hook) = &self.hook {
            hook(event);
        }
    }
}

impl std::fmt::Debug for FocusDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusDiagnostics")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
