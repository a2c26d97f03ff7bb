use bevy_ecs::prelude::*;

use crate::simulation::events::{FocusDiagnostics, FocusEventLog, PendingFocusEvents};

/// System: merges per-agent buffers into the tick's event log in agent-id
/// order and forwards each event to the diagnostic hook.
pub fn flush_events_system(
    diagnostics: Res<FocusDiagnostics>,
    mut log: ResMut<FocusEventLog>,
    mut pending: Query<&mut PendingFocusEvents>,
) {
    log.0.clear();
    for mut buffer in pending.iter_mut() {
        if buffer.0.is_empty() {
            continue;
        }
        log.0.append(&mut buffer.0);
    }
    log.0.sort_by_key(|event| event.agent_id);
    for event in &log.0 {
        diagnostics.notify(event);
    }
}
