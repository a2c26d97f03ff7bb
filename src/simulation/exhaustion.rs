//! Exhaustion, breakdown risk and incapacitation.
//!
//! Evaluated once per tick after drain and regeneration. Agents that are
//! incapacitated take the recovery branch instead of the accumulation branch.

use crate::components::abilities::ActiveAbilities;
use crate::components::focus::{FocusPool, FocusRecovery, MAX_EXHAUSTION};
use crate::core::config::FocusConfig;
use crate::rules::catalog::AbilityId;

pub const BREAKDOWN_ROLL_INTERVAL_TICKS: u64 = 60;
const BREAKDOWN_EXHAUSTION_PENALTY: f32 = 20.0;
const INCAPACITATED_REGEN_FRACTION: f32 = 0.1;
const RECOVERY_FOCUS_PERCENT: f32 = 0.5;
const RECOVERY_EXHAUSTION_CEILING: f32 = 50.0;
const RESIDUAL_EXHAUSTION: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownRoll {
    pub roll: u64,
    pub triggered: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExhaustionReport {
    pub risk_entered: bool,
    pub risk_cleared: bool,
    pub breakdown: Option<BreakdownRoll>,
    pub incapacitated: bool,
    pub recovered: bool,
    /// Abilities cancelled by entering incapacitation.
    pub cancelled: Vec<AbilityId>,
}

/// splitmix64 finaliser.
fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Stateless breakdown roll in `0..100`; a pure function of agent and tick.
pub fn breakdown_roll(agent_id: u32, tick: u64) -> u64 {
    mix64(u64::from(agent_id).wrapping_mul(31).wrapping_add(tick)) % 100
}

/// Accumulation branch for agents that are not incapacitated.
pub fn evaluate_exhaustion(
    pool: &mut FocusPool,
    recovery: &mut FocusRecovery,
    ledger: &mut ActiveAbilities,
    agent_id: u32,
    tick: u64,
    dt: f32,
    config: &FocusConfig,
) -> ExhaustionReport {
    let mut report = ExhaustionReport::default();
    if pool.is_incapacitated {
        return report;
    }

    let focus_percent = pool.focus_percent();
    if focus_percent < config.exhaustion_threshold {
        let severity = 1.0 - focus_percent / config.exhaustion_threshold;
        pool.add_exhaustion(config.exhaustion_accumulation_rate * severity * dt);
    } else {
        pool.add_exhaustion(-config.exhaustion_recovery_rate * dt);
    }

    if pool.exhaustion_level >= MAX_EXHAUSTION && pool.current_focus <= 0.0 {
        pool.is_incapacitated = true;
        recovery.incapacitated_at_tick = Some(tick);
        recovery.min_recovery_ticks = config.min_incapacitation_ticks;
        if pool.is_breakdown_risk {
            pool.is_breakdown_risk = false;
            recovery.breakdown_risk_since = None;
            report.risk_cleared = true;
        }
        pool.total_drain_rate = 0.0;
        report.cancelled = ledger
            .drain_all()
            .into_iter()
            .map(|entry| entry.ability_id)
            .collect();
        report.incapacitated = true;
        return report;
    }

    let at_risk = pool.exhaustion_level >= config.breakdown_risk_threshold;
    if at_risk && !pool.is_breakdown_risk {
        pool.is_breakdown_risk = true;
        recovery.breakdown_risk_since = Some(tick);
        report.risk_entered = true;
    } else if !at_risk && pool.is_breakdown_risk {
        pool.is_breakdown_risk = false;
        recovery.breakdown_risk_since = None;
        report.risk_cleared = true;
    }

    report.breakdown = roll_breakdown(pool, recovery, agent_id, tick, config);
    report
}

/// Rolls for a breakdown on every 60th tick since risk onset. A hit halves
/// current focus and adds 20 exhaustion.
pub fn roll_breakdown(
    pool: &mut FocusPool,
    recovery: &FocusRecovery,
    agent_id: u32,
    tick: u64,
    config: &FocusConfig,
) -> Option<BreakdownRoll> {
    if !pool.is_breakdown_risk {
        return None;
    }
    let since = recovery.breakdown_risk_since?;
    let elapsed = tick.checked_sub(since)?;
    if elapsed == 0 || elapsed % BREAKDOWN_ROLL_INTERVAL_TICKS != 0 {
        return None;
    }

    let roll = breakdown_roll(agent_id, tick);
    let margin = pool.exhaustion_level - config.breakdown_risk_threshold;
    let triggered = (roll as f32) < margin;
    if triggered {
        pool.set_focus(pool.current_focus * 0.5);
        pool.add_exhaustion(BREAKDOWN_EXHAUSTION_PENALTY);
    }
    Some(BreakdownRoll { roll, triggered })
}

/// Recovery branch: slow passive regeneration with no multipliers while
/// exhaustion bleeds off. Exit leaves the agent at 50 exhaustion.
pub fn update_incapacitated(
    pool: &mut FocusPool,
    recovery: &mut FocusRecovery,
    tick: u64,
    dt: f32,
    config: &FocusConfig,
) -> ExhaustionReport {
    let mut report = ExhaustionReport::default();
    if !pool.is_incapacitated {
        return report;
    }

    pool.total_drain_rate = 0.0;
    pool.current_regen_rate = pool.base_regen_rate * INCAPACITATED_REGEN_FRACTION;
    pool.set_focus(pool.current_focus + pool.current_regen_rate * dt);
    pool.add_exhaustion(-config.exhaustion_recovery_rate * dt);

    let served = recovery.ticks_incapacitated(tick) >= recovery.min_recovery_ticks;
    if served
        && pool.focus_percent() >= RECOVERY_FOCUS_PERCENT
        && pool.exhaustion_level < RECOVERY_EXHAUSTION_CEILING
    {
        pool.is_incapacitated = false;
        pool.exhaustion_level = RESIDUAL_EXHAUSTION;
        recovery.incapacitated_at_tick = None;
        report.recovered = true;
    }
    report
}
