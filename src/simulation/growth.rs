use crate::components::growth::{FocusGrowth, Motivation, MotivationContext};
use crate::core::config::FocusGrowthConfig;

const INTENSITY_REFERENCE: f32 = 0.1;
const INTENSITY_SMOOTHING: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffortRating {
    High,
    Normal,
    Low,
}

/// Fraction of the pool spent today.
pub fn daily_ratio(growth: &FocusGrowth, max_focus: f32) -> f32 {
    if max_focus <= 0.0 {
        return 0.0;
    }
    growth.daily_focus_spent / max_focus
}

pub fn effort_rating(ratio: f32, config: &FocusGrowthConfig) -> EffortRating {
    if ratio >= config.high_effort_threshold {
        EffortRating::High
    } else if ratio <= config.low_effort_threshold {
        EffortRating::Low
    } else {
        EffortRating::Normal
    }
}

/// Per-tick usage from sustained drain. Returns the focus spent this tick.
pub fn record_focus_usage(
    growth: &mut FocusGrowth,
    total_drain_rate: f32,
    max_focus: f32,
    dt: f32,
) -> f32 {
    let spent = total_drain_rate * dt;
    if spent <= 0.0 {
        return 0.0;
    }
    let intensity = if max_focus > 0.0 {
        (total_drain_rate / (max_focus * INTENSITY_REFERENCE)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    record_focus_spent(growth, spent);
    growth.peak_intensity_today = growth.peak_intensity_today.max(intensity);
    growth.average_intensity =
        growth.average_intensity * (1.0 - INTENSITY_SMOOTHING) + intensity * INTENSITY_SMOOTHING;
    spent
}

/// Lump-sum spending (burst activations, per-use charges).
pub fn record_focus_spent(growth: &mut FocusGrowth, spent: f32) {
    if spent <= 0.0 {
        return;
    }
    growth.total_focus_spent += spent;
    growth.daily_focus_spent += spent;
}

pub fn resolve_motivation(drive: f32, context: MotivationContext) -> Motivation {
    if context.survival {
        return Motivation::Survival;
    }
    if context.desperate {
        return Motivation::Desperate;
    }
    match drive {
        d if d < 0.2 => Motivation::Leisurely,
        d if d < 0.35 => Motivation::Casual,
        d if d < 0.5 => Motivation::Dutiful,
        d if d < 0.65 => Motivation::Perfectionist,
        d if d < 0.8 => Motivation::Ambitious,
        _ => Motivation::Passionate,
    }
}

pub fn target_usage_percent(drive: f32, motivation: Motivation) -> f32 {
    ((0.2 + drive * 0.5) * motivation.factor()).clamp(0.1, 1.0)
}

/// Re-derives motivation on the configured cadence. Returns true when the
/// motivation changed.
pub fn refresh_motivation(
    growth: &mut FocusGrowth,
    context: MotivationContext,
    tick: u64,
    config: &FocusGrowthConfig,
) -> bool {
    let due = match growth.last_motivation_tick {
        None => true,
        Some(last) => tick.saturating_sub(last) >= config.motivation_interval_ticks,
    };
    if !due {
        return false;
    }
    growth.last_motivation_tick = Some(tick);
    let next = resolve_motivation(growth.drive_personality, context);
    growth.target_usage_percent = target_usage_percent(growth.drive_personality, next);
    let changed = next != growth.motivation;
    growth.motivation = next;
    changed
}

/// Rates the finished day, bumps the effort counters and zeroes the daily
/// accumulators.
pub fn close_day(growth: &mut FocusGrowth, max_focus: f32, config: &FocusGrowthConfig) -> EffortRating {
    let rating = effort_rating(daily_ratio(growth, max_focus), config);
    match rating {
        EffortRating::High => growth.high_effort_days += 1,
        EffortRating::Low => growth.low_effort_days += 1,
        EffortRating::Normal => {}
    }
    growth.daily_focus_spent = 0.0;
    growth.peak_intensity_today = 0.0;
    rating
}

pub fn experience_for_action(
    base_xp: f32,
    focus_spent_on_action: f32,
    daily_ratio: f32,
    config: &FocusGrowthConfig,
) -> f32 {
    let bonus = focus_spent_on_action.max(0.0) * config.xp_per_focus_spent * base_xp;
    let modifier = match effort_rating(daily_ratio, config) {
        EffortRating::High => config.high_effort_xp_bonus,
        EffortRating::Low => config.low_effort_xp_penalty,
        EffortRating::Normal => 1.0,
    };
    ((base_xp + bonus) * modifier).max(1.0)
}

pub fn attribute_bonus(total_focus_spent: f32, config: &FocusGrowthConfig) -> f32 {
    (total_focus_spent / 1000.0 * config.attribute_per_1000_focus)
        .min(config.max_attribute_from_focus)
}
