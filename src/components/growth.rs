use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Why an agent pushes itself, ordered from least to most driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Motivation {
    Leisurely,
    Casual,
    Dutiful,
    Perfectionist,
    Ambitious,
    Passionate,
    Desperate,
    Survival,
}

impl Motivation {
    /// Scales the personality-derived target focus usage.
    pub fn factor(self) -> f32 {
        match self {
            Motivation::Leisurely => 0.6,
            Motivation::Casual => 0.8,
            Motivation::Dutiful => 1.0,
            Motivation::Perfectionist => 1.2,
            Motivation::Ambitious => 1.4,
            Motivation::Passionate => 1.6,
            Motivation::Desperate => 1.8,
            Motivation::Survival => 2.0,
        }
    }
}

/// Lifetime and daily focus usage history for one agent.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusGrowth {
    pub total_focus_spent: f32,
    pub daily_focus_spent: f32,
    pub average_intensity: f32,
    pub peak_intensity_today: f32,
    pub high_effort_days: u32,
    pub low_effort_days: u32,
    pub motivation: Motivation,
    /// Personality drive in `[0, 1]`.
    pub drive_personality: f32,
    pub target_usage_percent: f32,
    pub last_motivation_tick: Option<u64>,
}

impl FocusGrowth {
    pub fn new(drive_personality: f32) -> Self {
        Self {
            total_focus_spent: 0.0,
            daily_focus_spent: 0.0,
            average_intensity: 0.0,
            peak_intensity_today: 0.0,
            high_effort_days: 0,
            low_effort_days: 0,
            motivation: Motivation::Dutiful,
            drive_personality: drive_personality.clamp(0.0, 1.0),
            target_usage_percent: 0.0,
            last_motivation_tick: None,
        }
    }
}

impl Default for FocusGrowth {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Situational pressure set by external collaborators; overrides personality.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationContext {
    pub survival: bool,
    pub desperate: bool,
}
