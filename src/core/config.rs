use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_PATH: &str = "./assets/config/focus.json";

/// Pool, exhaustion and incapacitation tuning.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Focus fraction below which exhaustion accumulates.
    pub exhaustion_threshold: f32,
    /// Exhaustion per second at full severity.
    pub exhaustion_accumulation_rate: f32,
    /// Exhaustion shed per second while above the threshold.
    pub exhaustion_recovery_rate: f32,
    pub breakdown_risk_threshold: f32,
    pub idle_regen_multiplier: f32,
    pub combat_regen_multiplier: f32,
    pub min_incapacitation_ticks: u64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            exhaustion_threshold: 0.2,
            exhaustion_accumulation_rate: 5.0,
            exhaustion_recovery_rate: 2.0,
            breakdown_risk_threshold: 80.0,
            idle_regen_multiplier: 2.0,
            combat_regen_multiplier: 0.5,
            min_incapacitation_ticks: 300,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionFocusConfig {
    pub base_xp_per_action: f32,
    pub max_quality: f32,
    pub min_quality: f32,
    pub max_targets: f32,
    /// Per-use discount per ten skill points.
    pub skill_cost_reduction: f32,
}

impl Default for ProfessionFocusConfig {
    fn default() -> Self {
        Self {
            base_xp_per_action: 10.0,
            max_quality: 100.0,
            min_quality: 10.0,
            max_targets: 5.0,
            skill_cost_reduction: 0.05,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusGrowthConfig {
    pub xp_per_focus_spent: f32,
    pub attribute_per_1000_focus: f32,
    pub high_effort_xp_bonus: f32,
    pub low_effort_xp_penalty: f32,
    pub high_effort_threshold: f32,
    pub low_effort_threshold: f32,
    pub max_attribute_from_focus: f32,
    pub motivation_interval_ticks: u64,
}

impl Default for FocusGrowthConfig {
    fn default() -> Self {
        Self {
            xp_per_focus_spent: 0.02,
            attribute_per_1000_focus: 1.0,
            high_effort_xp_bonus: 1.25,
            low_effort_xp_penalty: 0.75,
            high_effort_threshold: 0.5,
            low_effort_threshold: 0.2,
            max_attribute_from_focus: 30.0,
            motivation_interval_ticks: 300,
        }
    }
}

/// The three process-wide configs, supplied together before the first tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfigs {
    pub focus: FocusConfig,
    pub profession: ProfessionFocusConfig,
    pub growth: FocusGrowthConfig,
}

#[derive(Debug)]
pub enum ConfigLoadError {
    Io { path: String, source: std::io::Error },
    Parse { path: String, source: serde_json::Error },
    Invalid(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            ConfigLoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            ConfigLoadError::Invalid(message) => write!(f, "invalid focus config: {}", message),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

impl FocusConfigs {
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ConfigLoadError::Parse { source, .. } => ConfigLoadError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigLoadError> {
        let configs: FocusConfigs =
            serde_json::from_str(raw).map_err(|source| ConfigLoadError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        configs.validate()?;
        Ok(configs)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let focus = &self.focus;
        check_range("exhaustion_threshold", focus.exhaustion_threshold, 0.0, 1.0)?;
        check_non_negative(
            "exhaustion_accumulation_rate",
            focus.exhaustion_accumulation_rate,
        )?;
        check_non_negative("exhaustion_recovery_rate", focus.exhaustion_recovery_rate)?;
        check_range(
            "breakdown_risk_threshold",
            focus.breakdown_risk_threshold,
            0.0,
            100.0,
        )?;
        check_non_negative("idle_regen_multiplier", focus.idle_regen_multiplier)?;
        check_non_negative("combat_regen_multiplier", focus.combat_regen_multiplier)?;

        let profession = &self.profession;
        check_non_negative("base_xp_per_action", profession.base_xp_per_action)?;
        if profession.min_quality > profession.max_quality {
            return Err(ConfigLoadError::Invalid(format!(
                "min_quality {} exceeds max_quality {}",
                profession.min_quality, profession.max_quality
            )));
        }
        check_range("max_targets", profession.max_targets, 1.0, f32::MAX)?;
        check_range("skill_cost_reduction", profession.skill_cost_reduction, 0.0, 0.1)?;

        let growth = &self.growth;
        check_non_negative("xp_per_focus_spent", growth.xp_per_focus_spent)?;
        check_non_negative("attribute_per_1000_focus", growth.attribute_per_1000_focus)?;
        check_non_negative("max_attribute_from_focus", growth.max_attribute_from_focus)?;
        if growth.low_effort_threshold > growth.high_effort_threshold {
            return Err(ConfigLoadError::Invalid(format!(
                "low_effort_threshold {} exceeds high_effort_threshold {}",
                growth.low_effort_threshold, growth.high_effort_threshold
            )));
        }
        if growth.motivation_interval_ticks == 0 {
            return Err(ConfigLoadError::Invalid(
                "motivation_interval_ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<(), ConfigLoadError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigLoadError::Invalid(format!(
            "{} = {} outside [{}, {}]",
            name, value, min, max
        )))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigLoadError> {
    check_range(name, value, 0.0, f32::MAX)
}
