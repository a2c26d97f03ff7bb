use serde::{Deserialize, Serialize};

/// How an ability charges the focus pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostType {
    /// Paid in full on activation.
    Burst,
    /// Drained continuously while the ability stays toggled on.
    PerSecond,
    /// Charged each time a matching action is performed.
    PerUse,
}

impl CostType {
    pub fn is_toggle(self) -> bool {
        self == CostType::PerSecond
    }

    /// Focus that must be available to start the ability.
    pub fn activation_threshold(self, base_cost: f32) -> f32 {
        match self {
            CostType::Burst => base_cost,
            CostType::PerSecond | CostType::PerUse => base_cost * 0.5,
        }
    }
}
