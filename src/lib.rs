// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod core;
pub mod data;
pub mod rules;
pub mod simulation;
pub mod systems;

// Expose the engine façade and the types needed to drive it
pub use crate::core::config::{ConfigLoadError, FocusConfigs};
pub use crate::core::world::{AgentFocusSnapshot, AgentSpec, EngineError, FocusEngine};
pub use crate::simulation::events::{FocusEvent, FocusEventKind};
