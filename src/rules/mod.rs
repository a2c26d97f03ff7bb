pub mod activation;
pub mod catalog;
pub mod combat;
pub mod cost;
pub mod drain;
pub mod profession;
pub mod unlock;

pub use activation::{process_request, ActivationOutcome, RejectReason};
pub use catalog::{AbilityCatalog, AbilityDefinition, AbilityEffect, AbilityId, Archetype};
pub use cost::CostType;
pub use drain::ExpiryReason;
