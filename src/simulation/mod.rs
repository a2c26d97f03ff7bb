pub mod events;
pub mod exhaustion;
pub mod growth;
pub mod time;
