pub mod abilities;
pub mod agent;
pub mod focus;
pub mod growth;
pub mod profession;
