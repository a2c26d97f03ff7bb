pub mod config;
pub mod ecs;
pub mod world;
