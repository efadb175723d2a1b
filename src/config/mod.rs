// src/config/mod.rs

pub mod constants;
pub mod error;
pub mod parameters;
pub mod scenario;

pub use error::ConfigError;
pub use parameters::{
    CourtParameters, PhysicsParameters, PlannerParameters, ShotParameters, SimulationParameters,
};
pub use scenario::{Scenario, ScriptedShot};
