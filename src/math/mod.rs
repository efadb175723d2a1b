// src/math/mod.rs

pub mod error;
pub mod integrator;
pub mod vector;

pub use error::MathError;
pub use integrator::{semi_implicit_euler, FlightState};
pub use vector::{distance, displacement, Position, Vector};
