// src/models/mod.rs

pub mod agent;
pub mod ball;
pub mod court;
pub mod opponent;
pub mod runner;
pub mod shot;
pub mod shot_error;
pub mod trajectory;
