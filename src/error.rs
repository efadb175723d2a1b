// src/error.rs

use thiserror::Error;

use crate::config::ConfigError;
use crate::math::MathError;

/// シミュレーション全体のエラー
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
