// src/math/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("方向ベクトルの長さがゼロに近すぎます。")]
    ZeroLengthDirection,
    #[error("移動速度は正の値でなければなりません: {0}")]
    NonPositiveSpeed(f64),
    #[error("時間刻みは正の値でなければなりません: {0}")]
    NonPositiveTimeStep(f64),
}
