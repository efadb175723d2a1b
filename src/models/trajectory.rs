// src/models/trajectory.rs

use serde::Deserialize;

use crate::math::Position;

/// 打球者から見た1次元飛行座標系のサンプル
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectoryPoint2D {
    pub d: f64, // 打球方向の距離 (m)
    pub z: f64, // 高さ (m)
    pub t: f64, // 打球からの経過時間 (s)
}

/// コート座標系のサンプル
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrajectoryPoint3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl TrajectoryPoint3D {
    /// 地面上の位置
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// 1回のショットの入力
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShotAttempt {
    pub shot_angle: f64,   // 横方向の打球角度（度、符号付き）
    pub power: f64,        // 初速 (mph)
    pub spin: f64,         // 回転数 (rpm、正がトップスピン)
    pub launch_angle: f64, // 打ち出し角（度）
}

/// 1回のショットの結果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShotResult {
    pub bounce_point: TrajectoryPoint3D,
    pub strike_point: TrajectoryPoint3D,
    pub error: bool,
    pub miss: bool,
    pub trajectory_2d: Vec<TrajectoryPoint2D>,
    pub trajectory_3d: Vec<TrajectoryPoint3D>,
}

impl ShotResult {
    /// ラケットから出なかったショット（軌道なし、各点はゼロ）
    pub fn shank() -> Self {
        ShotResult {
            error: true,
            ..ShotResult::default()
        }
    }
}
