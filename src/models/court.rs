// src/models/court.rs

//! コート座標系の幾何計算。
//!
//! 打球は打球者の位置からネット中央へ向かう方向を基準に、横方向の打球角度だけ
//! 回転させた直線上を飛ぶ。飛行計算はこの直線上の1次元座標 (d, z) で行い、
//! ここの関数でコート座標 (x, y, z) へ写す。

use serde::Deserialize;

use crate::config::CourtParameters;
use crate::math::{displacement, MathError, Position, Vector};
use crate::models::trajectory::{TrajectoryPoint2D, TrajectoryPoint3D};

/// ネット中央
pub const NET_CENTER: Position = Position::new(0.0, 0.0);

/// サーブするサイド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeSide {
    Ad,
    Deuce,
}

/// ポイントの参加者。プレイヤーは y > 0 側、相手は y < 0 側に立つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    Player,
    Opponent,
}

impl Participant {
    pub fn other(self) -> Participant {
        match self {
            Participant::Player => Participant::Opponent,
            Participant::Opponent => Participant::Player,
        }
    }
}

/// 打球方向の単位ベクトル
///
/// # 引数
/// - `origin`: 打球者の位置
/// - `shot_angle_deg`: 打球角度（度）。正の値で反時計回り
///
/// # 戻り値
/// - ネット中央へ向かう単位ベクトルを`shot_angle_deg`だけ回転したもの
/// - `origin`がネット中央の場合は`MathError::ZeroLengthDirection`
pub fn shot_direction(origin: &Position, shot_angle_deg: f64) -> Result<Vector, MathError> {
    let zero_angle = displacement(origin, &NET_CENTER).normalize()?;
    Ok(zero_angle.rotate(shot_angle_deg.to_radians()))
}

/// 打球方向に沿ったネットまでの距離
///
/// 打球方向が y 成分を持たない（ネットと平行）場合は 0 を返す。
pub fn net_distance_along_path(origin: &Position, shot_angle_deg: f64) -> Result<f64, MathError> {
    let direction = shot_direction(origin, shot_angle_deg)?;
    if direction.y == 0.0 {
        return Ok(0.0);
    }
    Ok((origin.y / direction.y).abs())
}

/// 1次元軌道をコート座標へ写す
///
/// # 引数
/// - `origin`: 打球者の位置
/// - `points`: 1次元軌道
/// - `shot_angle_deg`: 打球角度（度）
///
/// # 戻り値
/// - 同じ長さ・同じ順序のコート座標軌道
pub fn to_3d(
    origin: &Position,
    points: &[TrajectoryPoint2D],
    shot_angle_deg: f64,
) -> Result<Vec<TrajectoryPoint3D>, MathError> {
    let direction = shot_direction(origin, shot_angle_deg)?;
    Ok(points
        .iter()
        .map(|p| project_point(origin, &direction, p))
        .collect())
}

/// 1点分の写像
pub fn project_point(
    origin: &Position,
    direction: &Vector,
    point: &TrajectoryPoint2D,
) -> TrajectoryPoint3D {
    TrajectoryPoint3D {
        x: origin.x + point.d * direction.x,
        y: origin.y + point.d * direction.y,
        z: point.z,
        t: point.t,
    }
}

/// コート内判定（ラインちょうどはアウト）
pub fn in_court(p: &Position, court: &CourtParameters) -> bool {
    p.x.abs() < court.width / 2.0 && p.y.abs() < court.length / 2.0
}

/// サービスボックス内判定
///
/// サーバーとサイドの組み合わせで、レシーバー側の4つのボックスのうち1つが決まる。
pub fn in_serve_box(
    p: &Position,
    side: ServeSide,
    server: Participant,
    court: &CourtParameters,
) -> bool {
    let half_width = court.width / 2.0;
    let depth = court.serve_box_length;

    let left_half = p.x > -half_width && p.x < 0.0;
    let right_half = p.x > 0.0 && p.x < half_width;
    let opponent_half = p.y > -depth && p.y < 0.0;
    let player_half = p.y > 0.0 && p.y < depth;

    match (server, side) {
        (Participant::Player, ServeSide::Ad) => right_half && opponent_half,
        (Participant::Player, ServeSide::Deuce) => left_half && opponent_half,
        (Participant::Opponent, ServeSide::Ad) => left_half && player_half,
        (Participant::Opponent, ServeSide::Deuce) => right_half && player_half,
    }
}
