// src/models/opponent.rs

//! 相手AIのショット計画。
//!
//! 狙うバウンド点を決め、初速の鉛直成分を総当たりで探して、その点に落ちる
//! ショット入力（パワー・打ち出し角・打球角度・回転）へ戻す。

use tracing::debug;

use crate::config::{
    CourtParameters, PhysicsParameters, PlannerParameters, ShotParameters, SimulationParameters,
};
use crate::math::{displacement, distance, semi_implicit_euler, FlightState, MathError, Position};
use crate::models::agent::HeuristicAgent;
use crate::models::ball::calculate_acceleration;
use crate::models::court::{ServeSide, NET_CENTER};
use crate::models::shot::rpm_to_rad_per_sec;
use crate::models::trajectory::ShotAttempt;

/// 初速探索の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityEstimate {
    pub vd: f64,       // 前進方向の初速 (m/s)
    pub vz: f64,       // 鉛直方向の初速 (m/s)
    pub distance: f64, // 着地までの距離 (m)
    pub height: f64,   // 探索終了時の高さ (m)
    pub score: f64,
}

/// 計画したショット
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    pub target: Position,
    pub attempt: ShotAttempt,
    pub estimate: VelocityEstimate,
}

/// 打球者と反対側のコートを指す符号
fn far_side_sign(shooter: &Position) -> f64 {
    if shooter.y > 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// 狙うバウンド点を選ぶ
///
/// サーブならサイドで決まるサービスボックスの奥の角、ラリーなら相手コートの格子点のうち
/// 相手選手から最も遠い点。角も格子もラインから`error_margin`だけ内側に取る。
///
/// # 引数
/// - `shooter`: 打球者の位置
/// - `rival`: 相手選手の位置
/// - `serve_side`: サーブのときのサイド（ラリー中は`None`）
/// - `ai`: 相手AIのパラメータ
/// - `court`: コート寸法
/// - `planner`: 格子の間隔と最短距離
///
/// # 戻り値
/// - 狙うバウンド点
pub fn select_target(
    shooter: &Position,
    rival: &Position,
    serve_side: Option<ServeSide>,
    ai: &HeuristicAgent,
    court: &CourtParameters,
    planner: &PlannerParameters,
) -> Position {
    let side = far_side_sign(shooter);
    let half_width = court.width / 2.0;
    let margin = ai.error_margin;

    if let Some(serve_side) = serve_side {
        // 打球者側から見てアドは右、デュースは左のボックス
        let lateral = match serve_side {
            ServeSide::Ad => -side,
            ServeSide::Deuce => side,
        };
        return Position::new(
            lateral * (half_width - margin),
            side * (court.serve_box_length - margin),
        );
    }

    let x_min = -half_width + margin;
    let x_count = ((2.0 * (half_width - margin)) / planner.grid_step + 1e-9).max(0.0) as usize;
    let y_max = court.length / 2.0 - margin;
    let y_count = ((y_max - planner.min_target_depth) / planner.grid_step + 1e-9).max(0.0) as usize;

    let mut best = Position::new(x_min, side * planner.min_target_depth);
    let mut best_distance = f64::NEG_INFINITY;
    for j in 0..=y_count {
        let y = side * (planner.min_target_depth + j as f64 * planner.grid_step);
        for i in 0..=x_count {
            let candidate = Position::new(x_min + i as f64 * planner.grid_step, y);
            let d = distance(rival, &candidate);
            if d > best_distance {
                best_distance = d;
                best = candidate;
            }
        }
    }
    best
}

/// バウンドなしで地面に戻るまで飛ばす
///
/// # 戻り値
/// - (着地距離, 終了時の高さ)
pub fn simulate_until_landing(
    vd: f64,
    vz: f64,
    spin: f64,
    initial_height: f64,
    physics: &PhysicsParameters,
) -> (f64, f64) {
    let steps = (physics.duration / physics.dt).round() as usize;
    let mut state = FlightState { d: 0.0, z: initial_height, vd, vz };
    for _ in 0..steps {
        let acceleration = calculate_acceleration(&state, spin, physics);
        state = semi_implicit_euler(state, acceleration, physics.dt);
        if state.z <= 0.0 {
            break;
        }
    }
    (state.d, state.z)
}

/// 目標距離に落ちる初速を総当たりで探す
///
/// 前進方向の初速を既定パワーの一定割合に固定し、鉛直方向の初速を一定刻みで走査する。
/// 評価値は |着地距離 - 目標距離| + |終了時の高さ| で、最小のものを返す。
///
/// # 引数
/// - `target_distance`: 打球方向に沿った目標距離 (m)
/// - `initial_height`: 打点の高さ (m)
/// - `spin`: 回転 (rad/s)
/// - `default_power`: 既定パワー (mph)
///
/// # 戻り値
/// - 最良の初速と、そのときの着地距離・高さ・評価値
pub fn estimate_initial_velocity_for_bounce(
    target_distance: f64,
    initial_height: f64,
    spin: f64,
    default_power: f64,
    physics: &PhysicsParameters,
    shot: &ShotParameters,
    planner: &PlannerParameters,
) -> VelocityEstimate {
    let vd = default_power * shot.mph_to_mps * planner.forward_velocity_fraction;
    let candidates = ((planner.vz_max - planner.vz_min) / planner.vz_step).round() as usize;

    let evaluate = |vz: f64| {
        let (d, z) = simulate_until_landing(vd, vz, spin, initial_height, physics);
        let score = (d - target_distance).abs() + z.abs();
        VelocityEstimate { vd, vz, distance: d, height: z, score }
    };

    // 同点なら先に見つかった候補を残す
    let mut estimate = evaluate(planner.vz_min);
    for i in 1..=candidates {
        let candidate = evaluate(planner.vz_min + i as f64 * planner.vz_step);
        if candidate.score < estimate.score {
            estimate = candidate;
        }
    }

    debug!(
        target_distance,
        vd = estimate.vd,
        vz = estimate.vz,
        landing = estimate.distance,
        score = estimate.score,
        "initial velocity estimated"
    );
    estimate
}

/// 相手AIのショットを計画する
///
/// # 引数
/// - `shooter`: 相手AIの位置
/// - `rival`: 人間の選手の位置
/// - `serve_side`: サーブのときのサイド
/// - `ai`: 相手AIのパラメータ
/// - `params`: パラメータ
///
/// # 戻り値
/// - `resolve_shot`にそのまま渡せるショット入力と、狙った点
pub fn plan_shot(
    shooter: &Position,
    rival: &Position,
    serve_side: Option<ServeSide>,
    ai: &HeuristicAgent,
    params: &SimulationParameters,
) -> Result<PlannedShot, MathError> {
    let target = select_target(shooter, rival, serve_side, ai, &params.court, &params.planner);

    let to_target = displacement(shooter, &target);
    let direction = to_target.normalize()?;
    let zero_angle = displacement(shooter, &NET_CENTER).normalize()?;
    let shot_angle = zero_angle.cross(&direction).atan2(zero_angle.dot(&direction)).to_degrees();

    let estimate = estimate_initial_velocity_for_bounce(
        to_target.norm(),
        params.physics.launch_height,
        rpm_to_rad_per_sec(ai.default_spin),
        ai.default_power,
        &params.physics,
        &params.shot,
        &params.planner,
    );

    let speed = (estimate.vd.powi(2) + estimate.vz.powi(2)).sqrt();
    let attempt = ShotAttempt {
        shot_angle,
        power: speed / params.shot.mph_to_mps,
        spin: ai.default_spin,
        launch_angle: estimate.vz.atan2(estimate.vd).to_degrees(),
    };
    debug!(
        target_x = target.x,
        target_y = target.y,
        shot_angle,
        power = attempt.power,
        launch_angle = attempt.launch_angle,
        "opponent shot planned"
    );

    Ok(PlannedShot { target, attempt, estimate })
}
