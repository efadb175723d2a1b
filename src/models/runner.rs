// src/models/runner.rs

use crate::math::{displacement, MathError, Position};
use crate::models::trajectory::TrajectoryPoint3D;

/// 打点までの移動計算の結果
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub reached: bool,
    pub time_to_ball: f64,
    pub time_needed: f64,
    pub final_location: Position,
    pub trajectory: Vec<TrajectoryPoint3D>,
}

/// 打点へ走る選手の移動を計算する純粋な関数
///
/// 選手は一定速度で打点へ直進する。ボールより先に着けば打点で待ち、
/// 間に合わなければボールの到着時刻の手前で軌道を打ち切る。
///
/// # 引数
/// - `runner`: 選手の現在位置
/// - `target`: 打点（`t`はボールの到着時刻）
/// - `speed`: 選手の移動速度 (m/s)
/// - `dt`: 時間ステップ
///
/// # 戻り値
/// - 間に合うかどうかと、ボール軌道と同じ時間軸の移動軌道
pub fn calculate_run(
    runner: &Position,
    target: &TrajectoryPoint3D,
    speed: f64,
    dt: f64,
) -> Result<RunResult, MathError> {
    if speed <= 0.0 || speed.is_nan() {
        return Err(MathError::NonPositiveSpeed(speed));
    }
    if dt <= 0.0 || dt.is_nan() {
        return Err(MathError::NonPositiveTimeStep(dt));
    }

    let goal = target.position();
    let offset = displacement(runner, &goal);
    let distance = offset.norm();
    let time_needed = distance / speed;
    let time_to_ball = target.t;
    let reached = time_needed <= time_to_ball;

    // 同じ位置なら方向は不要
    let direction = offset.normalize().unwrap_or_default();

    let location_at = |t: f64| {
        let moved = (speed * t).min(distance);
        TrajectoryPoint3D {
            x: runner.x + direction.x * moved,
            y: runner.y + direction.y * moved,
            z: 0.0,
            t,
        }
    };

    let mut trajectory = Vec::new();
    let mut step = 0usize;
    loop {
        let t = step as f64 * dt;
        if t > time_to_ball + 1e-9 || (!reached && t >= time_to_ball - 1e-9) {
            break;
        }
        trajectory.push(location_at(t));
        step += 1;
    }

    if reached {
        // 最後のサンプルはボールの到着時刻ちょうどに合わせる
        match trajectory.last_mut() {
            Some(last) if (last.t - time_to_ball).abs() <= 1e-9 => last.t = time_to_ball,
            _ => trajectory.push(location_at(time_to_ball)),
        }
    }

    let final_location = trajectory
        .last()
        .map(|p| p.position())
        .unwrap_or(*runner);

    Ok(RunResult {
        reached,
        time_to_ball,
        time_needed,
        final_location,
        trajectory,
    })
}
