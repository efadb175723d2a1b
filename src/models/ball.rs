// src/models/ball.rs

use tracing::debug;

use crate::config::{CourtParameters, PhysicsParameters};
use crate::math::{semi_implicit_euler, FlightState};
use crate::models::trajectory::TrajectoryPoint2D;

/// 飛行シミュレーションの初期条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightInput {
    pub initial_vd: f64,     // 前進方向の初速 (m/s)
    pub initial_vz: f64,     // 鉛直方向の初速 (m/s)
    pub spin: f64,           // 回転 (rad/s)
    pub initial_height: f64, // 打点の高さ (m)
    pub net_distance: f64,   // 打球方向に沿ったネットまでの距離 (m)
}

/// 飛行シミュレーションの結果
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub trajectory: Vec<TrajectoryPoint2D>,
    pub bounce_point: TrajectoryPoint2D,
    pub strike_point: TrajectoryPoint2D,
    pub net_error: bool,
}

/// 二次の空気抵抗力を計算する純粋関数
///
/// # 引数
/// - `velocity`: 速度 [vd, vz]
/// - `speed`: 速さ（下限処理済み）
/// - `drag_coefficient`: 抵抗係数
///
/// # 戻り値
/// - 空気抵抗力 [Fd, Fz]
pub fn calculate_drag_force(velocity: &[f64; 2], speed: f64, drag_coefficient: f64) -> [f64; 2] {
    [
        -drag_coefficient * velocity[0] * speed.powi(2),
        -drag_coefficient * velocity[1] * speed.powi(2),
    ]
}

/// マグヌス力を計算する純粋関数
///
/// 鉛直成分のみを持つ。正の回転（トップスピン）は下向きの力になる。
///
/// # 引数
/// - `vd`: 前進速度
/// - `spin`: 回転 (rad/s)
/// - `magnus_coefficient`: マグヌス係数
///
/// # 戻り値
/// - マグヌス力 [Fd, Fz]
pub fn calculate_magnus_force(vd: f64, spin: f64, magnus_coefficient: f64) -> [f64; 2] {
    [0.0, -magnus_coefficient * spin * vd]
}

/// 重力・空気抵抗・マグヌス力による加速度
pub fn calculate_acceleration(state: &FlightState, spin: f64, params: &PhysicsParameters) -> [f64; 2] {
    let speed = (state.vd.powi(2) + state.vz.powi(2)).sqrt().max(params.min_speed);
    let drag = calculate_drag_force(&[state.vd, state.vz], speed, params.drag_coefficient);
    let magnus = calculate_magnus_force(state.vd, spin, params.magnus_coefficient);
    let m = params.ball_mass;
    [
        (drag[0] + magnus[0]) / m,
        (drag[1] + magnus[1] - m * params.gravity) / m,
    ]
}

/// 地面でのバウンド処理
///
/// 高さを0に戻し、鉛直速度を反転して減衰させ、前進速度を摩擦で減らしてスピンキックを加える。
pub fn apply_bounce(state: FlightState, spin: f64, params: &PhysicsParameters) -> FlightState {
    FlightState {
        d: state.d,
        z: 0.0,
        vd: state.vd * params.friction_loss + params.spin_kick_coefficient * spin,
        vz: -state.vz * params.energy_loss,
    }
}

/// バウンドありの打球シミュレーション
///
/// # 引数
/// - `input`: 初期条件
/// - `physics`: 物理パラメータ
/// - `court`: コート寸法（ネットの高さ）
///
/// # 戻り値
/// - 軌道、最初のバウンド点、打点、ネットにかかったかどうか
pub fn simulate_shot_with_bounce(
    input: &FlightInput,
    physics: &PhysicsParameters,
    court: &CourtParameters,
) -> Flight {
    let dt = physics.dt;
    let steps = (physics.duration / dt).round() as usize;

    let mut state = FlightState {
        d: 0.0,
        z: input.initial_height,
        vd: input.initial_vd,
        vz: input.initial_vz,
    };
    let mut trajectory = Vec::with_capacity(steps + 1);
    trajectory.push(TrajectoryPoint2D { d: state.d, z: state.z, t: 0.0 });

    let mut bounce_index: Option<usize> = None;
    let mut strike_index: Option<usize> = None;
    let mut net_error = false;

    for step in 1..=steps {
        let t = step as f64 * dt;
        let previous_d = state.d;
        let acceleration = calculate_acceleration(&state, input.spin, physics);
        state = semi_implicit_euler(state, acceleration, dt);

        // ネットを越えるステップで高さが足りなければネット
        if previous_d < input.net_distance && state.d >= input.net_distance && state.z <= court.net_height {
            trajectory.push(TrajectoryPoint2D { d: state.d, z: state.z.max(0.0), t });
            net_error = true;
            debug!(d = state.d, z = state.z, t, "ball caught by the net");
            break;
        }

        let bounced = state.z <= 0.0 && state.vz < 0.0;
        if bounced {
            state = apply_bounce(state, input.spin, physics);
        }
        trajectory.push(TrajectoryPoint2D { d: state.d, z: state.z, t });

        if bounced && bounce_index.is_none() {
            bounce_index = Some(trajectory.len() - 1);
            debug!(d = state.d, t, "first bounce");
        }
        // バウンドしたステップを1ステップ目として数える
        if let Some(b) = bounce_index {
            if strike_index.is_none() && trajectory.len() - b == physics.strike_delay_steps {
                strike_index = Some(trajectory.len() - 1);
            }
        }
    }

    let last = trajectory[trajectory.len() - 1];
    let bounce_point = bounce_index.map(|i| trajectory[i]).unwrap_or(last);
    let strike_point = strike_index.map(|i| trajectory[i]).unwrap_or(last);

    // ネット手前でバウンドした短いボールもネット扱い
    if bounce_point.d <= input.net_distance {
        net_error = true;
    }

    Flight {
        trajectory,
        bounce_point,
        strike_point,
        net_error,
    }
}

/// テスト
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MPH_TO_MPS: f64 = 0.44704;

    fn input(power_mph: f64, launch_deg: f64, spin_rpm: f64) -> FlightInput {
        let angle = launch_deg.to_radians();
        FlightInput {
            initial_vd: power_mph * MPH_TO_MPS * angle.cos(),
            initial_vz: power_mph * MPH_TO_MPS * angle.sin(),
            spin: spin_rpm * std::f64::consts::TAU / 60.0,
            initial_height: 1.2,
            net_distance: 11.885,
        }
    }

    #[test]
    fn test_drag_force_opposes_velocity() {
        let drag = calculate_drag_force(&[10.0, -5.0], 11.18, 0.001);
        assert!(drag[0] < 0.0);
        assert!(drag[1] > 0.0);
    }

    #[test]
    fn test_magnus_force_topspin_dives() {
        let force = calculate_magnus_force(20.0, 200.0, 0.00005);
        assert_eq!(force[0], 0.0);
        assert!(force[1] < 0.0);

        let backspin = calculate_magnus_force(20.0, -200.0, 0.00005);
        assert!(backspin[1] > 0.0);
    }

    #[test]
    fn test_acceleration_at_rest_is_gravity() {
        let params = PhysicsParameters::default();
        let state = FlightState { d: 0.0, z: 1.0, vd: 0.0, vz: 0.0 };
        let a = calculate_acceleration(&state, 0.0, &params);
        assert_eq!(a[0], 0.0);
        assert!((a[1] + params.gravity).abs() < 1e-12);
    }

    #[test]
    fn test_apply_bounce() {
        let params = PhysicsParameters::default();
        let state = FlightState { d: 15.0, z: -0.02, vd: 10.0, vz: -5.0 };
        let bounced = apply_bounce(state, 100.0, &params);

        assert_eq!(bounced.z, 0.0);
        assert!((bounced.vz - 4.0).abs() < 1e-12);
        // 10 * 0.9 + 0.005 * 100 = 9.5
        assert!((bounced.vd - 9.5).abs() < 1e-12);
    }

    /// 45度・30mph・無回転でベースラインから打つと相手コートに1回バウンドする
    #[test]
    fn test_flat_lob_lands_in_far_court() {
        let flight = simulate_shot_with_bounce(
            &input(30.0, 45.0, 0.0),
            &PhysicsParameters::default(),
            &CourtParameters::default(),
        );

        assert!(!flight.net_error);
        assert_eq!(flight.bounce_point.z, 0.0);
        assert!(flight.bounce_point.d > 11.885);
        assert!(flight.bounce_point.d < 23.77);
        assert!(flight.strike_point.t > flight.bounce_point.t);
        assert_eq!(flight.trajectory[0].t, 0.0);
        assert_eq!(flight.trajectory[0].z, 1.2);
    }

    /// 打ち出し角0度の弱いショットはネットを越えない
    #[test]
    fn test_weak_flat_shot_is_net_error() {
        let flight = simulate_shot_with_bounce(
            &input(5.0, 0.0, 0.0),
            &PhysicsParameters::default(),
            &CourtParameters::default(),
        );
        assert!(flight.net_error);
        assert!(flight.bounce_point.d <= 11.885);
    }

    /// 低い弾道の強打はネットに当たって途中で終わる
    #[test]
    fn test_low_drive_stops_at_net() {
        let physics = PhysicsParameters::default();
        let flight = simulate_shot_with_bounce(
            &input(60.0, 5.0, 2000.0),
            &physics,
            &CourtParameters::default(),
        );
        assert!(flight.net_error);
        let last = flight.trajectory.last().unwrap();
        assert!(last.t < physics.duration);
        assert!(last.d >= 11.885);
    }

    #[test]
    fn test_strike_point_is_delayed_after_bounce() {
        let physics = PhysicsParameters::default();
        let flight = simulate_shot_with_bounce(
            &input(30.0, 45.0, 0.0),
            &physics,
            &CourtParameters::default(),
        );
        // バウンドのサンプルから数えて10番目（9ステップ後）
        let expected = flight.bounce_point.t + (physics.strike_delay_steps - 1) as f64 * physics.dt;
        assert!((flight.strike_point.t - expected).abs() < 1e-9);
    }

    #[test]
    fn test_single_step_delay_strikes_at_bounce() {
        let physics = PhysicsParameters {
            strike_delay_steps: 1,
            ..PhysicsParameters::default()
        };
        let flight = simulate_shot_with_bounce(
            &input(30.0, 45.0, 0.0),
            &physics,
            &CourtParameters::default(),
        );
        assert_eq!(flight.strike_point, flight.bounce_point);
    }

    #[test]
    fn test_no_bounce_defaults_to_last_sample() {
        let physics = PhysicsParameters {
            duration: 0.2,
            ..PhysicsParameters::default()
        };
        let flight = simulate_shot_with_bounce(
            &FlightInput { net_distance: 100.0, ..input(30.0, 45.0, 0.0) },
            &physics,
            &CourtParameters::default(),
        );
        let last = *flight.trajectory.last().unwrap();
        assert_eq!(flight.bounce_point, last);
        assert_eq!(flight.strike_point, last);
    }

    proptest! {
        #[test]
        fn prop_bounce_precedes_strike(
            power in 20.0f64..80.0,
            launch in 5.0f64..60.0,
            spin in -3000.0f64..3000.0,
        ) {
            let flight = simulate_shot_with_bounce(
                &FlightInput { net_distance: 0.5, ..input(power, launch, spin) },
                &PhysicsParameters::default(),
                &CourtParameters::default(),
            );
            let last = flight.trajectory.last().unwrap();
            prop_assert!(flight.bounce_point.t <= flight.strike_point.t);
            prop_assert!(flight.strike_point.t <= last.t);
            if flight.bounce_point.t < last.t {
                prop_assert_eq!(flight.bounce_point.z, 0.0);
            }
            for pair in flight.trajectory.windows(2) {
                prop_assert!(pair[0].t <= pair[1].t);
            }
        }
    }
}
