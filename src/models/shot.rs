// src/models/shot.rs

use std::f64::consts::TAU;

use serde::Deserialize;
use tracing::info;

use crate::config::{ShotParameters, SimulationParameters};
use crate::error::SimError;
use crate::math::{distance, MathError, Position};
use crate::models::agent::{Agent, Stroke};
use crate::models::ball::{simulate_shot_with_bounce, FlightInput};
use crate::models::court::{
    in_court, in_serve_box, net_distance_along_path, shot_direction, project_point, to_3d,
    Participant, ServeSide,
};
use crate::models::runner::{calculate_run, RunResult};
use crate::models::shot_error::{ErrorInputs, ShotErrorModel};
use crate::models::trajectory::{ShotAttempt, ShotResult};
use crate::simulation::MatchState;

/// ポイント開始時の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PointSetup {
    pub serve_side: ServeSide,
    pub server: Participant,
}

/// ショットの判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotVerdict {
    Shank,       // ラケットから出なかった
    NetFault,    // ネット
    OutOfBounds, // アウト
    ServeFault,  // サーブがサービスボックスに入らない
    Winner,      // 相手が間に合わない
    InPlay,      // ラリー継続
}

impl ShotVerdict {
    /// ポイントが決まった場合の勝者
    pub fn point_winner(self, shooter: Participant) -> Option<Participant> {
        match self {
            ShotVerdict::Shank
            | ShotVerdict::NetFault
            | ShotVerdict::OutOfBounds
            | ShotVerdict::ServeFault => Some(shooter.other()),
            ShotVerdict::Winner => Some(shooter),
            ShotVerdict::InPlay => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ShotVerdict::Shank => "Shank!",
            ShotVerdict::NetFault => "Into the net.",
            ShotVerdict::OutOfBounds => "Out.",
            ShotVerdict::ServeFault => "Fault! The serve missed the service box.",
            ShotVerdict::Winner => "Clean winner.",
            ShotVerdict::InPlay => "Ball in play.",
        }
    }
}

/// インパクトの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn from_impact(impact: f64, params: &ShotParameters) -> Self {
        if impact <= params.impact_low_threshold {
            ImpactLevel::Low
        } else if impact <= params.impact_medium_threshold {
            ImpactLevel::Medium
        } else {
            ImpactLevel::High
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImpactLevel::Low => "You get to the ball with plenty of time to spare, setting yourself up for a perfect shot.",
            ImpactLevel::Medium => "You get to the ball with just enough time to set up for a good shot.",
            ImpactLevel::High => "You barely get to the ball in time, forcing you to make a difficult shot",
        }
    }
}

/// 1ショットの解決結果
#[derive(Debug, Clone, PartialEq)]
pub struct ShotOutcome {
    pub shooter: Participant,
    pub result: ShotResult,
    pub verdict: ShotVerdict,
    pub error_chance: f64,
    pub receiver_run: Option<RunResult>,
    pub impact: Option<f64>,
}

impl ShotOutcome {
    pub fn point_winner(&self) -> Option<Participant> {
        self.verdict.point_winner(self.shooter)
    }
}

/// ポイント中に変わらない情報
#[derive(Debug, Clone, Copy)]
pub struct PointContext<'a> {
    pub setup: PointSetup,
    pub player: &'a Agent,
    pub opponent: &'a Agent,
    pub params: &'a SimulationParameters,
}

impl<'a> PointContext<'a> {
    pub fn agent(&self, who: Participant) -> &'a Agent {
        match who {
            Participant::Player => self.player,
            Participant::Opponent => self.opponent,
        }
    }
}

/// インパクト（レシーバーの移動距離とパワーから決まる難しさ）
///
/// # 引数
/// - `receiver`: レシーバーの位置
/// - `strike`: 打点
/// - `power`: ショットのパワー (mph)
/// - `impact_coefficient`: 係数
pub fn calculate_impact(receiver: &Position, strike: &Position, power: f64, impact_coefficient: f64) -> f64 {
    (distance(receiver, strike) + 1.0).powi(2) * power * impact_coefficient
}

/// パワーと打ち出し角を1次元座標系の初速に変換する
pub fn launch_velocity(power_mph: f64, launch_angle_deg: f64, mph_to_mps: f64) -> (f64, f64) {
    let speed = power_mph * mph_to_mps;
    let (sin_a, cos_a) = launch_angle_deg.to_radians().sin_cos();
    (speed * cos_a, speed * sin_a)
}

pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * TAU / 60.0
}

/// `calculate_shot`の結果
#[derive(Debug, Clone, PartialEq)]
pub struct ShotComputation {
    pub result: ShotResult,
    pub error_chance: f64,
    pub net_error: bool,
}

/// ショット1本の飛行を計算する
///
/// ミス判定、飛行シミュレーション、コート座標への変換を行い、ネットとアウトを判定する。
///
/// # 引数
/// - `shooter`: 打球者の位置
/// - `attempt`: ショットの入力
/// - `error_inputs`: ミス判定の入力
/// - `params`: パラメータ
/// - `error_model`: ミス判定
///
/// # 戻り値
/// - ショットの結果、ミス確率、ネットにかかったかどうか
pub fn calculate_shot(
    shooter: &Position,
    attempt: &ShotAttempt,
    error_inputs: &ErrorInputs,
    params: &SimulationParameters,
    error_model: &mut dyn ShotErrorModel,
) -> Result<ShotComputation, MathError> {
    let check = error_model.check(error_inputs);
    if check.error {
        return Ok(ShotComputation {
            result: ShotResult::shank(),
            error_chance: check.error_chance,
            net_error: false,
        });
    }

    // ぶれを含めた角度で軌道・バウンド点・打点をそろえて写す
    let shot_angle = check.shot_angle;
    let (initial_vd, initial_vz) = launch_velocity(attempt.power, attempt.launch_angle, params.shot.mph_to_mps);
    let flight = simulate_shot_with_bounce(
        &FlightInput {
            initial_vd,
            initial_vz,
            spin: rpm_to_rad_per_sec(attempt.spin),
            initial_height: params.physics.launch_height,
            net_distance: net_distance_along_path(shooter, shot_angle)?,
        },
        &params.physics,
        &params.court,
    );

    let trajectory_3d = to_3d(shooter, &flight.trajectory, shot_angle)?;
    let direction = shot_direction(shooter, shot_angle)?;
    let bounce_point = project_point(shooter, &direction, &flight.bounce_point);
    let strike_point = project_point(shooter, &direction, &flight.strike_point);

    let miss = flight.net_error || !in_court(&bounce_point.position(), &params.court);

    Ok(ShotComputation {
        result: ShotResult {
            bounce_point,
            strike_point,
            error: false,
            miss,
            trajectory_2d: flight.trajectory,
            trajectory_3d,
        },
        error_chance: check.error_chance,
        net_error: flight.net_error,
    })
}

/// 手番の選手のショットを解決し、ポイントの状態を更新する
///
/// # 引数
/// - `state`: ポイントの状態（手番・位置・ラリー数）
/// - `context`: 選手とパラメータ
/// - `attempt`: ショットの入力
/// - `stroke`: ストローク補正（人間の選手のみ）
/// - `error_model`: ミス判定
///
/// # 戻り値
/// - 判定、ボール軌道、レシーバーの移動、インパクト
pub fn resolve_shot(
    state: &mut MatchState,
    context: &PointContext,
    attempt: &ShotAttempt,
    stroke: Option<&Stroke>,
    error_model: &mut dyn ShotErrorModel,
) -> Result<ShotOutcome, SimError> {
    let params = context.params;
    let shooter = state.turn;
    let receiver = shooter.other();
    let shooter_agent = context.agent(shooter);

    let (attempt, consistency, accuracy) = match stroke {
        Some(s) => (
            ShotAttempt { power: attempt.power * s.power, ..*attempt },
            shooter_agent.consistency() * s.consistency,
            shooter_agent.accuracy() * s.accuracy,
        ),
        None => (*attempt, shooter_agent.consistency(), shooter_agent.accuracy()),
    };
    let error_inputs = ErrorInputs {
        consistency,
        accuracy,
        power: attempt.power,
        shot_angle: attempt.shot_angle,
        impact: state.last_impact,
    };

    let computation = calculate_shot(
        &state.position_of(shooter),
        &attempt,
        &error_inputs,
        params,
        error_model,
    )?;

    let mut outcome = ShotOutcome {
        shooter,
        result: computation.result,
        verdict: ShotVerdict::InPlay,
        error_chance: computation.error_chance,
        receiver_run: None,
        impact: None,
    };
    // サーブのミスはネットでもアウトでもフォルト
    outcome.verdict = if outcome.result.error {
        ShotVerdict::Shank
    } else if state.is_serve()
        && (outcome.result.miss
            || !in_serve_box(
                &outcome.result.bounce_point.position(),
                context.setup.serve_side,
                context.setup.server,
                &params.court,
            ))
    {
        outcome.result.miss = true;
        ShotVerdict::ServeFault
    } else if computation.net_error {
        ShotVerdict::NetFault
    } else if outcome.result.miss {
        ShotVerdict::OutOfBounds
    } else {
        let receiver_position = state.position_of(receiver);
        let strike = outcome.result.strike_point;
        let impact = calculate_impact(
            &receiver_position,
            &strike.position(),
            attempt.power,
            params.shot.impact_coefficient,
        );
        let run = calculate_run(
            &receiver_position,
            &strike,
            context.agent(receiver).speed(),
            params.physics.dt,
        )?;
        let verdict = if run.reached {
            ShotVerdict::InPlay
        } else {
            ShotVerdict::Winner
        };
        outcome.impact = Some(impact);
        outcome.receiver_run = Some(run);
        verdict
    };

    info!(
        shooter = ?shooter,
        rally = state.rally_count,
        verdict = ?outcome.verdict,
        bounce_x = outcome.result.bounce_point.x,
        bounce_y = outcome.result.bounce_point.y,
        "shot resolved"
    );

    // 状態の更新
    state.ball = outcome.result.trajectory_3d.last().copied();
    if let Some(run) = &outcome.receiver_run {
        state.set_position(receiver, run.final_location);
    }
    if outcome.verdict == ShotVerdict::InPlay {
        state.ball = Some(outcome.result.strike_point);
        state.rally_count += 1;
        state.turn = receiver;
        state.last_impact = outcome.impact.unwrap_or(0.0);
    }

    Ok(outcome)
}
