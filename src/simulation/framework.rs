// src/simulation/framework.rs

use tracing::{info, warn};

use crate::config::{CourtParameters, Scenario, SimulationParameters};
use crate::error::SimError;
use crate::math::Position;
use crate::models::agent::{Agent, Stroke};
use crate::models::court::Participant;
use crate::models::opponent::plan_shot;
use crate::models::shot::{resolve_shot, PointContext, ShotOutcome};
use crate::models::shot_error::ShotErrorModel;
use crate::models::trajectory::ShotAttempt;
use crate::simulation::MatchState;

/// ポイントの終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEnding {
    PointWon,        // どちらかがポイントを取った
    ScriptExhausted, // 台本のショットが尽きた
    RallyLimit,      // ラリーの上限に達した
}

/// 1ショット分の記録
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub shooter: Participant,
    pub attempt: ShotAttempt,
    pub stroke: Option<&'static str>,
    pub target: Option<Position>, // 相手AIが狙った点
    pub player_position: Position, // 打球時の位置
    pub opponent_position: Position,
    pub outcome: ShotOutcome,
}

/// 1ポイントの結果
#[derive(Debug, Clone, PartialEq)]
pub struct PointSummary {
    pub winner: Option<Participant>,
    pub ending: PointEnding,
    pub shots: Vec<ShotRecord>,
    pub final_state: MatchState,
}

/// ポイント開始時の状態を作る
pub fn initialize_point_state(scenario: &Scenario, court: &CourtParameters) -> MatchState {
    let mut state = MatchState::new(scenario.setup.server, court);
    if let Some(start) = scenario.player_start {
        state.player_position = start;
    }
    if let Some(start) = scenario.opponent_start {
        state.opponent_position = start;
    }
    state
}

/// 1ポイントを最後まで進める
///
/// サーバーから交互に打つ。人間の選手は台本のショットを順に使い、ヒューリスティックの選手は
/// 毎回ショットを計画する。
///
/// # 引数
/// - `scenario`: ポイントの設定、選手、台本
/// - `params`: パラメータ（最初に妥当性を検査する）
/// - `error_model`: ミス判定
///
/// # 戻り値
/// - 勝者、終わり方、全ショットの記録
pub fn play_point(
    scenario: &Scenario,
    params: &SimulationParameters,
    error_model: &mut dyn ShotErrorModel,
) -> Result<PointSummary, SimError> {
    params.validate()?;
    scenario.validate()?;

    let context = PointContext {
        setup: scenario.setup,
        player: &scenario.player,
        opponent: &scenario.opponent,
        params,
    };
    let mut state = initialize_point_state(scenario, &params.court);
    let mut script = scenario.shots.iter();
    let mut shots: Vec<ShotRecord> = Vec::new();

    let (winner, ending) = loop {
        if shots.len() >= params.shot.max_rally_shots {
            warn!(shots = shots.len(), "rally limit reached");
            break (None, PointEnding::RallyLimit);
        }

        let shooter = state.turn;
        let shooter_position = state.position_of(shooter);
        let (attempt, stroke, target): (ShotAttempt, Option<&'static Stroke>, Option<Position>) =
            match context.agent(shooter) {
                Agent::Human(_) => match script.next() {
                    Some(scripted) => (scripted.attempt(), scripted.stroke()?, None),
                    None => {
                        warn!(shooter = ?shooter, shots = shots.len(), "no scripted shot left");
                        break (None, PointEnding::ScriptExhausted);
                    }
                },
                Agent::Heuristic(ai) => {
                    let serve_side = state.is_serve().then_some(scenario.setup.serve_side);
                    let rival = state.position_of(shooter.other());
                    let planned = plan_shot(&shooter_position, &rival, serve_side, ai, params)?;
                    (planned.attempt, None, Some(planned.target))
                }
            };

        let player_position = state.player_position;
        let opponent_position = state.opponent_position;
        let outcome = resolve_shot(&mut state, &context, &attempt, stroke, error_model)?;
        let winner = outcome.point_winner();

        shots.push(ShotRecord {
            shooter,
            attempt,
            stroke: stroke.map(|s| s.name),
            target,
            player_position,
            opponent_position,
            outcome,
        });

        if let Some(winner) = winner {
            break (Some(winner), PointEnding::PointWon);
        }
    };

    info!(winner = ?winner, ending = ?ending, shots = shots.len(), "point finished");
    Ok(PointSummary {
        winner,
        ending,
        shots,
        final_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ScriptedShot};
    use crate::models::agent::{HeuristicAgent, HumanAgent};
    use crate::models::court::ServeSide;
    use crate::models::shot::{PointSetup, ShotVerdict};
    use crate::models::shot_error::NoShotError;

    fn scripted(shot_angle: f64, power: f64, launch_angle: f64) -> ScriptedShot {
        ScriptedShot {
            stroke: None,
            shot_angle,
            power,
            spin: 0.0,
            launch_angle,
        }
    }

    fn scenario(server: Participant, serve_side: ServeSide, player_speed: f64, shots: Vec<ScriptedShot>) -> Scenario {
        Scenario {
            setup: PointSetup { serve_side, server },
            player: Agent::Human(HumanAgent { consistency: 0.9, accuracy: 0.9, speed: player_speed }),
            opponent: Agent::Heuristic(HeuristicAgent {
                consistency: 0.8,
                accuracy: 0.8,
                speed: 8.0,
                error_margin: 0.5,
                default_spin: 1500.0,
                default_power: 50.0,
            }),
            player_start: None,
            opponent_start: None,
            seed: None,
            shots,
        }
    }

    #[test]
    fn test_initialize_point_state_uses_starts() {
        let mut s = scenario(Participant::Opponent, ServeSide::Ad, 6.0, vec![]);
        s.opponent_start = Some(Position::new(1.0, -11.0));
        let state = initialize_point_state(&s, &CourtParameters::default());

        assert_eq!(state.player_position, Position::new(0.0, 11.885));
        assert_eq!(state.opponent_position, Position::new(1.0, -11.0));
        assert_eq!(state.turn, Participant::Opponent);
        assert!(state.is_serve());
    }

    #[test]
    fn test_empty_script_ends_before_serve() {
        let params = SimulationParameters::default();
        let summary = play_point(&scenario(Participant::Player, ServeSide::Ad, 6.0, vec![]), &params, &mut NoShotError).unwrap();

        assert_eq!(summary.ending, PointEnding::ScriptExhausted);
        assert_eq!(summary.winner, None);
        assert!(summary.shots.is_empty());
    }

    #[test]
    fn test_serve_fault_gives_point_to_receiver() {
        let params = SimulationParameters::default();
        let s = scenario(Participant::Player, ServeSide::Deuce, 6.0, vec![scripted(10.0, 25.0, 45.0)]);
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        assert_eq!(summary.ending, PointEnding::PointWon);
        assert_eq!(summary.winner, Some(Participant::Opponent));
        assert_eq!(summary.shots.len(), 1);
        assert_eq!(summary.shots[0].outcome.verdict, ShotVerdict::ServeFault);
    }

    #[test]
    fn test_opponent_serve_then_script_runs_out() {
        let params = SimulationParameters::default();
        let s = scenario(Participant::Opponent, ServeSide::Deuce, 6.0, vec![]);
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        assert_eq!(summary.ending, PointEnding::ScriptExhausted);
        assert_eq!(summary.shots.len(), 1);
        let serve = &summary.shots[0];
        assert_eq!(serve.shooter, Participant::Opponent);
        assert_eq!(serve.outcome.verdict, ShotVerdict::InPlay);
        assert!(serve.target.is_some());
        assert_eq!(summary.final_state.rally_count, 1);
        assert_eq!(summary.final_state.turn, Participant::Player);
    }

    #[test]
    fn test_slow_player_cannot_return_opponent_serve() {
        let params = SimulationParameters::default();
        let s = scenario(Participant::Opponent, ServeSide::Deuce, 1.0, vec![]);
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        assert_eq!(summary.winner, Some(Participant::Opponent));
        assert_eq!(summary.shots[0].outcome.verdict, ShotVerdict::Winner);
    }

    #[test]
    fn test_rally_until_opponent_winner() {
        let params = SimulationParameters::default();
        let s = scenario(
            Participant::Player,
            ServeSide::Ad,
            6.0,
            vec![scripted(10.0, 25.0, 45.0), scripted(0.0, 30.0, 45.0)],
        );
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        // サーブが入り、相手の返球に人間が追いつけない
        assert_eq!(summary.shots.len(), 2);
        assert_eq!(summary.shots[0].outcome.verdict, ShotVerdict::InPlay);
        assert_eq!(summary.shots[1].shooter, Participant::Opponent);
        assert_eq!(summary.shots[1].outcome.verdict, ShotVerdict::Winner);
        assert_eq!(summary.winner, Some(Participant::Opponent));
        assert_eq!(summary.ending, PointEnding::PointWon);

        // 相手は1本目の打点から打ち返す
        let strike = summary.shots[0].outcome.result.strike_point.position();
        assert!(crate::math::distance(&summary.shots[1].opponent_position, &strike) < 1e-9);
    }

    #[test]
    fn test_fast_player_reaches_return_and_script_runs_out() {
        let params = SimulationParameters::default();
        let s = scenario(Participant::Player, ServeSide::Ad, 20.0, vec![scripted(10.0, 25.0, 45.0)]);
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        assert_eq!(summary.shots.len(), 2);
        assert_eq!(summary.shots[1].outcome.verdict, ShotVerdict::InPlay);
        assert_eq!(summary.ending, PointEnding::ScriptExhausted);
        assert_eq!(summary.final_state.rally_count, 2);
    }

    #[test]
    fn test_rally_limit_stops_point() {
        let mut params = SimulationParameters::default();
        params.shot.max_rally_shots = 1;
        let s = scenario(Participant::Opponent, ServeSide::Deuce, 6.0, vec![scripted(0.0, 30.0, 45.0)]);
        let summary = play_point(&s, &params, &mut NoShotError).unwrap();

        assert_eq!(summary.ending, PointEnding::RallyLimit);
        assert_eq!(summary.shots.len(), 1);
        assert_eq!(summary.winner, None);
    }

    #[test]
    fn test_human_opponent_fails_loudly() {
        let params = SimulationParameters::default();
        let mut s = scenario(Participant::Player, ServeSide::Ad, 6.0, vec![]);
        s.opponent = s.player.clone();
        assert!(matches!(play_point(&s, &params, &mut NoShotError), Err(SimError::Config(_))));
    }

    #[test]
    fn test_invalid_parameters_fail_before_play() {
        // 時間ステップ0は打つ前に設定エラーになる
        let mut params = SimulationParameters::default();
        params.physics.dt = 0.0;
        let s = scenario(Participant::Player, ServeSide::Ad, 6.0, vec![scripted(10.0, 25.0, 45.0)]);
        assert!(matches!(
            play_point(&s, &params, &mut NoShotError),
            Err(SimError::Config(ConfigError::InvalidParameter { name: "physics.dt", .. }))
        ));
    }
}
