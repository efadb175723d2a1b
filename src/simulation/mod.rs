// src/simulation/mod.rs

pub mod csv;
pub mod framework;
pub mod load_parameters;

use crate::config::CourtParameters;
use crate::math::Position;
use crate::models::court::Participant;
use crate::models::trajectory::TrajectoryPoint3D;

/// 進行中のポイントの状態。ショットごとに`resolve_shot`が更新する。
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub player_position: Position,
    pub opponent_position: Position,
    pub ball: Option<TrajectoryPoint3D>, // 直前のショットでボールが最後にあった点
    pub rally_count: usize,
    pub turn: Participant,
    pub last_impact: f64, // 直前のショットのインパクト（次のミス判定に使う）
}

impl MatchState {
    /// 両者をベースライン中央に置き、サーバーの手番で始める
    pub fn new(server: Participant, court: &CourtParameters) -> Self {
        MatchState {
            player_position: Position::new(0.0, court.length / 2.0),
            opponent_position: Position::new(0.0, -court.length / 2.0),
            ball: None,
            rally_count: 0,
            turn: server,
            last_impact: 0.0,
        }
    }

    pub fn position_of(&self, who: Participant) -> Position {
        match who {
            Participant::Player => self.player_position,
            Participant::Opponent => self.opponent_position,
        }
    }

    pub fn set_position(&mut self, who: Participant, position: Position) {
        match who {
            Participant::Player => self.player_position = position,
            Participant::Opponent => self.opponent_position = position,
        }
    }

    /// このポイントの最初のショット（サーブ）か
    pub fn is_serve(&self) -> bool {
        self.rally_count == 0
    }
}
