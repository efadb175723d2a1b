// src/config/scenario.rs

use serde::Deserialize;

use crate::config::ConfigError;
use crate::math::Position;
use crate::models::agent::{stroke_by_name, Agent, Stroke};
use crate::models::shot::PointSetup;
use crate::models::trajectory::ShotAttempt;

/// 1ポイント分のシナリオ
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub setup: PointSetup,
    pub player: Agent,
    pub opponent: Agent,
    #[serde(default)]
    pub player_start: Option<Position>, // 省略時はベースライン中央
    #[serde(default)]
    pub opponent_start: Option<Position>,
    #[serde(default)]
    pub seed: Option<u64>, // ミス判定の乱数シード
    #[serde(default)]
    pub shots: Vec<ScriptedShot>, // 人間の選手が順に打つショット
}

/// 台本のショット
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedShot {
    #[serde(default)]
    pub stroke: Option<String>,
    pub shot_angle: f64,
    pub power: f64,
    pub spin: f64,
    pub launch_angle: f64,
}

impl ScriptedShot {
    pub fn attempt(&self) -> ShotAttempt {
        ShotAttempt {
            shot_angle: self.shot_angle,
            power: self.power,
            spin: self.spin,
            launch_angle: self.launch_angle,
        }
    }

    /// ストローク名を補正値に解決する
    pub fn stroke(&self) -> Result<Option<&'static Stroke>, ConfigError> {
        self.stroke.as_deref().map(stroke_by_name).transpose()
    }
}

impl Scenario {
    /// 相手がヒューリスティックエージェントであること、台本のストローク名が既知であることを検査する
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.opponent.as_heuristic("opponent")?;
        for shot in &self.shots {
            shot.stroke()?;
        }
        Ok(())
    }
}
