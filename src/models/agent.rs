// src/models/agent.rs

use serde::Deserialize;

use crate::config::ConfigError;

/// 人間が操作する選手
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HumanAgent {
    pub consistency: f64, // 安定性 (0-1)
    pub accuracy: f64,    // 正確性 (0-1)
    pub speed: f64,       // 移動速度 (m/s)
}

/// ヒューリスティックで打つ選手
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeuristicAgent {
    pub consistency: f64,
    pub accuracy: f64,
    pub speed: f64,
    pub error_margin: f64,  // ラインから内側に取る余裕 (m)
    pub default_spin: f64,  // 既定の回転数 (rpm)
    pub default_power: f64, // 既定のパワー (mph)
}

/// 選手のプロファイル
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Agent {
    Human(HumanAgent),
    Heuristic(HeuristicAgent),
}

impl Agent {
    pub fn consistency(&self) -> f64 {
        match self {
            Agent::Human(a) => a.consistency,
            Agent::Heuristic(a) => a.consistency,
        }
    }

    pub fn accuracy(&self) -> f64 {
        match self {
            Agent::Human(a) => a.accuracy,
            Agent::Heuristic(a) => a.accuracy,
        }
    }

    pub fn speed(&self) -> f64 {
        match self {
            Agent::Human(a) => a.speed,
            Agent::Heuristic(a) => a.speed,
        }
    }

    /// ヒューリスティックエージェントとして取り出す
    ///
    /// # 引数
    /// - `role`: エラーメッセージ用の役割名
    pub fn as_heuristic(&self, role: &'static str) -> Result<&HeuristicAgent, ConfigError> {
        match self {
            Agent::Heuristic(a) => Ok(a),
            Agent::Human(_) => Err(ConfigError::NotHeuristic(role)),
        }
    }
}

/// ストロークの種類ごとの補正
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub name: &'static str,
    pub power: f64,       // パワー倍率
    pub consistency: f64, // 安定性倍率
    pub accuracy: f64,    // 正確性倍率
}

pub const STROKES: [Stroke; 3] = [
    Stroke { name: "Topspin", power: 0.8, consistency: 0.8, accuracy: 0.8 },
    Stroke { name: "Flat", power: 1.0, consistency: 0.7, accuracy: 0.95 },
    Stroke { name: "Slice", power: 0.6, consistency: 0.9, accuracy: 0.9 },
];

/// 名前からストロークを引く。大文字小文字は区別しない。
pub fn stroke_by_name(name: &str) -> Result<&'static Stroke, ConfigError> {
    STROKES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownStroke(name.to_string()))
}
