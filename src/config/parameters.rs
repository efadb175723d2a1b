// src/config/parameters.rs

use serde::Deserialize;

use crate::config::constants::*;
use crate::config::error::ConfigError;

/// ボールの飛行と積分に関するパラメータ
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsParameters {
    pub gravity: f64,               // 重力加速度 (m/s²)
    pub ball_mass: f64,             // ボール質量 (kg)
    pub drag_coefficient: f64,      // 二次抵抗係数
    pub magnus_coefficient: f64,    // マグヌス係数
    pub energy_loss: f64,           // バウンド時の反発係数
    pub friction_loss: f64,         // バウンド時の前進速度保持率
    pub spin_kick_coefficient: f64, // バウンド時のスピンキック
    pub min_speed: f64,             // 速度下限 (m/s)
    pub dt: f64,                    // 時間刻み (s)
    pub duration: f64,              // 最大飛行時間 (s)
    pub launch_height: f64,         // 打点の高さ (m)
    pub strike_delay_steps: usize,  // バウンドのステップを含む打点までのステップ数
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        PhysicsParameters {
            gravity: GRAVITY,
            ball_mass: BALL_MASS,
            drag_coefficient: DRAG_COEFFICIENT,
            magnus_coefficient: MAGNUS_COEFFICIENT,
            energy_loss: ENERGY_LOSS,
            friction_loss: FRICTION_LOSS,
            spin_kick_coefficient: SPIN_KICK_COEFFICIENT,
            min_speed: MIN_SPEED,
            dt: TIME_STEP,
            duration: FLIGHT_DURATION,
            launch_height: LAUNCH_HEIGHT,
            strike_delay_steps: STRIKE_DELAY_STEPS,
        }
    }
}

/// コート寸法
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CourtParameters {
    pub width: f64,
    pub length: f64,
    pub net_height: f64,
    pub serve_box_length: f64,
}

impl Default for CourtParameters {
    fn default() -> Self {
        CourtParameters {
            width: COURT_WIDTH,
            length: COURT_LENGTH,
            net_height: NET_HEIGHT,
            serve_box_length: SERVE_BOX_LENGTH,
        }
    }
}

/// ショット判定のパラメータ
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShotParameters {
    pub mph_to_mps: f64,
    pub impact_coefficient: f64,
    pub impact_low_threshold: f64,
    pub impact_medium_threshold: f64,
    pub power_error_coefficient: f64,  // ミス確率のパワー項（0で無効）
    pub impact_error_coefficient: f64, // ミス確率のインパクト項（0で無効）
    pub accuracy_jitter_deg: f64,      // 打球角度のぶれ幅（0で無効）
    pub max_rally_shots: usize,
}

impl Default for ShotParameters {
    fn default() -> Self {
        ShotParameters {
            mph_to_mps: MPH_TO_MPS,
            impact_coefficient: IMPACT_COEFFICIENT,
            impact_low_threshold: IMPACT_LOW_THRESHOLD,
            impact_medium_threshold: IMPACT_MEDIUM_THRESHOLD,
            power_error_coefficient: 0.0,
            impact_error_coefficient: 0.0,
            accuracy_jitter_deg: 0.0,
            max_rally_shots: MAX_RALLY_SHOTS,
        }
    }
}

/// 相手AIの探索パラメータ
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlannerParameters {
    pub forward_velocity_fraction: f64,
    pub vz_min: f64,
    pub vz_max: f64,
    pub vz_step: f64,
    pub grid_step: f64,
    pub min_target_depth: f64,
}

impl Default for PlannerParameters {
    fn default() -> Self {
        PlannerParameters {
            forward_velocity_fraction: FORWARD_VELOCITY_FRACTION,
            vz_min: VZ_SWEEP_MIN,
            vz_max: VZ_SWEEP_MAX,
            vz_step: VZ_SWEEP_STEP,
            grid_step: TARGET_GRID_STEP,
            min_target_depth: MIN_TARGET_DEPTH,
        }
    }
}

/// 全パラメータ
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimulationParameters {
    pub physics: PhysicsParameters,
    pub court: CourtParameters,
    pub shot: ShotParameters,
    pub planner: PlannerParameters,
}

impl SimulationParameters {
    /// 設定値の妥当性を検査する
    ///
    /// # 戻り値
    /// - 不正な値があれば最初に見つかったものを`ConfigError::InvalidParameter`で返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let c = &self.court;
        let s = &self.shot;
        let a = &self.planner;

        let positive = [
            ("physics.gravity", p.gravity),
            ("physics.ball_mass", p.ball_mass),
            ("physics.min_speed", p.min_speed),
            ("physics.dt", p.dt),
            ("physics.duration", p.duration),
            ("court.width", c.width),
            ("court.length", c.length),
            ("court.net_height", c.net_height),
            ("court.serve_box_length", c.serve_box_length),
            ("shot.mph_to_mps", s.mph_to_mps),
            ("planner.forward_velocity_fraction", a.forward_velocity_fraction),
            ("planner.vz_step", a.vz_step),
            ("planner.grid_step", a.grid_step),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        for (name, value) in [
            ("physics.drag_coefficient", p.drag_coefficient),
            ("physics.magnus_coefficient", p.magnus_coefficient),
            ("physics.launch_height", p.launch_height),
            ("shot.impact_coefficient", s.impact_coefficient),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        for (name, value) in [
            ("physics.energy_loss", p.energy_loss),
            ("physics.friction_loss", p.friction_loss),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        if c.serve_box_length >= c.length / 2.0 {
            return Err(ConfigError::InvalidParameter {
                name: "court.serve_box_length",
                value: c.serve_box_length,
            });
        }
        if a.vz_max < a.vz_min {
            return Err(ConfigError::InvalidParameter {
                name: "planner.vz_max",
                value: a.vz_max,
            });
        }
        if a.min_target_depth < 0.0 || a.min_target_depth >= c.length / 2.0 {
            return Err(ConfigError::InvalidParameter {
                name: "planner.min_target_depth",
                value: a.min_target_depth,
            });
        }
        if p.strike_delay_steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "physics.strike_delay_steps",
                value: 0.0,
            });
        }
        Ok(())
    }
}
