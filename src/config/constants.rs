// src/config/constants.rs

//! パラメータの既定値。YAML で上書きされない項目はここの値を使う。

// --- 物理 ---
pub const GRAVITY: f64 = 9.81; // 重力加速度 (m/s²)
pub const BALL_MASS: f64 = 0.057; // ボール質量 (kg)
pub const DRAG_COEFFICIENT: f64 = 0.00002; // 二次抵抗係数 k_d
pub const MAGNUS_COEFFICIENT: f64 = 0.00005; // マグヌス係数 k_m
pub const ENERGY_LOSS: f64 = 0.8; // バウンド時の鉛直速度の反発係数
pub const FRICTION_LOSS: f64 = 0.9; // バウンド時の前進速度の保持率
pub const SPIN_KICK_COEFFICIENT: f64 = 0.005; // バウンド時のスピンによる前進速度加算 (m/s per rad/s)
pub const MIN_SPEED: f64 = 0.001; // ゼロ除算回避のための速度下限 (m/s)
pub const TIME_STEP: f64 = 0.01; // 積分の時間刻み (s)
pub const FLIGHT_DURATION: f64 = 5.0; // シミュレーションの最大時間 (s)
pub const LAUNCH_HEIGHT: f64 = 1.2; // 打点の高さ (m)
pub const STRIKE_DELAY_STEPS: usize = 10; // バウンドのステップを含む、打点までのステップ数

// --- コート ---
pub const COURT_WIDTH: f64 = 8.23; // (m)
pub const COURT_LENGTH: f64 = 23.77; // (m)
pub const NET_HEIGHT: f64 = 0.914; // (m)
pub const SERVE_BOX_LENGTH: f64 = 6.40; // ネットからサービスラインまで (m)

// --- ショット ---
pub const MPH_TO_MPS: f64 = 0.44704;
pub const IMPACT_COEFFICIENT: f64 = 0.15;
pub const IMPACT_LOW_THRESHOLD: f64 = 0.1;
pub const IMPACT_MEDIUM_THRESHOLD: f64 = 0.3;
pub const MAX_RALLY_SHOTS: usize = 200;

// --- 相手AI ---
pub const FORWARD_VELOCITY_FRACTION: f64 = 0.5; // 既定パワーに対する前進速度の割合
pub const VZ_SWEEP_MIN: f64 = -5.0; // (m/s)
pub const VZ_SWEEP_MAX: f64 = 15.0; // (m/s)
pub const VZ_SWEEP_STEP: f64 = 0.1; // (m/s)
pub const TARGET_GRID_STEP: f64 = 0.5; // (m)
pub const MIN_TARGET_DEPTH: f64 = 4.0; // ネットから狙う最短距離 (m)
