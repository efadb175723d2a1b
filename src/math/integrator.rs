// src/math/integrator.rs

/// 打球方向の1次元座標系（前進距離 d, 高さ z）における質点の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub d: f64,  // 前進距離 (m)
    pub z: f64,  // 高さ (m)
    pub vd: f64, // 前進速度 (m/s)
    pub vz: f64, // 鉛直速度 (m/s)
}

/// 半陰的オイラー法による1ステップの積分
///
/// 先に速度を更新し、更新後の速度で位置を進める。
///
/// # 引数
/// - `state`: 現在の状態
/// - `acceleration`: 加速度 [a_d, a_z]
/// - `dt`: 時間ステップ
///
/// # 戻り値
/// - 更新後の状態
pub fn semi_implicit_euler(state: FlightState, acceleration: [f64; 2], dt: f64) -> FlightState {
    let vd = state.vd + acceleration[0] * dt;
    let vz = state.vz + acceleration[1] * dt;
    FlightState {
        d: state.d + vd * dt,
        z: state.z + vz * dt,
        vd,
        vz,
    }
}
