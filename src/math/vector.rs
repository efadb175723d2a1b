// src/math/vector.rs

use serde::Deserialize;

use crate::math::error::MathError;

/// コート平面上の位置 (m)。原点はネット中央、x は横方向、y はコート長手方向。
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// コート平面上の方向ベクトル
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    pub fn norm(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2次元の外積（z成分）
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// 単位ベクトルを返す
    ///
    /// # 戻り値
    /// - 長さがほぼゼロの場合は`MathError::ZeroLengthDirection`
    pub fn normalize(&self) -> Result<Vector, MathError> {
        let length = self.norm();
        if length < 1e-9 {
            return Err(MathError::ZeroLengthDirection);
        }
        Ok(Vector::new(self.x / length, self.y / length))
    }

    /// 反時計回りに`angle_rad`だけ回転する
    pub fn rotate(&self, angle_rad: f64) -> Vector {
        let (sin_a, cos_a) = angle_rad.sin_cos();
        Vector::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }
}

/// `from`から`to`へ向かうベクトル
pub fn displacement(from: &Position, to: &Position) -> Vector {
    Vector::new(to.x - from.x, to.y - from.y)
}

/// 2点間の距離
pub fn distance(a: &Position, b: &Position) -> f64 {
    displacement(a, b).norm()
}
