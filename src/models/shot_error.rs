// src/models/shot_error.rs

use rand::Rng;

use crate::config::ShotParameters;

/// ミス判定の入力
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorInputs {
    pub consistency: f64,
    pub accuracy: f64,
    pub power: f64,
    pub shot_angle: f64,
    pub impact: f64, // 直前の相手ショットのインパクト
}

/// ミス判定の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotErrorCheck {
    pub shot_angle: f64, // ぶれを加えた打球角度
    pub error_chance: f64,
    pub error: bool,
}

/// ショットのミス判定
pub trait ShotErrorModel {
    fn check(&mut self, inputs: &ErrorInputs) -> ShotErrorCheck;
}

/// ミスもぶれも起こさない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShotError;

impl ShotErrorModel for NoShotError {
    fn check(&mut self, inputs: &ErrorInputs) -> ShotErrorCheck {
        ShotErrorCheck {
            shot_angle: inputs.shot_angle,
            error_chance: 0.0,
            error: false,
        }
    }
}

/// 乱数によるミス判定
///
/// 係数がすべて0のときは`NoShotError`と同じ結果になる（乱数は消費する）。
#[derive(Debug, Clone)]
pub struct RandomShotError<R: Rng> {
    rng: R,
    power_error_coefficient: f64,
    impact_error_coefficient: f64,
    accuracy_jitter_deg: f64,
}

impl<R: Rng> RandomShotError<R> {
    pub fn new(rng: R, params: &ShotParameters) -> Self {
        RandomShotError {
            rng,
            power_error_coefficient: params.power_error_coefficient,
            impact_error_coefficient: params.impact_error_coefficient,
            accuracy_jitter_deg: params.accuracy_jitter_deg,
        }
    }
}

impl<R: Rng> ShotErrorModel for RandomShotError<R> {
    fn check(&mut self, inputs: &ErrorInputs) -> ShotErrorCheck {
        let power_squared = inputs.power.powi(2);
        let error_chance = self.power_error_coefficient * (1.0 - inputs.consistency) * power_squared
            + self.impact_error_coefficient * inputs.impact;
        let error = self.rng.gen::<f64>() < error_chance;

        let spread = (1.0 - inputs.accuracy) * power_squared + inputs.impact;
        let jitter = self.accuracy_jitter_deg * (self.rng.gen::<f64>() - 0.5) * spread;

        ShotErrorCheck {
            shot_angle: inputs.shot_angle + jitter,
            error_chance,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    fn inputs() -> ErrorInputs {
        ErrorInputs {
            consistency: 0.5,
            accuracy: 0.5,
            power: 1.0,
            shot_angle: 10.0,
            impact: 0.2,
        }
    }

    #[test]
    fn test_no_shot_error_passes_through() {
        let check = NoShotError.check(&inputs());
        assert_eq!(check.shot_angle, 10.0);
        assert_eq!(check.error_chance, 0.0);
        assert!(!check.error);
    }

    #[test]
    fn test_random_error_disabled_by_default() {
        let mut model = RandomShotError::new(test_rng(), &ShotParameters::default());
        for _ in 0..100 {
            let check = model.check(&inputs());
            assert!(!check.error);
            assert_eq!(check.shot_angle, 10.0);
        }
    }

    #[test]
    fn test_random_error_certain_when_chance_exceeds_one() {
        let params = ShotParameters {
            impact_error_coefficient: 10.0,
            ..ShotParameters::default()
        };
        let mut model = RandomShotError::new(test_rng(), &params);
        let check = model.check(&inputs());
        assert!((check.error_chance - 2.0).abs() < 1e-12);
        assert!(check.error);
    }

    #[test]
    fn test_random_jitter_is_bounded_and_deterministic() {
        let params = ShotParameters {
            accuracy_jitter_deg: 5.0,
            ..ShotParameters::default()
        };
        let mut a = RandomShotError::new(test_rng(), &params);
        let mut b = RandomShotError::new(test_rng(), &params);
        for _ in 0..50 {
            let ca = a.check(&inputs());
            let cb = b.check(&inputs());
            assert_eq!(ca, cb);
            // spread = 0.5 * 1 + 0.2 = 0.7、ぶれは ±5 * 0.5 * 0.7
            assert!((ca.shot_angle - 10.0).abs() <= 1.75);
        }
    }
}
