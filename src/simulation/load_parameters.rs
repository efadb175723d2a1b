// src/simulation/load_parameters.rs

use std::fs::File;
use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ConfigError, Scenario, SimulationParameters};

/// YAMLファイルを任意の型として読み込む
pub fn parse_yaml<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let data: T = serde_yaml::from_str(&contents)?;
    Ok(data)
}

/// シミュレーションパラメータの読み込み（妥当性検査つき）
pub fn load_simulation_parameters(path: &str) -> Result<SimulationParameters, ConfigError> {
    let params: SimulationParameters = parse_yaml(path)?;
    params.validate()?;
    debug!(path, "simulation parameters loaded");
    Ok(params)
}

/// シナリオの読み込み（妥当性検査つき）
pub fn load_scenario(path: &str) -> Result<Scenario, ConfigError> {
    let scenario: Scenario = parse_yaml(path)?;
    scenario.validate()?;
    debug!(path, shots = scenario.shots.len(), "scenario loaded");
    Ok(scenario)
}
