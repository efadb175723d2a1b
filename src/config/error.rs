// src/config/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ファイルを読み込めません: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML の解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("パラメータ {name} の値が不正です: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("未知のストローク名です: {0}")]
    UnknownStroke(String),
    #[error("{0} はヒューリスティックエージェントではありません")]
    NotHeuristic(&'static str),
}
