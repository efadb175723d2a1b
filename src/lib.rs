// src/lib.rs

//! ターン制テニスのポイントシミュレーター。
//!
//! 打球の飛行計算、コート座標への変換、レシーバーの移動計算、ショットの判定、
//! 相手AIのショット計画からなる。

pub mod config;
pub mod error;
pub mod math;
pub mod models;
pub mod simulation;
