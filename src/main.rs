// src/main.rs

use std::error::Error;
use std::fs;
use std::io::Write;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tennissim::models::shot::ImpactLevel;
use tennissim::models::shot_error::RandomShotError;
use tennissim::simulation::csv::{setup_csv_output, write_point_rows};
use tennissim::simulation::framework::play_point;
use tennissim::simulation::load_parameters::{load_scenario, load_simulation_parameters};

/// ログ出力の初期化（`RUST_LOG`がなければ`log_level`）
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing("info");

    // 設定とシナリオの読み込み
    let params = load_simulation_parameters("config/simulation_parameters.yaml")?;
    let scenario = load_scenario("config/scenario.yaml")?;

    // ミス判定（係数が0なら常に成功）
    let rng = ChaCha8Rng::seed_from_u64(scenario.seed.unwrap_or(0));
    let mut error_model = RandomShotError::new(rng, &params.shot);

    let summary = play_point(&scenario, &params, &mut error_model)?;

    for (i, record) in summary.shots.iter().enumerate() {
        let outcome = &record.outcome;
        println!(
            "#{} {:?}: {} (power {:.1} mph, angle {:.1} deg)",
            i + 1,
            record.shooter,
            outcome.verdict.message(),
            record.attempt.power,
            record.attempt.shot_angle
        );
        if let Some(impact) = outcome.impact {
            println!("    {}", ImpactLevel::from_impact(impact, &params.shot).description());
        }
    }
    match summary.winner {
        Some(winner) => println!("Point to {:?}", winner),
        None => println!("Point unfinished ({:?})", summary.ending),
    }

    // CSV出力
    fs::create_dir_all("output")?;
    let mut writer: Box<dyn Write> = setup_csv_output("output/simulation_results.csv")?;
    write_point_rows(&mut writer, &summary)?;
    writer.flush()?;
    info!(path = "output/simulation_results.csv", "trajectories written");

    Ok(())
}
