// src/simulation/csv.rs

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::math::Position;
use crate::models::court::Participant;
use crate::models::trajectory::TrajectoryPoint3D;
use crate::simulation::framework::{PointSummary, ShotRecord};

/// CSV出力の設定とヘッダーの書き込み
pub fn setup_csv_output(path: &str) -> Result<Box<dyn Write>, Box<dyn Error>> {
    let output_file = File::create(path)?;
    let mut writer = BufWriter::new(output_file);
    write_csv_header(&mut writer)?;
    Ok(Box::new(writer))
}

/// CSVヘッダーの書き込み
pub fn write_csv_header<W: Write>(writer: &mut W) -> Result<(), std::io::Error> {
    let header = "shot,shooter,time(s),ball_x(m),ball_y(m),ball_z(m),\
player_x(m),player_y(m),opponent_x(m),opponent_y(m)\n";
    writer.write_all(header.as_bytes())?;
    Ok(())
}

fn participant_label(who: Participant) -> &'static str {
    match who {
        Participant::Player => "player",
        Participant::Opponent => "opponent",
    }
}

/// 移動軌道の`index`番目の位置。軌道が短ければ最後の位置に留まる。
fn position_at(run: Option<&[TrajectoryPoint3D]>, index: usize, standing: Position) -> Position {
    run.and_then(|trajectory| trajectory.get(index).or(trajectory.last()))
        .map(|p| p.position())
        .unwrap_or(standing)
}

/// CSV行の作成
pub fn create_csv_row(
    shot: usize,
    shooter: Participant,
    ball: &TrajectoryPoint3D,
    player: &Position,
    opponent: &Position,
) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{}\n",
        shot,
        participant_label(shooter),
        ball.t,
        ball.x,
        ball.y,
        ball.z,
        player.x,
        player.y,
        opponent.x,
        opponent.y
    )
}

/// 1ショット分の行。ボールのサンプルごとに1行、打球者はその場に留まり、レシーバーは移動軌道に沿う。
pub fn create_shot_rows(shot: usize, record: &ShotRecord) -> String {
    let run = record
        .outcome
        .receiver_run
        .as_ref()
        .map(|r| r.trajectory.as_slice());
    let receiver = record.shooter.other();

    let mut rows = String::new();
    for (i, ball) in record.outcome.result.trajectory_3d.iter().enumerate() {
        let (player, opponent) = match receiver {
            Participant::Player => (position_at(run, i, record.player_position), record.opponent_position),
            Participant::Opponent => (record.player_position, position_at(run, i, record.opponent_position)),
        };
        rows.push_str(&create_csv_row(shot, record.shooter, ball, &player, &opponent));
    }
    rows
}

/// ポイント全体の行を書き込む
pub fn write_point_rows<W: Write + ?Sized>(writer: &mut W, summary: &PointSummary) -> Result<(), std::io::Error> {
    for (shot, record) in summary.shots.iter().enumerate() {
        writer.write_all(create_shot_rows(shot + 1, record).as_bytes())?;
    }
    Ok(())
}
