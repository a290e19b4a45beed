//! Console Spin Example
//!
//! Runs one complete draw against scripted collaborators and prints the
//! highlight trail a real frontend would animate.
//!
//! To run:
//! `cargo run --example console_spin --features mocks`

use tombola_engine::mocks::{RecordingFrontend, ScriptedBackend};
use tombola_engine::{DialogOutcome, Game};
use tombola_types::{Prize, ReceiverPrefill, SpinConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // 1. An eight-prize catalog fills the minimum 3x3 ring exactly.
    let prizes: Vec<Prize> = (1..=8)
        .map(|i| Prize::award(i, &format!("prize {i}")))
        .collect();
    let winner = prizes[5].clone();

    let config = SpinConfig {
        step_ms: 40,
        settle_ms: 200,
        ..Default::default()
    };

    // 2. Scripted collaborators stand in for the draw service and the UI.
    let backend = ScriptedBackend::returning(winner);
    let frontend = RecordingFrontend::new();
    frontend.answer_results([DialogOutcome::Confirmed]);

    let game = Game::new(
        prizes,
        config,
        ReceiverPrefill::default(),
        backend,
        frontend.clone(),
    )?;
    println!(
        "Ring: {} tiles at {}% per tile",
        game.layout().len(),
        game.layout().tile_pct()
    );

    // 3. Run the draw and report what the frontend saw.
    let prize = game.draw().await?;
    println!("Drawn: {} (id {})", prize.prize_name, prize.prize_id);

    let trail = frontend.lit_tiles();
    println!("Highlight trail ({} ticks):", trail.len());
    for lap in trail.chunks(game.layout().len()) {
        println!("  {:?}", lap);
    }

    let landing = *trail.last().expect("spin emits at least one frame");
    let (row, col) = game
        .layout()
        .cell_of(landing)
        .expect("landing tile is on the ring");
    println!(
        "Landed on tile {landing} (row {row}, col {col}); next draw replays 0..={}",
        game.history_index()
    );
    Ok(())
}
