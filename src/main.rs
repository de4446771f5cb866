//! Pair Voyage entry point
//!
//! Runs a scripted demo in the terminal: an omniscient player pairs up
//! the deck match by match while the log traces the ship's voyage, then
//! prints the final snapshot as JSON.

use pair_voyage::GameConfig;
use pair_voyage::consts::SIM_DT;
use pair_voyage::sim::{GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Pair Voyage (demo) starting...");

    let seed = 0xC0FFEE;
    let mut state =
        GameState::new(GameConfig::default(), seed).expect("default config is valid");

    let pairs: Vec<(usize, usize)> = (0..state.config.num_kinds)
        .map(|kind| {
            let mut found = state
                .tiles
                .iter()
                .enumerate()
                .filter(|(_, t)| t.token.0 == kind)
                .map(|(i, _)| i);
            let a = found.next().expect("deck holds two of each kind");
            let b = found.next().expect("deck holds two of each kind");
            (a, b)
        })
        .collect();

    for (a, b) in pairs {
        tick(
            &mut state,
            &TickInput {
                reveal: Some(a),
                ..Default::default()
            },
        );
        tick(
            &mut state,
            &TickInput {
                reveal: Some(b),
                ..Default::default()
            },
        );
        let pos = state.ship_position();
        log::info!(
            "match {}: ship at ({:.1}, {:.1})",
            state.matches_made(),
            pos.x,
            pos.y
        );
        for event in state.drain_events() {
            log::debug!("event: {event:?}");
        }
    }

    while !state.is_won() {
        tick(&mut state, &TickInput::default());
    }
    log::info!(
        "voyage complete in {:.2}s of sim time",
        state.time_ticks as f32 * SIM_DT
    );

    let snapshot = state.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
    );
}
