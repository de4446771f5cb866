//! Fixed timestep simulation tick
//!
//! Advances countdowns and applies player input deterministically. Every
//! board mutation happens here or in the `GameState` helpers this calls,
//! in response to a reveal, a reset, or an expiring countdown. One call
//! advances the sim by one `SIM_DT` step.

use super::state::{GameEvent, GamePhase, GameState, PendingRevert, TileStatus};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tile the player clicked this tick, if any
    pub reveal: Option<usize>,
    /// Restart the game (always honored, even mid-delay)
    pub reset: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.reset {
        state.reshuffle();
        return;
    }

    // Countdown: mismatched pair flips back
    if let Some(pending) = state.pending_revert {
        let ticks = pending.ticks.saturating_sub(1);
        if ticks == 0 {
            apply_revert(state, pending.pair);
            state.pending_revert = None;
        } else {
            state.pending_revert = Some(PendingRevert { ticks, ..pending });
        }
    }

    // Countdown: win banner after the final match
    if state.win_ticks > 0 {
        state.win_ticks -= 1;
        if state.win_ticks == 0 && state.phase == GamePhase::Playing {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::Won);
            log::info!("all pairs matched after {} ticks", state.time_ticks);
        }
    }

    if let Some(index) = input.reveal {
        reveal_tile(state, index);
    }
}

/// Reveal a tile and resolve the pair once two are face up.
///
/// Invalid actions are silent no-ops: clicking a matched or already
/// revealed tile, clicking anything while a mismatched pair is face up,
/// an out-of-range index, or any click after the win.
pub fn reveal_tile(state: &mut GameState, index: usize) {
    if state.phase == GamePhase::Won {
        log::debug!("reveal {index} ignored: game already won");
        return;
    }
    if state.selection.len() >= 2 {
        log::debug!("reveal {index} ignored: pair resolution pending");
        return;
    }
    let Some(tile) = state.tiles.get(index) else {
        log::debug!("reveal {index} ignored: out of range");
        return;
    };
    if tile.status != TileStatus::Hidden {
        log::debug!("reveal {index} ignored: tile not hidden");
        return;
    }

    state.tiles[index].status = TileStatus::Revealed;
    state.selection.push(index);
    debug_assert!(state.selection.len() <= 2, "selection can never exceed a pair");

    if state.selection.len() < 2 {
        return;
    }

    let (a, b) = (state.selection[0], state.selection[1]);
    if state.tiles[a].token == state.tiles[b].token {
        // Confirmed pair: lock both tiles, sail one step
        state.tiles[a].status = TileStatus::Matched;
        state.tiles[b].status = TileStatus::Matched;
        state.selection.clear();
        state.tracker.advance();
        state.events.push(GameEvent::PairMatched { a, b });
        log::debug!(
            "pair matched ({a}, {b}), ship at {:?}",
            state.tracker.position()
        );

        if state.matched_count() == state.tiles.len() {
            // Let the last flip animation land before the banner
            state.win_ticks = state.config.win_banner_ticks;
        }
    } else {
        state.pending_revert = Some(PendingRevert {
            pair: [a, b],
            ticks: state.config.mismatch_revert_ticks,
        });
        state.events.push(GameEvent::Mismatch { a, b });
        log::debug!("mismatch ({a}, {b})");
    }
}

/// Flip a mismatched pair back down, re-checking against live state so a
/// countdown that outlived its board cannot corrupt a fresh one.
fn apply_revert(state: &mut GameState, pair: [usize; 2]) {
    if state.selection != pair {
        log::debug!("stale revert for {pair:?} dropped");
        return;
    }
    for index in pair {
        if state.tiles[index].status == TileStatus::Revealed {
            state.tiles[index].status = TileStatus::Hidden;
        }
    }
    state.selection.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::consts::{MISMATCH_REVERT_TICKS, WIN_BANNER_TICKS};
    use crate::sim::state::TokenId;
    use glam::Vec2;

    fn new_game(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), seed).expect("default config is valid")
    }

    fn reveal(state: &mut GameState, index: usize) {
        tick(
            state,
            &TickInput {
                reveal: Some(index),
                ..Default::default()
            },
        );
    }

    fn run_ticks(state: &mut GameState, n: u32) {
        let input = TickInput::default();
        for _ in 0..n {
            tick(state, &input);
        }
    }

    /// Both indices of every kind, peeking at the shuffled deck
    fn pair_indices(state: &GameState) -> Vec<(usize, usize)> {
        (0..state.config.num_kinds)
            .map(|kind| {
                let mut found = state
                    .tiles
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.token == TokenId(kind))
                    .map(|(i, _)| i);
                let a = found.next().expect("deck holds two of each kind");
                let b = found.next().expect("deck holds two of each kind");
                (a, b)
            })
            .collect()
    }

    /// Two indices guaranteed to hold different tokens
    fn mismatched_pair(state: &GameState) -> (usize, usize) {
        let other = (1..state.tiles.len())
            .find(|&i| state.tiles[i].token != state.tiles[0].token)
            .expect("a deck with 2+ kinds has a mismatch");
        (0, other)
    }

    #[test]
    fn match_locks_both_tiles_and_sails_one_step() {
        let mut state = new_game(42);
        let (a, b) = pair_indices(&state)[0];

        reveal(&mut state, a);
        assert_eq!(state.selection, vec![a]);
        assert_eq!(state.tiles[a].status, TileStatus::Revealed);

        reveal(&mut state, b);
        assert_eq!(state.tiles[a].status, TileStatus::Matched);
        assert_eq!(state.tiles[b].status, TileStatus::Matched);
        assert!(state.selection.is_empty());
        assert_eq!(state.matched_count(), 2);
        assert_eq!(state.matches_made(), 1);
        assert!(state.drain_events().contains(&GameEvent::PairMatched { a, b }));
    }

    #[test]
    fn second_click_on_the_same_tile_is_ignored() {
        let mut state = new_game(42);
        reveal(&mut state, 0);
        reveal(&mut state, 0);
        assert_eq!(state.selection, vec![0]);
        assert_eq!(state.tiles[0].status, TileStatus::Revealed);
    }

    #[test]
    fn mismatch_flips_back_after_the_delay() {
        let mut state = new_game(42);
        let (a, b) = mismatched_pair(&state);
        reveal(&mut state, a);
        reveal(&mut state, b);
        assert_eq!(state.selection, vec![a, b]);
        assert_eq!(state.matches_made(), 0);
        assert!(state.drain_events().contains(&GameEvent::Mismatch { a, b }));

        // Face up for the whole delay window
        run_ticks(&mut state, MISMATCH_REVERT_TICKS - 1);
        assert_eq!(state.tiles[a].status, TileStatus::Revealed);
        assert_eq!(state.tiles[b].status, TileStatus::Revealed);

        run_ticks(&mut state, 1);
        assert_eq!(state.tiles[a].status, TileStatus::Hidden);
        assert_eq!(state.tiles[b].status, TileStatus::Hidden);
        assert!(state.selection.is_empty());
        assert_eq!(state.matched_count(), 0);
        assert_eq!(state.matches_made(), 0);
    }

    #[test]
    fn clicks_are_ignored_while_a_mismatch_is_pending() {
        let mut state = new_game(42);
        let (a, b) = mismatched_pair(&state);
        reveal(&mut state, a);
        reveal(&mut state, b);

        let third = (0..state.tiles.len())
            .find(|&i| i != a && i != b)
            .expect("board has more than two tiles");
        reveal(&mut state, third);
        assert_eq!(state.tiles[third].status, TileStatus::Hidden);
        assert_eq!(state.selection, vec![a, b]);
    }

    #[test]
    fn out_of_range_reveal_is_a_no_op() {
        let mut state = new_game(42);
        reveal(&mut state, 999);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn win_banner_raises_only_after_the_delay() {
        let mut state = new_game(42);
        for (n, (a, b)) in pair_indices(&state).into_iter().enumerate() {
            assert_eq!(state.matches_made(), n as u32);
            reveal(&mut state, a);
            reveal(&mut state, b);
        }
        assert_eq!(state.matches_made(), 6);
        assert_eq!(state.matched_count(), state.tiles.len());
        assert!((state.ship_position() - Vec2::new(85.0, 10.0)).length() < 1e-3);

        assert!(!state.is_won());
        run_ticks(&mut state, WIN_BANNER_TICKS - 1);
        assert!(!state.is_won());
        run_ticks(&mut state, 1);
        assert!(state.is_won());
        assert!(state.drain_events().contains(&GameEvent::Won));
    }

    #[test]
    fn input_after_the_win_is_ignored() {
        let mut state = new_game(42);
        for (a, b) in pair_indices(&state) {
            reveal(&mut state, a);
            reveal(&mut state, b);
        }
        run_ticks(&mut state, WIN_BANNER_TICKS);
        assert!(state.is_won());

        reveal(&mut state, 0);
        assert!(state.selection.is_empty());
        assert_eq!(state.tiles[0].status, TileStatus::Matched);
    }

    #[test]
    fn reset_mid_mismatch_delay_cannot_corrupt_the_fresh_board() {
        let mut state = new_game(42);
        let (a, b) = mismatched_pair(&state);
        reveal(&mut state, a);
        reveal(&mut state, b);
        run_ticks(&mut state, 10);

        tick(
            &mut state,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert!(state.pending_revert.is_none());
        assert!(state.selection.is_empty());
        assert_eq!(state.matches_made(), 0);
        assert!(!state.is_won());
        assert_eq!(state.ship_position(), Vec2::new(10.0, 90.0));

        // The old countdown died with the old board; the new one plays clean
        run_ticks(&mut state, MISMATCH_REVERT_TICKS);
        assert!(state.tiles.iter().all(|t| t.status == TileStatus::Hidden));

        let (a, b) = pair_indices(&state)[0];
        reveal(&mut state, a);
        reveal(&mut state, b);
        assert_eq!(state.matches_made(), 1);
    }

    #[test]
    fn stale_revert_is_validated_against_the_live_selection() {
        let mut state = new_game(42);
        reveal(&mut state, 0);

        // Hand-inject a countdown that no longer describes the selection
        state.pending_revert = Some(PendingRevert {
            pair: [0, 1],
            ticks: 1,
        });
        run_ticks(&mut state, 1);

        assert_eq!(state.tiles[0].status, TileStatus::Revealed);
        assert_eq!(state.selection, vec![0]);
    }

    #[test]
    fn same_seed_same_voyage() {
        let mut one = new_game(99999);
        let mut two = new_game(99999);

        let script: Vec<TickInput> = (0..24)
            .map(|i| TickInput {
                reveal: Some(i % 12),
                ..Default::default()
            })
            .collect();
        for input in &script {
            tick(&mut one, input);
            tick(&mut two, input);
        }

        assert_eq!(one.time_ticks, two.time_ticks);
        assert_eq!(one.matches_made(), two.matches_made());
        assert_eq!(one.selection, two.selection);
        let tokens_one: Vec<u8> = one.tiles.iter().map(|t| t.token.0).collect();
        let tokens_two: Vec<u8> = two.tiles.iter().map(|t| t.token.0).collect();
        assert_eq!(tokens_one, tokens_two);
    }
}
