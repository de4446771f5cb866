//! Board state and core game types
//!
//! All state that must survive a snapshot round-trip for determinism
//! lives here.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::{PathTracker, Route};
use crate::config::{ConfigError, GameConfig};

/// One of the N distinct token identities used to form matching pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u8);

/// Face state of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileStatus {
    /// Face down, clickable
    #[default]
    Hidden,
    /// Face up, awaiting pair resolution
    Revealed,
    /// Confirmed matched, stays face up
    Matched,
}

/// A tile on the board
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    pub token: TokenId,
    pub status: TileStatus,
}

/// Whole-board phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting reveals
    Playing,
    /// All pairs matched and the banner is up (terminal until reset)
    Won,
}

/// One-shot notifications drained by the presentation layer each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pair was confirmed; the ship advanced one step
    PairMatched { a: usize, b: usize },
    /// Two revealed tiles did not match; they flip back after the delay
    Mismatch { a: usize, b: usize },
    /// The final pair was matched and the banner delay elapsed
    Won,
    /// The board was reshuffled
    Reset,
}

/// A mismatched pair waiting to flip back
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingRevert {
    /// The pair in reveal order
    pub pair: [usize; 2],
    /// Ticks until the flip-back
    pub ticks: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the current deck; every reshuffle moves to a fresh stream
    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// RNG state; the stream advances on every reshuffle
    pub rng_state: RngState,
    /// Session configuration (validated at construction)
    pub config: GameConfig,
    /// Shuffled deck, two tiles per token kind
    pub tiles: Vec<Tile>,
    /// Indices of the 0-2 tiles face up and awaiting resolution
    pub selection: Vec<usize>,
    /// Ship progress along the route, one step per confirmed match
    pub tracker: PathTracker,
    /// Current phase
    pub phase: GamePhase,
    /// Mismatched pair counting down to its flip-back
    pub pending_revert: Option<PendingRevert>,
    /// Ticks until the win banner after the final match (0 = none pending)
    pub win_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// One-shot events since the last drain (not gameplay state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let route = Route::new(config.waypoints.clone())?;
        let rng_state = RngState::new(seed);
        let tiles = deal_deck(config.num_kinds, &mut rng_state.to_rng());
        let tracker = PathTracker::new(route, config.num_kinds as u32);

        log::info!(
            "new game: {} kinds, {} tiles, seed {seed}",
            config.num_kinds,
            tiles.len()
        );

        Ok(Self {
            seed,
            rng_state,
            config,
            tiles,
            selection: Vec::new(),
            tracker,
            phase: GamePhase::Playing,
            pending_revert: None,
            win_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// Reshuffle into a fresh board: new deck, empty selection, ship at
    /// the harbor. Pending countdowns are dropped with the old board.
    pub fn reshuffle(&mut self) {
        self.rng_state.stream = self.rng_state.stream.wrapping_add(1);
        self.tiles = deal_deck(self.config.num_kinds, &mut self.rng_state.to_rng());
        self.selection.clear();
        self.tracker.rewind();
        self.phase = GamePhase::Playing;
        self.pending_revert = None;
        self.win_ticks = 0;
        self.events.push(GameEvent::Reset);
        log::info!(
            "board reshuffled (seed {}, stream {})",
            self.seed,
            self.rng_state.stream
        );
    }

    /// Tiles confirmed matched so far (always even)
    pub fn matched_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.status == TileStatus::Matched)
            .count()
    }

    /// Confirmed matches this game
    #[inline]
    pub fn matches_made(&self) -> u32 {
        self.tracker.progress()
    }

    /// Whether the win banner is up
    #[inline]
    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Current ship position on the map
    #[inline]
    pub fn ship_position(&self) -> Vec2 {
        self.tracker.position()
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: self.tiles.clone(),
            selection: self.selection.clone(),
            is_won: self.is_won(),
            ship_position: self.ship_position(),
            matches_made: self.matches_made(),
        }
    }
}

/// Everything the presentation layer reads each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tiles: Vec<Tile>,
    pub selection: Vec<usize>,
    pub is_won: bool,
    pub ship_position: Vec2,
    pub matches_made: u32,
}

/// Shuffle two copies of each token kind into a fresh face-down deck
fn deal_deck(num_kinds: u8, rng: &mut Pcg32) -> Vec<Tile> {
    let mut tokens: Vec<TokenId> = (0..num_kinds).chain(0..num_kinds).map(TokenId).collect();
    tokens.shuffle(rng);
    tokens
        .into_iter()
        .map(|token| Tile {
            token,
            status: TileStatus::Hidden,
        })
        .collect()
}
