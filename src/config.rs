//! Session configuration
//!
//! Everything the presentation layer decides once at setup: how many token
//! kinds the deck pairs up, the route the ship sails, and the reveal timings.
//! Validated up front; past construction the sim is total over its state.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MISMATCH_REVERT_TICKS, WIN_BANNER_TICKS};

/// Configuration problems, surfaced at setup time and never during play
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A spline needs a segment to interpolate over
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
    /// An empty kind set would make progress/N undefined
    #[error("a deck needs at least 1 token kind")]
    NoTokenKinds,
    /// Zero-tick countdowns would never fire
    #[error("{0} delay must be at least 1 tick")]
    ZeroDelay(&'static str),
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct token kinds; the deck holds two tiles of each
    pub num_kinds: u8,
    /// Route waypoints in the normalized 0-100 map plane
    pub waypoints: Vec<Vec2>,
    /// Ticks a mismatched pair stays face up
    pub mismatch_revert_ticks: u32,
    /// Ticks between the final match and the win banner
    pub win_banner_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_kinds: 6,
            waypoints: vec![
                Vec2::new(10.0, 90.0),
                Vec2::new(35.0, 30.0),
                Vec2::new(60.0, 50.0),
                Vec2::new(85.0, 10.0),
            ],
            mismatch_revert_ticks: MISMATCH_REVERT_TICKS,
            win_banner_ticks: WIN_BANNER_TICKS,
        }
    }
}

impl GameConfig {
    /// Number of tiles on the board
    #[inline]
    pub fn deck_len(&self) -> usize {
        self.num_kinds as usize * 2
    }

    /// Check the invariants the sim relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_kinds == 0 {
            return Err(ConfigError::NoTokenKinds);
        }
        if self.waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints(self.waypoints.len()));
        }
        if self.mismatch_revert_ticks == 0 {
            return Err(ConfigError::ZeroDelay("mismatch revert"));
        }
        if self.win_banner_ticks == 0 {
            return Err(ConfigError::ZeroDelay("win banner"));
        }
        Ok(())
    }
}
