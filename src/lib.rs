//! Pair Voyage - a memory pairs game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board state machine, ship path tracker)
//! - `config`: Session configuration, validated once at setup
//!
//! Presentation (layout, card art, win popups, resize handling) lives outside
//! this crate: it feeds `TickInput`s into the sim at a fixed timestep and
//! renders the `Snapshot` it reads back each frame.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Game timing constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth flip/sail animation)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Ticks a mismatched pair stays face up before flipping back (0.8 s)
    pub const MISMATCH_REVERT_TICKS: u32 = 96;
    /// Ticks between the final match and the win banner (0.4 s)
    pub const WIN_BANNER_TICKS: u32 = 48;
}
