//! Deterministic simulation module
//!
//! All gameplay logic lives here and must stay pure and deterministic:
//! fixed timestep only, seeded RNG only, no rendering or platform
//! dependencies. The presentation layer drives it through `TickInput`
//! and reads back `Snapshot`s.

pub mod path;
pub mod state;
pub mod tick;

pub use path::{PathTracker, Route, catmull_rom};
pub use state::{
    GameEvent, GamePhase, GameState, PendingRevert, Snapshot, Tile, TileStatus, TokenId,
};
pub use tick::{TickInput, reveal_tile, tick};
