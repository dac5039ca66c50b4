//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, removal-safe scans)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use snapshot::Snapshot;
pub use state::{
    Alien, GameEvent, GameOverReason, GamePhase, GameState, Player, Projectile, spawn_formation,
};
pub use tick::{TickInput, formation_step, tick};
