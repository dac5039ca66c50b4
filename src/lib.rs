//! Space Invaders - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: Text rendering of simulation snapshots
//! - `platform`: Fixed timestep clock for the host loop
//! - `settings`: Run configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{RenderMode, Settings};

/// Game configuration constants
///
/// These are part of the gameplay contract (collision thresholds, edge checks),
/// so they are fixed rather than configurable.
pub mod consts {
    /// Nominal tick period in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: i32 = 600;
    pub const FIELD_HEIGHT: i32 = 600;

    /// Player ship
    pub const PLAYER_SIZE: i32 = 30;
    /// Distance from the bottom of the field to the ship's top edge
    pub const PLAYER_BOTTOM_OFFSET: i32 = 50;
    pub const PLAYER_SPEED: i32 = 5;
    pub const STARTING_LIVES: u8 = 3;

    /// Projectiles
    pub const BULLET_SIZE: i32 = 5;
    pub const BULLET_SPEED: i32 = 8;
    pub const ENEMY_BULLET_SPEED: i32 = 5;
    /// Admission limit for live player bullets
    pub const MAX_PLAYER_BULLETS: usize = 3;

    /// Alien formation layout
    pub const ALIEN_SIZE: i32 = 25;
    pub const ALIEN_ROWS: i32 = 3;
    pub const ALIEN_COLS: i32 = 8;
    pub const ALIEN_SPACING: i32 = 50;
    pub const FORMATION_ORIGIN_X: i32 = 50;
    pub const FORMATION_ORIGIN_Y: i32 = 50;

    /// Formation movement cadence (ticks between moves)
    pub const FORMATION_MOVE_INTERVAL: u32 = 30;
    /// Formation fire cadence (ticks between shots)
    pub const FORMATION_FIRE_INTERVAL: u32 = 60;
    pub const FORMATION_STEP: i32 = 2;
    pub const FORMATION_DROP: i32 = 20;
    /// Aliens below `FIELD_HEIGHT - INVASION_MARGIN` end the game
    pub const INVASION_MARGIN: i32 = 100;

    /// Scoring
    pub const ALIEN_SCORE: u64 = 100;
    pub const WAVE_CLEAR_BONUS: u64 = 1000;
}
