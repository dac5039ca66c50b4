//! Game state and core simulation types
//!
//! Entities are plain position records owned by per-kind vectors on
//! `GameState`. Removing an entity from its vector destroys it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (includes the self-transition on wave clear)
    Active,
    /// Run ended, waiting for a restart request
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Last life lost to enemy fire
    OutOfLives,
    /// An alien crossed the bottom threshold
    Invaded,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    AlienDestroyed { pos: IVec2 },
    EnemyFired { pos: IVec2 },
    FormationDropped,
    PlayerHit { lives_left: u8 },
    WaveCleared { wave: u32 },
    GameOver { reason: GameOverReason },
    Restarted,
}

/// The player's ship. Only x changes during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: IVec2::new(
                FIELD_WIDTH / 2 - PLAYER_SIZE / 2,
                FIELD_HEIGHT - PLAYER_BOTTOM_OFFSET,
            ),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }

    /// Spawn point for a new bullet: horizontally centred on the ship's top edge
    pub fn muzzle(&self) -> IVec2 {
        IVec2::new(self.pos.x + PLAYER_SIZE / 2 - BULLET_SIZE / 2, self.pos.y)
    }

    /// Largest x the ship may occupy
    pub const fn max_x() -> i32 {
        FIELD_WIDTH - PLAYER_SIZE
    }
}

/// A bullet, fired by either side. Direction is implied by the owning vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: IVec2,
}

impl Projectile {
    pub fn new(pos: IVec2) -> Self {
        Self { pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, BULLET_SIZE)
    }
}

/// One member of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alien {
    pub pos: IVec2,
}

impl Alien {
    pub fn new(pos: IVec2) -> Self {
        Self { pos }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, ALIEN_SIZE)
    }

    /// True when touching or past either side wall
    pub fn at_edge(&self) -> bool {
        self.pos.x <= 0 || self.pos.x >= FIELD_WIDTH - ALIEN_SIZE
    }

    /// Spawn point for an enemy bullet: centred under the alien
    pub fn muzzle(&self) -> IVec2 {
        IVec2::new(self.pos.x + ALIEN_SIZE / 2, self.pos.y + ALIEN_SIZE)
    }
}

/// Build the starting formation, row-major from the top-left
pub fn spawn_formation() -> Vec<Alien> {
    let mut aliens = Vec::with_capacity((ALIEN_ROWS * ALIEN_COLS) as usize);
    for row in 0..ALIEN_ROWS {
        for col in 0..ALIEN_COLS {
            aliens.push(Alien::new(IVec2::new(
                FORMATION_ORIGIN_X + col * ALIEN_SPACING,
                FORMATION_ORIGIN_Y + row * ALIEN_SPACING,
            )));
        }
    }
    aliens
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Formation-fire RNG (not reseeded on restart)
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score (monotonic within a run)
    pub score: u64,
    /// Player lives
    pub lives: u8,
    /// Waves cleared in this run
    pub wave_index: u32,
    /// Ticks simulated since the last restart
    pub time_ticks: u64,
    /// Player ship
    pub player: Player,
    /// Player bullets, in spawn order
    pub bullets: Vec<Projectile>,
    /// Enemy bullets, in spawn order
    pub enemy_bullets: Vec<Projectile>,
    /// Remaining aliens of the current wave
    pub aliens: Vec<Alien>,
    /// Ticks since the formation last moved
    pub move_counter: u32,
    /// Ticks since the formation last fired
    pub shoot_counter: u32,
    /// Latched fire request, cleared by the simulation once a shot is fired
    pub fire_requested: bool,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Active,
            score: 0,
            lives: STARTING_LIVES,
            wave_index: 0,
            time_ticks: 0,
            player: Player::default(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            aliens: spawn_formation(),
            move_counter: 0,
            shoot_counter: 0,
            fire_requested: false,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Full restart: new run with fresh score, lives and formation
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave_index = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Active;
        self.reset_for_next_wave();
    }

    /// Reinitialize everything except score, lives and wave count
    pub fn reset_for_next_wave(&mut self) {
        self.player = Player::default();
        self.aliens = spawn_formation();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.move_counter = 0;
        self.shoot_counter = 0;
        self.fire_requested = false;
    }

    /// Terminal transition until the next restart
    pub fn end_game(&mut self, reason: GameOverReason) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}) after {} ticks, final score {}",
            reason,
            self.time_ticks,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.player.pos, IVec2::new(285, 550));
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.aliens.len(), 24);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_formation_grid() {
        let aliens = spawn_formation();
        assert_eq!(aliens.first().map(|a| a.pos), Some(IVec2::new(50, 50)));
        assert_eq!(aliens[7].pos, IVec2::new(400, 50));
        assert_eq!(aliens[8].pos, IVec2::new(50, 100));
        assert_eq!(aliens.last().map(|a| a.pos), Some(IVec2::new(400, 150)));
    }

    #[test]
    fn test_muzzles() {
        let player = Player::default();
        assert_eq!(player.muzzle(), IVec2::new(298, 550));

        let alien = Alien::new(IVec2::new(100, 50));
        assert_eq!(alien.muzzle(), IVec2::new(112, 75));
    }

    #[test]
    fn test_alien_edge_detection() {
        assert!(Alien::new(IVec2::new(0, 50)).at_edge());
        assert!(Alien::new(IVec2::new(-4, 50)).at_edge());
        assert!(Alien::new(IVec2::new(575, 50)).at_edge());
        assert!(!Alien::new(IVec2::new(1, 50)).at_edge());
        assert!(!Alien::new(IVec2::new(574, 50)).at_edge());
    }

    #[test]
    fn test_next_wave_keeps_score_and_lives() {
        let mut state = GameState::new(7);
        state.score = 3400;
        state.lives = 2;
        state.aliens.clear();
        state.bullets.push(Projectile::new(IVec2::new(10, 10)));
        state.enemy_bullets.push(Projectile::new(IVec2::new(20, 20)));
        state.move_counter = 12;
        state.shoot_counter = 40;

        state.reset_for_next_wave();

        assert_eq!(state.score, 3400);
        assert_eq!(state.lives, 2);
        assert_eq!(state.aliens.len(), 24);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.move_counter, 0);
        assert_eq!(state.shoot_counter, 0);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = GameState::new(7);
        state.score = 900;
        state.lives = 0;
        state.end_game(GameOverReason::OutOfLives);
        assert!(!state.is_running());

        state.reset();
        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.aliens.len(), 24);
    }
}
