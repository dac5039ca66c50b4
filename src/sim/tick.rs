//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step at a time.
//! Order within a tick: player → firing → bullets → formation move →
//! formation fire → collisions → wave clear.

use rand::Rng;

use super::autopilot;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState, Player, Projectile};
use crate::consts::*;

/// Input commands for a single tick
///
/// `move_left`/`move_right`/`fire_held` are level-sensitive: set them for every
/// tick the key is down. `fire` and `restart` are one-shot: set them only on
/// the tick following the key press. A fire request stays pending while the
/// key is held and is cleared by the simulation once a shot is admitted; a
/// request refused at the bullet cap is dropped when the key is up.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held
    pub move_left: bool,
    /// Right held
    pub move_right: bool,
    /// Fire pressed
    pub fire: bool,
    /// Fire held
    pub fire_held: bool,
    /// Restart pressed (only honored after game over)
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart && state.phase == GamePhase::GameOver {
        state.reset();
        state.events.push(GameEvent::Restarted);
        log::info!("Restarted");
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    // Demo mode replaces movement and fire with the autopilot's plan
    let input = if input.idle_mode {
        TickInput {
            restart: input.restart,
            idle_mode: true,
            ..autopilot::plan(state)
        }
    } else {
        input.clone()
    };

    if input.fire {
        state.fire_requested = true;
    }
    state.time_ticks += 1;

    move_player(state, &input);
    fire_player_bullet(state);
    if !input.fire_held {
        // Released: a refused request is not queued
        state.fire_requested = false;
    }
    advance_bullets(state);

    if !advance_formation(state) {
        // Invasion ends the tick immediately
        return;
    }

    formation_fire(state);
    resolve_bullet_hits(state);
    resolve_player_hits(state);

    if state.phase == GamePhase::Active && state.aliens.is_empty() {
        clear_wave(state);
    }
}

fn move_player(state: &mut GameState, input: &TickInput) {
    // Both directions may apply in the same tick
    if input.move_left && state.player.pos.x > 0 {
        state.player.pos.x -= PLAYER_SPEED;
    }
    if input.move_right && state.player.pos.x < Player::max_x() {
        state.player.pos.x += PLAYER_SPEED;
    }
}

fn fire_player_bullet(state: &mut GameState) {
    if state.fire_requested && state.bullets.len() < MAX_PLAYER_BULLETS {
        state.bullets.push(Projectile::new(state.player.muzzle()));
        state.fire_requested = false;
        state.events.push(GameEvent::ShotFired);
        log::trace!("Shot fired at x={}", state.player.muzzle().x);
    }
}

fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y >= 0);

    for bullet in &mut state.enemy_bullets {
        bullet.pos.y += ENEMY_BULLET_SPEED;
    }
    state.enemy_bullets.retain(|b| b.pos.y <= FIELD_HEIGHT);
}

/// Horizontal formation step for a move performed when the counter reads
/// `counter`. Depends only on counter parity, not on which wall was touched.
pub fn formation_step(counter: u32) -> i32 {
    if (counter / FORMATION_MOVE_INTERVAL) % 2 == 0 {
        FORMATION_STEP
    } else {
        -FORMATION_STEP
    }
}

/// Move the formation on its cadence. Returns false if the aliens invaded.
fn advance_formation(state: &mut GameState) -> bool {
    state.move_counter += 1;
    if state.move_counter < FORMATION_MOVE_INTERVAL {
        return true;
    }

    let drop = state.aliens.iter().any(|a| a.at_edge());
    let step = formation_step(state.move_counter);
    let limit = FIELD_HEIGHT - INVASION_MARGIN;

    // Aliens after the first one past the limit are left where they were
    let mut invaded = false;
    for alien in &mut state.aliens {
        if drop {
            alien.pos.y += FORMATION_DROP;
        }
        alien.pos.x += step;
        if alien.pos.y > limit {
            invaded = true;
            break;
        }
    }

    if invaded {
        state.end_game(GameOverReason::Invaded);
        return false;
    }

    if drop {
        state.events.push(GameEvent::FormationDropped);
        log::debug!("Formation dropped a row");
    }
    state.move_counter = 0;
    true
}

fn formation_fire(state: &mut GameState) {
    state.shoot_counter += 1;
    if state.shoot_counter < FORMATION_FIRE_INTERVAL || state.aliens.is_empty() {
        return;
    }

    let shooter = state.rng.random_range(0..state.aliens.len());
    let pos = state.aliens[shooter].muzzle();
    state.enemy_bullets.push(Projectile::new(pos));
    state.events.push(GameEvent::EnemyFired { pos });
    log::trace!("Alien {} fired from {:?}", shooter, pos);
    state.shoot_counter = 0;
}

/// Player bullets against aliens. Scans from the back so removals never skip
/// an element; each bullet kills at most one alien.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = state.bullets[i].rect();
        let hit = (0..state.aliens.len())
            .rev()
            .find(|&j| bullet.overlaps(&state.aliens[j].rect()));

        if let Some(j) = hit {
            state.bullets.remove(i);
            let alien = state.aliens.remove(j);
            state.score += ALIEN_SCORE;
            state.events.push(GameEvent::AlienDestroyed { pos: alien.pos });
            log::trace!("Alien destroyed at {:?}, score {}", alien.pos, state.score);
        }
    }
}

/// Enemy bullets against the player. At most one life is lost per tick.
fn resolve_player_hits(state: &mut GameState) {
    let player = state.player.rect();
    let hit = (0..state.enemy_bullets.len())
        .rev()
        .find(|&i| state.enemy_bullets[i].rect().overlaps(&player));

    let Some(i) = hit else {
        return;
    };

    state.enemy_bullets.remove(i);
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        state.end_game(GameOverReason::OutOfLives);
    }
}

fn clear_wave(state: &mut GameState) {
    state.score += WAVE_CLEAR_BONUS;
    state.wave_index += 1;
    state.reset_for_next_wave();
    state.events.push(GameEvent::WaveCleared {
        wave: state.wave_index,
    });
    log::info!("Wave {} cleared, score {}", state.wave_index, state.score);
}
