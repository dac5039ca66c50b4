//! Demo mode controller
//!
//! Produces a `TickInput` from the current state so the game can play
//! itself (attract screen, headless soak runs). Pure function of state.

use super::state::{GameState, Player};
use super::tick::TickInput;
use crate::consts::*;

/// How far above the ship an enemy bullet counts as incoming
const DANGER_HEIGHT: i32 = 120;
/// Extra horizontal clearance kept around the ship when dodging
const DANGER_MARGIN: i32 = 10;
/// Dead zone when lining up under a target, avoids jitter
const AIM_TOLERANCE: i32 = PLAYER_SPEED;

/// Decide movement and fire for this tick
pub fn plan(state: &GameState) -> TickInput {
    let ship = state.player.rect();
    let ship_center = ship.left() + PLAYER_SIZE / 2;

    // Dodge the closest incoming bullet first
    let threat = state
        .enemy_bullets
        .iter()
        .filter(|b| {
            let r = b.rect();
            r.bottom() <= ship.bottom()
                && ship.top() - r.bottom() < DANGER_HEIGHT
                && r.right() + DANGER_MARGIN > ship.left()
                && r.left() - DANGER_MARGIN < ship.right()
        })
        .max_by_key(|b| b.pos.y);

    if let Some(bullet) = threat {
        let bullet_center = bullet.pos.x + BULLET_SIZE / 2;
        // Run away from the bullet, unless the wall is in the way
        let go_left = if bullet_center >= ship_center {
            state.player.pos.x > 0
        } else {
            state.player.pos.x >= Player::max_x()
        };
        return TickInput {
            move_left: go_left,
            move_right: !go_left,
            ..Default::default()
        };
    }

    // Line up under the alien nearest the ship, lowest first on ties
    let target = state.aliens.iter().min_by_key(|a| {
        let center = a.pos.x + ALIEN_SIZE / 2;
        ((center - ship_center).abs(), -a.pos.y)
    });

    let Some(target) = target else {
        return TickInput::default();
    };

    let muzzle = state.player.muzzle();
    let target_rect = target.rect();
    let aligned =
        muzzle.x + BULLET_SIZE > target_rect.left() && muzzle.x < target_rect.right();
    let target_center = target.pos.x + ALIEN_SIZE / 2;
    let offset = target_center - ship_center;

    TickInput {
        move_left: offset < -AIM_TOLERANCE,
        move_right: offset > AIM_TOLERANCE,
        fire: aligned && !state.fire_requested,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Alien, GamePhase, Projectile};
    use crate::sim::tick::tick;
    use glam::IVec2;

    #[test]
    fn test_dodges_incoming_bullet() {
        let mut state = GameState::new(1);
        // Slightly right of the ship's centre, 60 units above it
        state.enemy_bullets.push(Projectile::new(IVec2::new(302, 490)));

        let input = plan(&state);
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(!input.fire);
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let mut state = GameState::new(1);
        state.player.pos.x = 0;
        state.enemy_bullets.push(Projectile::new(IVec2::new(20, 500)));

        let input = plan(&state);
        assert!(input.move_right);
        assert!(!input.move_left);
    }

    #[test]
    fn test_ignores_bullets_already_past() {
        let mut state = GameState::new(1);
        state.aliens = vec![Alien::new(IVec2::new(288, 100))];
        state.enemy_bullets.push(Projectile::new(IVec2::new(300, 590)));

        let input = plan(&state);
        assert!(!input.move_left && !input.move_right);
        assert!(input.fire);
    }

    #[test]
    fn test_steers_toward_nearest_alien() {
        let mut state = GameState::new(1);
        state.aliens = vec![
            Alien::new(IVec2::new(450, 100)),
            Alien::new(IVec2::new(100, 100)),
        ];

        let input = plan(&state);
        assert!(input.move_right);
        assert!(!input.fire);
    }

    #[test]
    fn test_empty_formation_plans_nothing() {
        let mut state = GameState::new(1);
        state.aliens.clear();
        let input = plan(&state);
        assert!(!input.move_left && !input.move_right && !input.fire);
    }

    #[test]
    fn test_demo_mode_scores() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
