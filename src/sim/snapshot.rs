//! Read-only drawable view of the game state
//!
//! Taken between ticks and handed to renderers, so they never observe a
//! partially updated state.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Player top-left corner
    pub player: IVec2,
    /// Player bullets, in spawn order
    pub bullets: Vec<IVec2>,
    /// Enemy bullets, in spawn order
    pub enemy_bullets: Vec<IVec2>,
    /// Remaining aliens
    pub aliens: Vec<IVec2>,
    pub score: u64,
    pub lives: u8,
    pub running: bool,
    /// Waves cleared in this run
    pub wave: u32,
    /// Ticks since the last restart
    pub tick: u64,
}

impl GameState {
    /// Copy out the drawable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.pos,
            bullets: self.bullets.iter().map(|b| b.pos).collect(),
            enemy_bullets: self.enemy_bullets.iter().map(|b| b.pos).collect(),
            aliens: self.aliens.iter().map(|a| a.pos).collect(),
            score: self.score,
            lives: self.lives,
            running: self.is_running(),
            wave: self.wave_index,
            tick: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_of_new_game() {
        let snapshot = GameState::new(1).snapshot();
        assert_eq!(snapshot.player, IVec2::new(285, 550));
        assert_eq!(snapshot.aliens.len(), 24);
        assert_eq!(snapshot.aliens[0], IVec2::new(50, 50));
        assert!(snapshot.bullets.is_empty());
        assert!(snapshot.enemy_bullets.is_empty());
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.lives, 3);
        assert!(snapshot.running);
    }

    #[test]
    fn test_snapshot_is_detached_from_state() {
        let mut state = GameState::new(1);
        let before = state.snapshot();

        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );

        assert!(before.bullets.is_empty());
        let after = state.snapshot();
        assert_eq!(after.bullets, vec![IVec2::new(298, 542)]);
        assert_eq!(after.tick, 1);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(GameState::new(1).snapshot()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["lives"], 3);
        assert_eq!(json["running"], true);
        assert_eq!(json["player"], serde_json::json!([285, 550]));
    }
}
