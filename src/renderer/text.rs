//! Character-grid rasterizer for snapshots

use std::fmt;

use glam::IVec2;

use crate::consts::*;
use crate::sim::Snapshot;

/// Grid width in cells
pub const COLS: usize = 60;
/// Grid height in cells
pub const ROWS: usize = 30;

const CELL_WIDTH: i32 = FIELD_WIDTH / COLS as i32;
const CELL_HEIGHT: i32 = FIELD_HEIGHT / ROWS as i32;

const ALIEN: char = 'W';
const PLAYER: char = 'A';
const BULLET: char = '|';
const ENEMY_BULLET: char = '!';
const EMPTY: char = ' ';

/// One rendered frame: HUD line followed by the field grid
#[derive(Debug, Clone)]
pub struct TextFrame {
    hud: String,
    cells: Vec<[char; COLS]>,
}

impl TextFrame {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut frame = Self {
            hud: format!(
                "SCORE {}  LIVES {}  WAVE {}",
                snapshot.score,
                snapshot.lives,
                snapshot.wave + 1
            ),
            cells: vec![[EMPTY; COLS]; ROWS],
        };

        // Later layers overwrite earlier ones
        for &alien in &snapshot.aliens {
            frame.fill(alien, IVec2::splat(ALIEN_SIZE), ALIEN);
        }
        frame.fill(snapshot.player, IVec2::splat(PLAYER_SIZE), PLAYER);
        for &bullet in &snapshot.bullets {
            frame.fill(bullet, IVec2::splat(BULLET_SIZE), BULLET);
        }
        for &bullet in &snapshot.enemy_bullets {
            frame.fill(bullet, IVec2::splat(BULLET_SIZE), ENEMY_BULLET);
        }

        if !snapshot.running {
            let mid = ROWS / 2;
            frame.banner(mid - 1, "GAME OVER");
            frame.banner(mid, &format!("Final Score: {}", snapshot.score));
            frame.banner(mid + 1, "Press R to Restart");
        }

        frame
    }

    /// Character at a cell, if in range
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn hud(&self) -> &str {
        &self.hud
    }

    /// Paint every cell a rectangle touches, clipped to the grid
    fn fill(&mut self, pos: IVec2, size: IVec2, glyph: char) {
        let first_col = pos.x.div_euclid(CELL_WIDTH).max(0);
        let last_col = (pos.x + size.x - 1).div_euclid(CELL_WIDTH).min(COLS as i32 - 1);
        let first_row = pos.y.div_euclid(CELL_HEIGHT).max(0);
        let last_row = (pos.y + size.y - 1).div_euclid(CELL_HEIGHT).min(ROWS as i32 - 1);

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                self.cells[row as usize][col as usize] = glyph;
            }
        }
    }

    /// Centre a line of text on a row
    fn banner(&mut self, row: usize, text: &str) {
        let Some(cells) = self.cells.get_mut(row) else {
            return;
        };
        let len = text.chars().count().min(COLS);
        let start = (COLS - len) / 2;
        for (i, ch) in text.chars().take(len).enumerate() {
            cells[start + i] = ch;
        }
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.hud)?;
        writeln!(f, "+{}+", "-".repeat(COLS))?;
        for row in &self.cells {
            let line: String = row.iter().collect();
            writeln!(f, "|{}|", line)?;
        }
        write!(f, "+{}+", "-".repeat(COLS))
    }
}
