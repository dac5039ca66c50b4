//! Axis-aligned rectangle collision
//!
//! Every entity on the field is a square anchored at its top-left corner.
//! Overlap is strict on both axes: rectangles that only share an edge do not
//! collide.

use glam::IVec2;

/// Integer rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    /// Square rectangle with the given side length
    pub fn square(pos: IVec2, side: i32) -> Self {
        Self::new(pos, IVec2::splat(side))
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
