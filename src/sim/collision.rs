//! Axis-aligned box collision
//!
//! Every entity in Skybound is a box. Landings, pickups and enemy contact all
//! reduce to one overlap test with strict inequalities, so boxes that only
//! touch along an edge do not collide.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner plus size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    pub const fn from_pos_size(pos: DVec2, size: DVec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size * 0.5
    }

    /// Same box moved vertically (world to screen space is `shifted_y(-cam_y)`)
    pub fn shifted_y(self, dy: f64) -> Self {
        Self {
            pos: DVec2::new(self.pos.x, self.pos.y + dy),
            size: self.size,
        }
    }

    /// Overlap test against another rectangle
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// Strict overlap test: touching edges do not count
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Check whether a falling box came down onto a platform this tick.
///
/// `current` is the box after moving; `prev_bottom` is its bottom edge before
/// the move. Boxes that were already below the platform top (beyond the
/// tolerance) pass through instead of landing.
pub fn lands_on(current: &Rect, prev_bottom: f64, platform: &Rect, tolerance: f64) -> bool {
    current.intersects(platform) && prev_bottom <= platform.top() + tolerance
}
