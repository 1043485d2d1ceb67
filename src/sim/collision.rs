//! Axis-aligned collision detection
//!
//! Everything on screen is a rectangle, so the whole collision story is an
//! interval-overlap test on both axes, optionally run against centered
//! sub-rectangles so hits feel fairer than the full sprite bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HITBOX_SCALE;

/// An axis-aligned rectangle in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict interval-overlap test on both axes
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The centered sub-rectangle keeping `factor` of each dimension
    pub fn scaled(&self, factor: f32) -> Rect {
        let inset = self.size * (1.0 - factor) / 2.0;
        Rect {
            pos: self.pos + inset,
            size: self.size * factor,
        }
    }
}

/// Which rectangles the collision pass actually tests
///
/// `Full` uses the raw sprite bounds; `Scaled` shrinks both rectangles to a
/// centered fraction of their size first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitboxMode {
    Full,
    Scaled { factor: f32 },
}

impl Default for HitboxMode {
    fn default() -> Self {
        HitboxMode::Scaled {
            factor: HITBOX_SCALE,
        }
    }
}

impl HitboxMode {
    /// Test two rectangles under this mode
    pub fn hits(&self, a: &Rect, b: &Rect) -> bool {
        match *self {
            HitboxMode::Full => a.overlaps(b),
            HitboxMode::Scaled { factor } => a.scaled(factor).overlaps(&b.scaled(factor)),
        }
    }
}
