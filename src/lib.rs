//! Stage Invaders - a Space-Invaders style canvas shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, formation marching, collisions, game state)
//! - `render`: Canvas 2D presentation with per-sprite fallbacks
//! - `assets`: Sprite loading that absorbs per-image failures
//! - `hud`: DOM score/overlay bindings
//! - `settings`: Tunable gameplay variants, persisted as preferences

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod hud;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::{HitboxMode, ResetPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (simulation units == CSS pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults - parked just above the bottom edge
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Gap between the player and the bottom of the canvas
    pub const PLAYER_BOTTOM_GAP: f32 = 20.0;
    /// Horizontal speed in pixels per frame
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Projectile defaults - travels straight up
    pub const PROJECTILE_WIDTH: f32 = 15.0;
    pub const PROJECTILE_HEIGHT: f32 = 45.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy grid layout
    pub const ENEMY_WIDTH: f32 = 80.0;
    pub const ENEMY_HEIGHT: f32 = 80.0;
    pub const ENEMY_ROWS: usize = 3;
    pub const ENEMIES_PER_ROW: usize = 6;
    /// Slot-to-slot spacing of the grid, both axes
    pub const ENEMY_SPACING: f32 = 120.0;
    pub const ENEMY_START_Y: f32 = 20.0;

    /// Formation marching: lateral pixels per frame, descent per wall contact
    pub const ENEMY_STEP_X: f32 = 2.0;
    pub const ENEMY_DESCENT: f32 = 20.0;

    /// Score awarded per destroyed enemy
    pub const SCORE_PER_ENEMY: u32 = 10;

    /// Default centered hitbox shrink factor (fraction of width/height kept)
    pub const HITBOX_SCALE: f32 = 0.6;

    /// Default extra descent allowed past the player's top edge before game over
    pub const GAME_OVER_MARGIN: f32 = 20.0;
}
