//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame, increments in canvas pixels per frame
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod formation;
pub mod state;
pub mod step;

pub use collision::{HitboxMode, Rect};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Projectile, enemy_grid};
pub use step::{StepInput, resolve_collisions, step};
