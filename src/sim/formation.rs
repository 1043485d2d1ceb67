//! Enemy formation marching
//!
//! The classic side-to-side, step-down pattern: the grid drifts laterally
//! until any member touches a wall, then the whole formation flips direction
//! and descends one notch in the same frame.

use crate::consts::{ENEMY_DESCENT, ENEMY_STEP_X};

use super::state::Enemy;

/// Advance the formation by one frame
///
/// The wall scan runs against the pre-move snapshot, before any member
/// moves, so the flip is synchronized across the whole grid. The lateral
/// step applies unconditionally afterwards: on a flip frame the descent and
/// the first step in the new direction happen together.
pub fn advance(enemies: &mut [Enemy], arena_width: f32) {
    let must_descend = enemies
        .iter()
        .any(|e| e.rect.left() <= 0.0 || e.rect.right() >= arena_width);

    if must_descend {
        for enemy in enemies.iter_mut() {
            enemy.direction = -enemy.direction;
            enemy.rect.pos.y += ENEMY_DESCENT;
        }
    }

    for enemy in enemies.iter_mut() {
        enemy.rect.pos.x += enemy.direction * ENEMY_STEP_X;
    }
}
