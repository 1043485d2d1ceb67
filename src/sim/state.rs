//! Game state and core simulation types
//!
//! One explicit struct owns every entity and flag the frame loop touches;
//! nothing gameplay-related lives in globals or the DOM.

use glam::Vec2;

use crate::consts::*;
use crate::settings::ResetPolicy;

use super::collision::Rect;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Boot state - start screen visible, nothing simulated
    NotStarted,
    /// Active gameplay
    Running,
    /// An enemy reached the player's row; steps are no-ops until reset
    Over,
}

/// Notifications produced by a simulation step, consumed by the HUD
///
/// The sim never touches the DOM; these are the only way UI state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score changed; carries the new total
    ScoreChanged(u32),
    /// The whole grid was cleared and a fresh one spawned; carries the new wave index
    WaveCleared(u32),
    /// Terminal transition; carries the final score
    GameOver { score: u32 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal speed in pixels per frame
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                CANVAS_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    /// Recenter horizontally, keeping the fixed bottom row
    pub fn recenter(&mut self) {
        self.rect.pos.x = CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
    }
}

/// An upward-travelling shot
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Vertical speed in pixels per frame (applied toward the top)
    pub speed: f32,
}

/// One invader in the marching grid
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Horizontal direction sign, +1.0 or -1.0; shared by the whole formation
    pub direction: f32,
}

/// Build a fresh enemy grid at its initial layout
///
/// `ENEMY_ROWS` x `ENEMIES_PER_ROW` members, `ENEMY_SPACING` apart on both
/// axes, horizontally centered as a block of slots, all moving right.
pub fn enemy_grid() -> Vec<Enemy> {
    let start_x = (CANVAS_WIDTH - ENEMIES_PER_ROW as f32 * ENEMY_SPACING) / 2.0;
    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMIES_PER_ROW);
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMIES_PER_ROW {
            enemies.push(Enemy {
                rect: Rect::new(
                    start_x + col as f32 * ENEMY_SPACING,
                    ENEMY_START_Y + row as f32 * ENEMY_SPACING,
                    ENEMY_WIDTH,
                    ENEMY_HEIGHT,
                ),
                direction: 1.0,
            });
        }
    }
    enemies
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// 0-based index of the current grid; bumped on every respawn
    pub wave_index: u32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Frames simulated since start
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Boot state: start screen up, no entities besides the parked player
    pub fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            wave_index: 0,
            player: Player::default(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Start action: NotStarted -> Running, populating the initial grid
    ///
    /// No-op in any other phase.
    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.enemies = enemy_grid();
        self.phase = GamePhase::Running;
    }

    /// Fire action: append one projectile centered on the player
    ///
    /// Only valid while running; ignored otherwise.
    pub fn fire(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.projectiles.push(Projectile {
            rect: Rect::new(
                self.player.rect.pos.x + self.player.rect.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
                self.player.rect.pos.y,
                PROJECTILE_WIDTH,
                PROJECTILE_HEIGHT,
            ),
            speed: PROJECTILE_SPEED,
        });
    }

    /// Reset action: back to Running with a zero score and a fresh grid
    ///
    /// Clears projectiles and the game-over state; the player either stays
    /// where it was or recenters, per the configured policy.
    pub fn reset(&mut self, policy: ResetPolicy) {
        self.score = 0;
        self.wave_index = 0;
        self.projectiles.clear();
        self.enemies = enemy_grid();
        if policy == ResetPolicy::Recenter {
            self.player.recenter();
        }
        self.phase = GamePhase::Running;
    }

    /// Replace the (empty) grid with a fresh one and bump the wave counter
    pub fn respawn_wave(&mut self) {
        self.wave_index += 1;
        self.enemies = enemy_grid();
    }

    /// Player center x, used to place fired projectiles
    pub fn player_center_x(&self) -> f32 {
        self.player.rect.pos.x + self.player.rect.size.x / 2.0
    }

    /// True when every enemy rectangle lies inside the canvas
    pub fn enemies_in_bounds(&self) -> bool {
        self.enemies.iter().all(|e| {
            e.rect.left() >= 0.0
                && e.rect.right() <= CANVAS_WIDTH
                && e.rect.top() >= 0.0
                && e.rect.bottom() <= CANVAS_HEIGHT
        })
    }

    /// Position helper for tests and the native smoke run
    pub fn player_pos(&self) -> Vec2 {
        self.player.rect.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_has_rows_times_columns_members() {
        let enemies = enemy_grid();
        assert_eq!(enemies.len(), ENEMY_ROWS * ENEMIES_PER_ROW);
    }

    #[test]
    fn test_grid_layout_formula() {
        let enemies = enemy_grid();
        let start_x = (CANVAS_WIDTH - ENEMIES_PER_ROW as f32 * ENEMY_SPACING) / 2.0;
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMIES_PER_ROW {
                let e = &enemies[row * ENEMIES_PER_ROW + col];
                assert_eq!(e.rect.pos.x, start_x + col as f32 * ENEMY_SPACING);
                assert_eq!(e.rect.pos.y, ENEMY_START_Y + row as f32 * ENEMY_SPACING);
                assert_eq!(e.direction, 1.0);
            }
        }
    }

    #[test]
    fn test_grid_within_canvas_bounds() {
        let mut state = GameState::new();
        state.start();
        assert!(state.enemies_in_bounds());
    }

    #[test]
    fn test_start_transition() {
        let mut state = GameState::new();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.enemies.is_empty());

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.enemies.len(), ENEMY_ROWS * ENEMIES_PER_ROW);

        // Start is only a NotStarted -> Running edge
        state.phase = GamePhase::Over;
        state.start();
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_firing_n_times_produces_n_projectiles() {
        let mut state = GameState::new();
        state.start();
        for _ in 0..5 {
            state.fire();
        }
        assert_eq!(state.projectiles.len(), 5);

        // Every shot starts centered on the player, top-aligned
        let first = &state.projectiles[0];
        assert_eq!(
            first.rect.pos.x,
            state.player_center_x() - PROJECTILE_WIDTH / 2.0
        );
        assert_eq!(first.rect.pos.y, state.player.rect.pos.y);
    }

    #[test]
    fn test_fire_ignored_unless_running() {
        let mut state = GameState::new();
        state.fire();
        assert!(state.projectiles.is_empty());

        state.start();
        state.phase = GamePhase::Over;
        state.fire();
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new();
        state.start();
        state.fire();
        state.score = 120;
        state.wave_index = 3;
        state.phase = GamePhase::Over;

        state.reset(ResetPolicy::KeepPlayer);
        let once = state.clone();
        state.reset(ResetPolicy::KeepPlayer);
        assert_eq!(state, once);

        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), ENEMY_ROWS * ENEMIES_PER_ROW);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_reset_policy_controls_player_position() {
        let mut state = GameState::new();
        state.start();
        state.player.rect.pos.x = 0.0;

        state.reset(ResetPolicy::KeepPlayer);
        assert_eq!(state.player.rect.pos.x, 0.0);

        state.reset(ResetPolicy::Recenter);
        assert_eq!(
            state.player.rect.pos.x,
            CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0
        );
    }
}
