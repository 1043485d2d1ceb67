//! Canvas 2D presentation
//!
//! A pure read of the current game state: clear, then draw each entity
//! category as its sprite, or as a flat-colored rectangle when the sprite
//! is missing. Never mutates simulation state.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::Sprites;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::collision::Rect;
use crate::sim::state::{GamePhase, GameState};

/// Fallback fill colors per entity category
const BACKGROUND_COLOR: &str = "#000";
const PLAYER_COLOR: &str = "#0f0";
const PROJECTILE_COLOR: &str = "#f00";
const ENEMY_COLOR: &str = "#00f";

/// Canvas scene: the 2D context plus whatever sprites survived loading
pub struct Scene {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
}

impl Scene {
    pub fn new(canvas: &HtmlCanvasElement, sprites: Sprites) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, sprites })
    }

    /// Redraw the whole scene from the current state
    pub fn draw(&self, state: &GameState) {
        self.ctx.set_fill_style_str(BACKGROUND_COLOR);
        self.ctx
            .fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        // Start screen up - nothing else to draw yet
        if state.phase == GamePhase::NotStarted {
            return;
        }

        self.draw_entity(&state.player.rect, &self.sprites.player, PLAYER_COLOR);
        for projectile in &state.projectiles {
            self.draw_entity(&projectile.rect, &self.sprites.projectile, PROJECTILE_COLOR);
        }
        for enemy in &state.enemies {
            self.draw_entity(&enemy.rect, &self.sprites.enemy, ENEMY_COLOR);
        }
    }

    /// Sprite if it loaded, flat rectangle otherwise
    fn draw_entity(&self, rect: &Rect, sprite: &Option<HtmlImageElement>, fallback: &str) {
        match sprite {
            Some(image) => {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            None => {
                self.ctx.set_fill_style_str(fallback);
                self.ctx.fill_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
        }
    }
}
