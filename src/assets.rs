//! Sprite loading
//!
//! Each sprite loads independently; a failed image is logged and becomes
//! `None` so the renderer can fall back to flat rectangles. The batch as a
//! whole always completes - startup gates on it but can never be wedged by
//! a missing file.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Sprite asset paths, relative to the served page
pub const PLAYER_SPRITE: &str = "sprites/player.png";
pub const ENEMY_SPRITE: &str = "sprites/enemy.png";
pub const PROJECTILE_SPRITE: &str = "sprites/projectile.png";

/// The three drawable categories; any subset may be missing
#[derive(Debug, Clone, Default)]
pub struct Sprites {
    pub player: Option<HtmlImageElement>,
    pub enemy: Option<HtmlImageElement>,
    pub projectile: Option<HtmlImageElement>,
}

/// An image load already in flight
struct PendingImage {
    image: HtmlImageElement,
    loaded: JsFuture,
}

/// Start fetching an image; the browser downloads as soon as `src` is set
fn begin_load(src: &str) -> Option<PendingImage> {
    let image = HtmlImageElement::new().ok()?;

    let promise = Promise::new(&mut |resolve, _reject| {
        // Both callbacks resolve - per-image failure is absorbed here, not
        // surfaced as a rejection.
        let on_load = {
            let resolve = resolve.clone();
            Closure::once_into_js(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
            })
        };
        let on_error = Closure::once_into_js(move |_event: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        image.set_onload(Some(on_load.unchecked_ref()));
        image.set_onerror(Some(on_error.unchecked_ref()));
    });

    image.set_src(src);
    Some(PendingImage {
        image,
        loaded: JsFuture::from(promise),
    })
}

/// Wait out a pending load; `None` if the image failed
async fn finish_load(pending: Option<PendingImage>, src: &str) -> Option<HtmlImageElement> {
    let pending = pending?;
    match pending.loaded.await {
        Ok(value) if value.as_bool() == Some(true) => Some(pending.image),
        _ => {
            log::error!("Failed to load sprite {src}");
            None
        }
    }
}

/// Load a single image, resolving to `None` on failure
pub async fn load_image(src: &str) -> Option<HtmlImageElement> {
    finish_load(begin_load(src), src).await
}

impl Sprites {
    /// Fan-out/fan-in load of all three sprites
    ///
    /// All loads are in flight before the first await, and the join always
    /// completes whatever subset of them failed.
    pub async fn load() -> Self {
        let player = begin_load(PLAYER_SPRITE);
        let enemy = begin_load(ENEMY_SPRITE);
        let projectile = begin_load(PROJECTILE_SPRITE);

        Self {
            player: finish_load(player, PLAYER_SPRITE).await,
            enemy: finish_load(enemy, ENEMY_SPRITE).await,
            projectile: finish_load(projectile, PROJECTILE_SPRITE).await,
        }
    }
}
