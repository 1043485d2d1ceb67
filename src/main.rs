//! Stage Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use stage_invaders::assets::Sprites;
    use stage_invaders::consts::*;
    use stage_invaders::hud::Hud;
    use stage_invaders::render::Scene;
    use stage_invaders::settings::Settings;
    use stage_invaders::sim::{GamePhase, GameState, StepInput, step};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        scene: Option<Scene>,
        hud: Hud,
        input: StepInput,
    }

    impl Game {
        fn new(settings: Settings, hud: Hud) -> Self {
            Self {
                state: GameState::new(),
                settings,
                scene: None,
                hud,
                input: StepInput::default(),
            }
        }

        /// Run one simulation step and push its events to the HUD
        fn update(&mut self) {
            let events = step(&mut self.state, &self.input, &self.settings);
            self.hud.apply(&events);
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref scene) = self.scene {
                scene.draw(&self.state);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stage Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let settings = Settings::load();
        // Keep the stored copy in sync with the effective settings
        settings.save();

        // Gate the first frame on the sprite batch; missing images already
        // degraded to fallback rectangles inside the loader.
        let sprites = Sprites::load().await;

        let hud = Hud::new(document.clone());
        let game = Rc::new(RefCell::new(Game::new(settings, hud)));

        match Scene::new(&canvas, sprites) {
            Ok(scene) => game.borrow_mut().scene = Some(scene),
            Err(err) => log::error!("Failed to acquire 2d context: {err:?}"),
        }

        // Mobile viewports get the touch overlay
        let is_mobile = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .is_some_and(|w| w <= CANVAS_WIDTH as f64);
        if is_mobile {
            game.borrow().hud.show_mobile_controls();
        }

        game.borrow().hud.set_score(0);

        // Set up input and button handlers
        setup_keyboard_handlers(game.clone());
        setup_touch_controls(&canvas, game.clone());
        setup_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Stage Invaders running!");
    }

    fn setup_keyboard_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: movement holds plus the one-shot fire action
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    " " => {
                        event.prevent_default();
                        g.state.fire();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release movement holds
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Map touches on the canvas halves to the logical left/right keys
    fn setup_touch_controls(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch start/move: hold the side the finger is on
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let relative_x = touch.client_x() as f64 - rect.left();
                    let mut g = game.borrow_mut();
                    let left_half = relative_x < rect.width() / 2.0;
                    g.input.left = left_half;
                    g.input.right = !left_half;
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: release both holds
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.left = false;
                g.input.right = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Start button: NotStarted -> Running, drop the start overlay
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::NotStarted {
                    g.state.start();
                    g.hud.hide_start_screen();
                    g.hud.set_score(0);
                    log::info!("Game started");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play-again button: explicit reset out of the Over state
        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let policy = g.settings.reset_policy;
                g.state.reset(policy);
                g.hud.hide_game_over();
                g.hud.set_score(0);
                log::info!("Game reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Shoot button (mobile overlay)
        if let Some(btn) = document.get_element_by_id("shoot-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.fire();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One step, one draw, reschedule - increments are canvas units per frame
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stage Invaders (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    // Run a headless smoke pass over the simulation
    println!("\nRunning simulation smoke test...");
    headless_smoke();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_smoke() {
    use stage_invaders::consts::{CANVAS_WIDTH, PLAYER_WIDTH};
    use stage_invaders::settings::Settings;
    use stage_invaders::sim::{GamePhase, GameState, StepInput, step};

    let settings = Settings::load();
    let mut state = GameState::new();
    state.start();
    state.fire();

    let input = StepInput {
        left: false,
        right: true,
    };
    for _ in 0..600 {
        step(&mut state, &input, &settings);
        if state.phase == GamePhase::Over {
            break;
        }
    }

    assert!(state.player.rect.pos.x <= CANVAS_WIDTH - PLAYER_WIDTH);
    println!(
        "✓ Simulated {} frames: score {}, player at {}",
        state.time_ticks,
        state.score,
        state.player_pos()
    );
}
