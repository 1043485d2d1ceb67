//! DOM overlay and score bindings
//!
//! The one-way half of the UI: the sim reports events, this module pushes
//! them into text elements and overlay visibility. Nothing is ever read
//! back into the simulation.

use web_sys::Document;

use crate::sim::state::GameEvent;

/// Element ids wired by the page
const SCORE_ID: &str = "score";
const FINAL_SCORE_ID: &str = "final-score";
const START_SCREEN_ID: &str = "start-screen";
const GAME_OVER_ID: &str = "game-over";
const MOBILE_CONTROLS_ID: &str = "mobile-controls";

/// Handle on the overlay/score elements
pub struct Hud {
    document: Document,
}

impl Hud {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Apply one frame's worth of simulation events
    pub fn apply(&self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::ScoreChanged(score) => self.set_score(score),
                GameEvent::WaveCleared(wave) => {
                    log::info!("Wave {wave} incoming");
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over with score {score}");
                    self.show_game_over(score);
                }
            }
        }
    }

    pub fn set_score(&self, score: u32) {
        if let Some(el) = self.document.get_element_by_id(SCORE_ID) {
            el.set_text_content(Some(&format!("Score: {score}")));
        }
    }

    pub fn hide_start_screen(&self) {
        self.add_class(START_SCREEN_ID, "hidden");
    }

    pub fn show_game_over(&self, score: u32) {
        if let Some(el) = self.document.get_element_by_id(FINAL_SCORE_ID) {
            el.set_text_content(Some(&score.to_string()));
        }
        self.remove_class(GAME_OVER_ID, "hidden");
    }

    pub fn hide_game_over(&self) {
        self.add_class(GAME_OVER_ID, "hidden");
    }

    pub fn show_mobile_controls(&self) {
        self.remove_class(MOBILE_CONTROLS_ID, "hidden");
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.class_list().remove_1(class);
        }
    }
}
