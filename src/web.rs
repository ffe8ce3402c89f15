//! Browser bindings
//!
//! The page owns layout and drawing; it forwards clicks and pointer samples
//! (already converted to percentage space) and calls `frame()` from
//! `requestAnimationFrame`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::shell::{Difficulty, Session};
use crate::sim::{GameKind, Input};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }
    log::info!("Vision Quest starting...");
}

fn now_ms() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    last_frame: Option<f64>,
}

#[wasm_bindgen]
impl WebSession {
    /// A `seed` of 0 seeds from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebSession {
        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed
        };
        WebSession {
            session: Session::new(seed),
            last_frame: None,
        }
    }

    /// `"easy"` or `"medium"`
    pub fn choose_difficulty(&mut self, label: &str) -> bool {
        let difficulty = match label.to_ascii_lowercase().as_str() {
            "easy" | "facile" => Difficulty::Easy,
            "medium" | "medio" => Difficulty::Medium,
            _ => return false,
        };
        self.session.choose_difficulty(difficulty);
        true
    }

    /// Game label such as `"MEMORY"` or `"SLICE_CHALLENGE"`
    pub fn choose_game(&mut self, label: &str) -> bool {
        match GameKind::from_label(label) {
            Some(kind) => {
                self.last_frame = None;
                self.session.choose_game(kind)
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    pub fn home(&mut self) {
        self.session.home();
    }

    /// Returns the number of verdicts reported
    pub fn select(&mut self, index: usize) -> usize {
        self.session.handle(Input::Select(index)).len()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> usize {
        self.session.handle(Input::PointerDown(Vec2::new(x, y))).len()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> usize {
        self.session.handle(Input::PointerMove(Vec2::new(x, y))).len()
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> usize {
        self.session.handle(Input::PointerUp(Vec2::new(x, y))).len()
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.session.advance(dt_ms);
    }

    /// Advance by the wall time since the previous frame
    pub fn frame(&mut self) {
        let Some(now) = now_ms() else {
            return;
        };
        let dt = self.last_frame.map_or(0.0, |last| (now - last) as f32);
        self.last_frame = Some(now);
        self.session.advance(dt);
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }
}
