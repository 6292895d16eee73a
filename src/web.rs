//! Browser bridge
//!
//! The page owns the scene, the DOM and `requestAnimationFrame`; it drives a
//! `WebGame` and draws from the JSON frame returned by `tick`.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::input::Command;
use crate::sim::{Direction, GameSession};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Lane Hopper starting...");
    }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game from an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let session =
            GameSession::with_seed(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame { session })
    }

    /// Queue a move by name ("forward", "backward", "left", "right")
    #[wasm_bindgen(js_name = requestMove)]
    pub fn request_move(&mut self, direction: &str) -> bool {
        match direction.parse::<Direction>() {
            Ok(direction) => self.session.request_move(direction),
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// Handle a `KeyboardEvent.key`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        Command::from_key(key)
            .map(|command| command.apply(&mut self.session))
            .unwrap_or(false)
    }

    /// Handle a click on a control button by element id
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, id: &str) -> bool {
        Command::from_button(id)
            .map(|command| command.apply(&mut self.session))
            .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = resetGame)]
    pub fn reset_game(&mut self) {
        self.session.reset();
        log::info!("Game restarted with seed: {}", self.session.seed());
    }

    /// Advance to the animation-frame timestamp; returns the frame as JSON
    pub fn tick(&mut self, timestamp: f64) -> Result<String, JsValue> {
        self.session.tick(timestamp);
        serde_json::to_string(&self.session.frame()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> u32 {
        self.session.snapshot().score
    }

    pub fn ended(&self) -> bool {
        !self.session.is_alive()
    }
}
