//! Browser-facing wrapper around one [`GameEngine`].
//!
//! Structured values cross the boundary as plain JS objects via
//! `serde-wasm-bindgen`; refusals surface as JS string errors.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::GameEngine;
use crate::types::{Color, Position};

#[wasm_bindgen]
#[derive(Default)]
pub struct WasmGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = registerPlayer)]
    pub fn register_player(&mut self, name: &str, color: &str) -> Result<JsValue, JsValue> {
        let color: Color = color.parse().map_err(to_js_error)?;
        let player = self.engine.register_player(name, color).map_err(to_js_error)?;
        to_js(player)
    }

    /// Legal moves for `color` as `[{ row, col }, ...]`.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, color: &str) -> Result<JsValue, JsValue> {
        let color: Color = color.parse().map_err(to_js_error)?;
        to_js(&self.engine.legal_moves(color))
    }

    /// Submits a move; resolves to a `moved` or `rejected` report.
    pub fn submit(&mut self, color: &str, row: i32, col: i32) -> Result<JsValue, JsValue> {
        to_js(&self.engine.submit(color, row, col))
    }

    pub fn pass(&mut self, color: &str) -> Result<JsValue, JsValue> {
        let color: Color = color.parse().map_err(to_js_error)?;
        self.engine.pass(color).map_err(to_js_error)?;
        to_js(&self.engine.state())
    }

    #[wasm_bindgen(js_name = isLegal)]
    pub fn is_legal(&self, color: &str, row: i32, col: i32) -> Result<bool, JsValue> {
        let color: Color = color.parse().map_err(to_js_error)?;
        let pos = Position::new(row, col).map_err(to_js_error)?;
        Ok(self.engine.is_legal(color, pos))
    }

    #[wasm_bindgen(js_name = boardText)]
    pub fn board_text(&self) -> String {
        self.engine.board().to_string()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.state())
    }

    pub fn score(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.score())
    }

    #[wasm_bindgen(js_name = winnerMessage)]
    pub fn winner_message(&self) -> String {
        self.engine.winner().to_string()
    }

    /// `undefined` until the game has ended.
    #[wasm_bindgen(js_name = finalReport)]
    pub fn final_report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.final_report())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
