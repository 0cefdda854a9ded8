use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::{GameError, ParseBoardError};
pub use game::GameEngine;
pub use types::{
    Cell, Color, FinalReport, Outcome, Player, Position, Score, TurnReport, TurnState,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
