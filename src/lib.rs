//! Board generator for a Tiwanaku-style tile logic game.
//!
//! Produces a board of terrain groups where no two groups of the same
//! terrain touch and every group of size `n` holds crops `1..=n`, no two
//! equal crops adjacent. Compiles to a wasm module for the browser worker
//! and to a plain Rust library.
//!
//! Boards cross the JS boundary as nested arrays of plain objects, row-major:
//! `board[y][x]`.

pub mod board;
pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod generator;
pub mod grid;
pub mod group;
pub mod hints;
pub mod rng;
pub mod serial;
pub mod stack;
pub mod state;
#[cfg(not(target_arch = "wasm32"))]
pub mod worker;

pub use board::{GameBoard, HiddenFieldCounts};
pub use config::{BoardSize, GameConfig};
pub use error::{BoardError, ConfigError, GenerationError};
pub use generator::{generate_board, generate_board_with_seed, GameGenerator, GrowthStrategy};
pub use serial::{SerializedBoard, SerializedCell, SerializedGame};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::board::GameBoard;
    use crate::config::BoardSize;
    use crate::generator;
    use crate::serial::SerializedBoard;

    fn parse_size(size: &str) -> Result<BoardSize, JsError> {
        Ok(size.parse::<BoardSize>()?)
    }

    fn board_from_js(board: JsValue) -> Result<GameBoard, JsError> {
        let serialized: SerializedBoard = serde_wasm_bindgen::from_value(board)?;
        Ok(GameBoard::from_serialized(&serialized)?)
    }

    /// Generate a board of the given size (`"small"` or `"standard"`).
    /// Returns `SerializedCell[][]`.
    #[wasm_bindgen(js_name = "generateBoard")]
    pub fn wasm_generate_board(size: &str) -> Result<JsValue, JsError> {
        let board = generator::generate_board(parse_size(size)?)?;
        Ok(serde_wasm_bindgen::to_value(&board)?)
    }

    /// Reproducible variant of `generateBoard`.
    #[wasm_bindgen(js_name = "generateBoardWithSeed")]
    pub fn wasm_generate_board_with_seed(size: &str, seed: u64) -> Result<JsValue, JsError> {
        let board = generator::generate_board_with_seed(parse_size(size)?, seed)?;
        Ok(serde_wasm_bindgen::to_value(&board)?)
    }

    /// Reveal the field of `(x, y)`, or its crop if the field is already
    /// visible. Returns the updated board.
    #[wasm_bindgen(js_name = "revealNext")]
    pub fn wasm_reveal_next(board: JsValue, x: usize, y: usize) -> Result<JsValue, JsError> {
        let revealed = board_from_js(board)?.reveal_next(x, y)?;
        Ok(serde_wasm_bindgen::to_value(&revealed.serialize())?)
    }

    /// Hidden field count per terrain.
    /// Returns `{ forest, desert, mountain, valley, total }`.
    #[wasm_bindgen(js_name = "hiddenFieldCounts")]
    pub fn wasm_hidden_field_counts(board: JsValue) -> Result<JsValue, JsError> {
        let counts = board_from_js(board)?.hidden_field_counts();

        let obj = js_sys::Object::new();
        let entries = [
            ("forest", counts.forest),
            ("desert", counts.desert),
            ("mountain", counts.mountain),
            ("valley", counts.valley),
            ("total", counts.total()),
        ];
        for (key, count) in entries {
            js_sys::Reflect::set(&obj, &key.into(), &(count as u32).into())
                .map_err(|_| JsError::new("cannot build the counts object"))?;
        }
        Ok(obj.into())
    }
}
