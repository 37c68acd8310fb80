//! WebAssembly bindings for the rules engine.
//!
//! This module exposes the game to a JavaScript presentation layer through
//! wasm-bindgen. Moves and events cross the boundary as JSON.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::Move;
#[cfg(feature = "wasm")]
use crate::bot::{Bot, BotDifficulty};
#[cfg(feature = "wasm")]
use crate::dice;
#[cfg(feature = "wasm")]
use crate::game::Game;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new game where each team starts with `start_pieces`
    #[wasm_bindgen(constructor)]
    pub fn new(start_pieces: u32) -> Result<WasmGame, JsValue> {
        let game = Game::try_new(start_pieces).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { game })
    }

    /// Restore a game saved with `getState`
    #[wasm_bindgen(js_name = fromState)]
    pub fn from_state(json: &str) -> Result<WasmGame, JsValue> {
        let game = Game::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { game })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.game.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the color to move (0 = White, 1 = Black)
    #[wasm_bindgen(js_name = getCurrentColor)]
    pub fn get_current_color(&self) -> u8 {
        self.game.current_color().index() as u8
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Get the winner (if game is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.game.winner().map(|color| color.index() as u8)
    }

    /// Throw the four dice
    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&self) -> u8 {
        dice::roll(&mut rand::thread_rng())
    }

    /// Legal moves for `roll` as a JSON array
    #[wasm_bindgen(js_name = getPossibleMoves)]
    pub fn get_possible_moves(&self, roll: u8) -> String {
        let moves = self.game.possible_moves(roll);
        serde_json::to_string(&moves).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply a move from JSON (`"null"` passes), returns events JSON or error
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, move_json: &str) -> Result<String, JsValue> {
        let mv: Option<Move> = serde_json::from_str(move_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid move JSON: {}", e)))?;

        match self.game.apply_move(mv) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Move failed: {}", e))),
        }
    }

    /// Get a bot's suggested move for the team to move
    /// difficulty: "Easy", "Medium", or "Hard"
    #[wasm_bindgen(js_name = getBotMove)]
    pub fn get_bot_move(&self, roll: u8, difficulty: &str) -> String {
        let diff = difficulty.parse().unwrap_or(BotDifficulty::Easy);

        let mut bot = Bot::new(self.game.current_color(), diff);
        match bot.choose_move(&self.game, roll) {
            Some(mv) => serde_json::to_string(&mv).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}
