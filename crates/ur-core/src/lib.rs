//! Rules engine for a two-team cross-and-circle race game.
//!
//! This crate provides the game logic only, including:
//! - Board topology: entry lanes, the shared combat track, rosettes, home
//! - Team state: reserve, pieces on the board, saved pieces
//! - Move generation for a dice roll and move application
//! - Dice and bot policies for automated teams
//!
//! # Architecture
//!
//! The engine is synchronous and turn-driven. A caller asks for the legal
//! moves of the team to move, picks one, and applies it:
//!
//! ```
//! use ur_core::Game;
//!
//! let mut game = Game::new(7);
//! let moves = game.possible_moves(2);
//! game.apply_move(moves.first().copied()).unwrap();
//! ```
//!
//! Moves refer to pieces by index, so they must be regenerated after
//! every applied move. It can be compiled to native Rust or, with the
//! `wasm` feature, to WebAssembly for a browser front end.
//!
//! # Modules
//!
//! - [`board`]: Field numbering and zone classification
//! - [`team`]: Team colors and per-team piece state
//! - [`actions`]: Moves and the events they produce
//! - [`game`]: Game controller
//! - [`dice`]: Four two-sided dice
//! - [`bot`]: Automated move selection

pub mod actions;
pub mod board;
pub mod bot;
pub mod dice;
pub mod game;
pub mod team;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameEvent, Move};
pub use board::{Field, Zone};
pub use bot::{Bot, BotDifficulty};
pub use game::{Game, GameError};
pub use team::{Team, TeamColor};
