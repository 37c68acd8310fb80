//! Team state.
//!
//! Each team tracks its reserve, its saved pieces and the fields of the
//! pieces currently on the board. A piece id is its index in `pieces`, so
//! removing a piece shifts the ids of every piece after it.

use crate::board::Field;
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamColor {
    White = 0,
    Black = 1,
}

impl TeamColor {
    /// Both colors, in turn order
    pub const ALL: [TeamColor; 2] = [TeamColor::White, TeamColor::Black];

    /// The other team
    pub fn opposite(self) -> Self {
        match self {
            TeamColor::White => TeamColor::Black,
            TeamColor::Black => TeamColor::White,
        }
    }

    /// Index into `Game::teams`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamColor::White => write!(f, "White"),
            TeamColor::Black => write!(f, "Black"),
        }
    }
}

/// A single team's pieces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Pieces still in reserve
    pub pieces_left: u32,
    /// Pieces that reached the terminus
    pub pieces_safe: u32,
    /// Fields of the pieces on the board, indexed by piece id
    pub pieces: Vec<Field>,
}

impl Team {
    /// Create a team with every piece in reserve
    pub fn new(start_pieces: u32) -> Self {
        Self {
            pieces_left: start_pieces,
            pieces_safe: 0,
            pieces: Vec::new(),
        }
    }

    /// Number of pieces on the board
    pub fn pieces_on_board(&self) -> u32 {
        self.pieces.len() as u32
    }

    /// Reserve + board + safe. Constant for the lifetime of a game.
    ///
    /// Widened so that corrupt counts loaded from a save cannot wrap.
    pub fn total(&self) -> u64 {
        u64::from(self.pieces_left) + self.pieces.len() as u64 + u64::from(self.pieces_safe)
    }

    /// Bring a piece out of reserve onto `field`
    pub fn add_piece(&mut self, field: Field) -> Result<usize, GameError> {
        if self.pieces_left == 0 {
            return Err(GameError::NoPiecesLeft);
        }
        self.pieces_left -= 1;
        self.pieces.push(field);
        Ok(self.pieces.len() - 1)
    }

    /// Send piece `id` back to reserve, returning the field it stood on
    pub fn kill_piece(&mut self, id: usize) -> Result<Field, GameError> {
        let field = self.remove(id)?;
        self.pieces_left += 1;
        Ok(field)
    }

    /// Retire piece `id` as saved, returning the field it left from
    pub fn safe_piece(&mut self, id: usize) -> Result<Field, GameError> {
        let field = self.remove(id)?;
        self.pieces_safe += 1;
        Ok(field)
    }

    /// Field of piece `id`
    pub fn field_of(&self, id: usize) -> Option<Field> {
        self.pieces.get(id).copied()
    }

    /// Whether one of this team's pieces stands on `field`
    pub fn is_piece_on_field(&self, field: Field) -> bool {
        self.pieces.contains(&field)
    }

    /// Id of the piece standing on `field`
    pub fn piece_on_field(&self, field: Field) -> Option<usize> {
        self.pieces.iter().position(|f| *f == field)
    }

    fn remove(&mut self, id: usize) -> Result<Field, GameError> {
        if id >= self.pieces.len() {
            return Err(GameError::MoveInvalidated { piece: id });
        }
        Ok(self.pieces.remove(id))
    }
}
