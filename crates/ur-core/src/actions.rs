//! Moves a team can make and the events that result from applying them.
//!
//! A `Move` refers to pieces by id, and ids shift whenever a piece leaves
//! the board. Moves are only valid for the state they were generated from
//! and must be regenerated after every `Game::apply_move`.

use crate::board::{Field, RESERVE};
use crate::team::TeamColor;
use serde::{Deserialize, Serialize};

/// A candidate move for the team whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Move {
    /// Bring a reserve piece onto field `distance - 1`
    New { distance: u8 },
    /// Advance `piece` onto a free field
    #[serde(rename = "Move")]
    Advance {
        from: Field,
        distance: u8,
        piece: usize,
    },
    /// Advance `piece` onto a combat square held by the opponent's `dying_piece`
    Kill {
        from: Field,
        distance: u8,
        piece: usize,
        dying_piece: usize,
    },
    /// Advance `piece` exactly onto the terminus
    Save {
        from: Field,
        distance: u8,
        piece: usize,
    },
}

impl Move {
    /// Roll used by this move
    pub fn distance(&self) -> u8 {
        match *self {
            Move::New { distance }
            | Move::Advance { distance, .. }
            | Move::Kill { distance, .. }
            | Move::Save { distance, .. } => distance,
        }
    }

    /// Field the piece leaves (`RESERVE` for new pieces)
    pub fn from(&self) -> Field {
        match *self {
            Move::New { .. } => RESERVE,
            Move::Advance { from, .. } | Move::Kill { from, .. } | Move::Save { from, .. } => from,
        }
    }

    /// Id of the moving piece, if it is already on the board
    pub fn piece(&self) -> Option<usize> {
        match *self {
            Move::New { .. } => None,
            Move::Advance { piece, .. } | Move::Kill { piece, .. } | Move::Save { piece, .. } => {
                Some(piece)
            }
        }
    }

    /// Field the piece ends up on. Saturates for distances no roll can produce.
    pub fn landing(&self) -> Field {
        let distance = Field::try_from(self.distance()).unwrap_or(Field::MAX);
        self.from().saturating_add(distance)
    }
}

/// Events that occur as a result of applying a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A reserve piece entered the board
    PieceEntered { team: TeamColor, field: Field },

    /// A piece advanced to a free field
    PieceMoved {
        team: TeamColor,
        from: Field,
        to: Field,
    },

    /// A piece was captured and returned to its owner's reserve
    PieceCaptured {
        attacker: TeamColor,
        field: Field,
    },

    /// A piece reached the terminus
    PieceSaved { team: TeamColor, from: Field },

    /// The other team is now to move
    TurnPassed { from: TeamColor, to: TeamColor },

    /// The same team moves again after landing on a rosette
    ExtraTurn { team: TeamColor, field: Field },

    /// A team saved all of its pieces
    GameWon { team: TeamColor },
}
