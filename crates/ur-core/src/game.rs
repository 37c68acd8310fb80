//! Game controller.
//!
//! This module contains the `Game` struct: move generation for a roll and
//! the state transition that applies a chosen move.

use crate::actions::{GameEvent, Move};
use crate::board::{
    is_board_field, is_field_star, is_in_combat_zone, Field, CHOKE_POINT, SAFE_END,
};
use crate::dice::MAX_ROLL;
use crate::team::{Team, TeamColor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when applying moves or loading state
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Start pieces must be greater than zero")]
    InvalidStartPieces,

    #[error("Move refers to piece {piece}, which no longer matches the board")]
    MoveInvalidated { piece: usize },

    #[error("No pieces left in reserve")]
    NoPiecesLeft,

    #[error("Move is not legal in the current position")]
    IllegalMove,

    #[error("Game is over")]
    GameOver,

    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Serialized form of a game, checked before it becomes a `Game`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameSnapshot {
    start_pieces: u32,
    current_color: TeamColor,
    teams: [Team; 2],
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GameSnapshot")]
pub struct Game {
    /// Pieces each team starts with
    start_pieces: u32,
    /// Team to move
    current_color: TeamColor,
    /// Indexed by `TeamColor::index`
    teams: [Team; 2],
}

impl TryFrom<GameSnapshot> for Game {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        Game::from_parts(snapshot.start_pieces, snapshot.current_color, snapshot.teams)
    }
}

impl Game {
    /// Create a new game, White to move, all pieces in reserve
    pub fn try_new(start_pieces: u32) -> Result<Self, GameError> {
        if start_pieces == 0 {
            return Err(GameError::InvalidStartPieces);
        }
        Ok(Self {
            start_pieces,
            current_color: TeamColor::White,
            teams: [Team::new(start_pieces), Team::new(start_pieces)],
        })
    }

    /// Create a new game. Panics if `start_pieces` is zero.
    pub fn new(start_pieces: u32) -> Self {
        assert!(start_pieces > 0, "Must start with at least one piece");
        Self {
            start_pieces,
            current_color: TeamColor::White,
            teams: [Team::new(start_pieces), Team::new(start_pieces)],
        }
    }

    /// Build a game from explicit team states, checking every invariant
    pub fn from_parts(
        start_pieces: u32,
        current_color: TeamColor,
        teams: [Team; 2],
    ) -> Result<Self, GameError> {
        if start_pieces == 0 {
            return Err(GameError::InvalidStartPieces);
        }

        for color in TeamColor::ALL {
            let team = &teams[color.index()];
            if team.total() != u64::from(start_pieces) {
                return Err(GameError::InvalidState(format!(
                    "{} accounts for {} pieces, expected {}",
                    color,
                    team.total(),
                    start_pieces
                )));
            }
            for (id, field) in team.pieces.iter().enumerate() {
                if !is_board_field(*field) {
                    return Err(GameError::InvalidState(format!(
                        "{} piece {} is on field {}",
                        color, id, field
                    )));
                }
                if team.pieces[..id].contains(field) {
                    return Err(GameError::InvalidState(format!(
                        "{} has two pieces on field {}",
                        color, field
                    )));
                }
            }
        }

        let [white, black] = &teams;
        if let Some(field) = white
            .pieces
            .iter()
            .find(|f| is_in_combat_zone(**f) && black.is_piece_on_field(**f))
        {
            return Err(GameError::InvalidState(format!(
                "Both teams occupy combat field {}",
                field
            )));
        }
        if white.pieces_safe == start_pieces && black.pieces_safe == start_pieces {
            return Err(GameError::InvalidState("Both teams have won".to_string()));
        }

        Ok(Self {
            start_pieces,
            current_color,
            teams,
        })
    }

    /// Pieces each team started with
    pub fn start_pieces(&self) -> u32 {
        self.start_pieces
    }

    /// Team to move
    pub fn current_color(&self) -> TeamColor {
        self.current_color
    }

    /// State of the given team
    pub fn team(&self, color: TeamColor) -> &Team {
        &self.teams[color.index()]
    }

    fn team_mut(&mut self, color: TeamColor) -> &mut Team {
        &mut self.teams[color.index()]
    }

    /// Both teams, White first
    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    /// Team to move
    pub fn current_team(&self) -> &Team {
        self.team(self.current_color)
    }

    /// Team waiting for its turn
    pub fn opposite_team(&self) -> &Team {
        self.team(self.current_color.opposite())
    }

    /// True once either team has saved all of its pieces
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// The team that saved all of its pieces, if any
    pub fn winner(&self) -> Option<TeamColor> {
        TeamColor::ALL
            .into_iter()
            .find(|color| self.team(*color).pieces_safe == self.start_pieces)
    }

    /// Legal moves for the current team with this roll.
    ///
    /// A `New` move comes first when a piece can enter, followed by the
    /// moves of the board pieces in piece-id order.
    pub fn possible_moves(&self, roll: u8) -> Vec<Move> {
        let mut moves = Vec::new();

        if roll == 0 || roll > MAX_ROLL || self.is_over() {
            return moves;
        }

        let team = self.current_team();
        let opponent = self.opposite_team();
        let distance = roll as Field;

        // The opponent may sit on our entry field, only our own pieces block it
        if team.pieces_left > 0 && !team.is_piece_on_field(distance - 1) {
            moves.push(Move::New { distance: roll });
        }

        for (piece, &from) in team.pieces.iter().enumerate() {
            let landing = from + distance;

            if landing == SAFE_END {
                moves.push(Move::Save {
                    from,
                    distance: roll,
                    piece,
                });
                continue;
            }

            if landing > SAFE_END {
                continue;
            }

            if landing == CHOKE_POINT && opponent.is_piece_on_field(CHOKE_POINT) {
                continue;
            }

            if team.is_piece_on_field(landing) {
                continue;
            }

            match opponent.piece_on_field(landing) {
                Some(dying_piece) if is_in_combat_zone(landing) => moves.push(Move::Kill {
                    from,
                    distance: roll,
                    piece,
                    dying_piece,
                }),
                _ => moves.push(Move::Advance {
                    from,
                    distance: roll,
                    piece,
                }),
            }
        }

        moves
    }

    /// Apply a move generated for the current state, or pass with `None`.
    ///
    /// The move is checked against the board before anything changes, so a
    /// rejected move leaves the game untouched.
    pub fn apply_move(&mut self, mv: Option<Move>) -> Result<Vec<GameEvent>, GameError> {
        let Some(mv) = mv else {
            return Ok(vec![self.pass_turn()]);
        };

        if self.is_over() {
            return Err(GameError::GameOver);
        }

        if let Err(e) = self.validate_move(&mv) {
            warn!(team = %self.current_color, ?mv, error = %e, "rejected move");
            return Err(e);
        }

        let color = self.current_color;
        let mut events = Vec::new();

        let extra_turn = match mv {
            Move::New { distance } => {
                let field = distance as Field - 1;
                self.team_mut(color).add_piece(field)?;
                events.push(GameEvent::PieceEntered { team: color, field });
                is_field_star(field)
            }
            Move::Save { from, piece, .. } => {
                self.team_mut(color).safe_piece(piece)?;
                events.push(GameEvent::PieceSaved { team: color, from });
                if self.team(color).pieces_safe == self.start_pieces {
                    events.push(GameEvent::GameWon { team: color });
                }
                false
            }
            Move::Kill {
                from,
                distance,
                piece,
                dying_piece,
            } => {
                let to = from + distance as Field;
                self.team_mut(color.opposite()).kill_piece(dying_piece)?;
                self.team_mut(color).pieces[piece] = to;
                events.push(GameEvent::PieceMoved {
                    team: color,
                    from,
                    to,
                });
                events.push(GameEvent::PieceCaptured {
                    attacker: color,
                    field: to,
                });
                // Captures always end the turn
                false
            }
            Move::Advance {
                from,
                distance,
                piece,
            } => {
                let to = from + distance as Field;
                self.team_mut(color).pieces[piece] = to;
                events.push(GameEvent::PieceMoved {
                    team: color,
                    from,
                    to,
                });
                is_field_star(to)
            }
        };

        debug!(team = %color, ?mv, extra_turn, "applied move");

        if extra_turn {
            events.push(GameEvent::ExtraTurn {
                team: color,
                field: mv.landing(),
            });
        } else {
            events.push(self.pass_turn());
        }

        Ok(events)
    }

    /// Check that `mv` was generated from the current state
    fn validate_move(&self, mv: &Move) -> Result<(), GameError> {
        let team = self.current_team();

        if mv.distance() == 0 || mv.distance() > MAX_ROLL {
            return Err(GameError::IllegalMove);
        }

        match *mv {
            Move::New { .. } => {
                if team.pieces_left == 0 {
                    return Err(GameError::NoPiecesLeft);
                }
            }
            Move::Advance { from, piece, .. }
            | Move::Kill { from, piece, .. }
            | Move::Save { from, piece, .. } => {
                if team.field_of(piece) != Some(from) {
                    return Err(GameError::MoveInvalidated { piece });
                }
            }
        }

        if let Move::Kill { dying_piece, .. } = *mv {
            if self.opposite_team().field_of(dying_piece) != Some(mv.landing()) {
                return Err(GameError::MoveInvalidated { piece: dying_piece });
            }
        }

        if !self.possible_moves(mv.distance()).contains(mv) {
            return Err(GameError::IllegalMove);
        }

        Ok(())
    }

    fn pass_turn(&mut self) -> GameEvent {
        let from = self.current_color;
        self.current_color = from.opposite();
        GameEvent::TurnPassed {
            from,
            to: self.current_color,
        }
    }

    /// Serialize the game state
    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::InvalidState(e.to_string()))
    }

    /// Load a game state, rejecting states that break the piece invariants
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::InvalidState(e.to_string()))
    }
}
