//! AI bot players.
//!
//! This module provides different difficulty levels of AI players:
//! - Easy: Random legal moves
//! - Medium: Fixed priorities (save, capture, rosette, retreat home, enter)
//! - Hard: One-move lookahead weighing progress against capture risk

use crate::actions::Move;
use crate::board::{is_field_star, is_in_combat_zone, Field, CHOKE_POINT, COMBAT};
use crate::dice::{probability, MAX_ROLL};
use crate::game::Game;
use crate::team::TeamColor;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown bot difficulty: {0}")]
pub struct ParseDifficultyError(String);

impl FromStr for BotDifficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" => Ok(BotDifficulty::Medium),
            "hard" => Ok(BotDifficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Score for each saved piece
const SAVED_WEIGHT: f64 = 20.0;

/// Score for keeping the turn
const EXTRA_TURN_WEIGHT: f64 = 6.0;

/// A bot player that picks one of the legal moves for a roll
pub struct Bot {
    pub color: TeamColor,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(color: TeamColor, difficulty: BotDifficulty) -> Self {
        Self {
            color,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(color: TeamColor, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            color,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for `roll`, or `None` when the bot must pass
    pub fn choose_move(&mut self, game: &Game, roll: u8) -> Option<Move> {
        if game.current_color() != self.color {
            return None;
        }

        let moves = game.possible_moves(roll);
        if moves.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&moves),
            BotDifficulty::Medium => choose_medium(&moves),
            BotDifficulty::Hard => self.choose_hard(game, &moves),
        }
    }

    /// Easy: Just pick a random legal move
    fn choose_easy(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }

    /// Hard: apply every candidate on a copy and keep the best position
    fn choose_hard(&mut self, game: &Game, moves: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;

        for mv in moves {
            let mut next = game.clone();
            if next.apply_move(Some(*mv)).is_err() {
                continue;
            }

            let mut score = evaluate(&next, self.color);
            if next.current_color() == self.color && !next.is_over() {
                score += EXTRA_TURN_WEIGHT;
            }

            match best {
                Some((_, top)) if top >= score => {}
                _ => best = Some((*mv, score)),
            }
        }

        best.map(|(mv, _)| mv).or_else(|| self.choose_easy(moves))
    }
}

/// Medium: fixed priorities, first match wins
fn choose_medium(moves: &[Move]) -> Option<Move> {
    // Save a piece
    if let Some(mv) = moves.iter().find(|m| matches!(m, Move::Save { .. })) {
        return Some(*mv);
    }

    // Capture, preferring the victim that travelled furthest
    if let Some(mv) = moves
        .iter()
        .filter(|m| matches!(m, Move::Kill { .. }))
        .max_by_key(|m| m.landing())
    {
        return Some(*mv);
    }

    // Land on a rosette for another turn
    if let Some(mv) = moves.iter().find(|m| is_field_star(m.landing())) {
        return Some(*mv);
    }

    // Leave the combat track for the home stretch
    if let Some(mv) = moves
        .iter()
        .find(|m| is_in_combat_zone(m.from()) && m.landing() >= COMBAT)
    {
        return Some(*mv);
    }

    // Enter a new piece
    if let Some(mv) = moves.iter().find(|m| matches!(m, Move::New { .. })) {
        return Some(*mv);
    }

    // Advance the leading piece
    moves.iter().max_by_key(|m| m.from()).copied()
}

/// Position value for `color`: own progress minus the opponent's, with
/// pieces on the combat track discounted by their chance of being captured.
fn evaluate(game: &Game, color: TeamColor) -> f64 {
    team_value(game, color) - team_value(game, color.opposite())
}

fn team_value(game: &Game, color: TeamColor) -> f64 {
    let team = game.team(color);
    let enemy = game.team(color.opposite());

    let on_board: f64 = team
        .pieces
        .iter()
        .map(|field| {
            let progress = (*field + 1) as f64;
            progress * (1.0 - capture_risk(*field, &enemy.pieces))
        })
        .sum();

    team.pieces_safe as f64 * SAVED_WEIGHT + on_board
}

/// Chance that one of `attackers` can reach `field` on the next roll
fn capture_risk(field: Field, attackers: &[Field]) -> f64 {
    if !is_in_combat_zone(field) || field == CHOKE_POINT {
        return 0.0;
    }

    let reachable: Vec<u8> = (1..=MAX_ROLL)
        .filter(|roll| attackers.contains(&(field - *roll as Field)))
        .collect();
    reachable.into_iter().map(probability).sum::<f64>().min(1.0)
}
