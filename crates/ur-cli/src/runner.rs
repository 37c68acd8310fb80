//! Bot-versus-bot match runner.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use ur_core::{dice, Bot, BotDifficulty, Game, GameError, GameEvent, TeamColor};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Match abandoned after {0} turns")]
    TurnLimit(u32),

    #[error("Engine rejected a bot move: {0}")]
    Engine(#[from] GameError),
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub winner: TeamColor,
    pub turns: u32,
    pub captures: u32,
    pub extra_turns: u32,
}

/// A game between two bots with its own dice.
pub struct Match {
    pub game: Game,
    bots: [Bot; 2],
    dice: StdRng,
    pub turns: u32,
    captures: u32,
    extra_turns: u32,
}

impl Match {
    pub fn new(
        start_pieces: u32,
        white: BotDifficulty,
        black: BotDifficulty,
        seed: u64,
    ) -> Result<Self, RunnerError> {
        Ok(Self {
            game: Game::try_new(start_pieces)?,
            bots: [
                Bot::with_seed(TeamColor::White, white, seed.wrapping_add(1)),
                Bot::with_seed(TeamColor::Black, black, seed.wrapping_add(2)),
            ],
            dice: StdRng::seed_from_u64(seed),
            turns: 0,
            captures: 0,
            extra_turns: 0,
        })
    }

    /// Roll for the team to move, let its bot choose, and apply the choice
    pub fn play_turn(&mut self) -> Result<Vec<GameEvent>, RunnerError> {
        let color = self.game.current_color();
        let roll = dice::roll(&mut self.dice);
        let mv = self.bots[color.index()].choose_move(&self.game, roll);

        debug!(turn = self.turns, team = %color, roll, ?mv, "turn");

        let events = self.game.apply_move(mv)?;
        self.turns += 1;

        for event in &events {
            match event {
                GameEvent::PieceCaptured { .. } => self.captures += 1,
                GameEvent::ExtraTurn { .. } => self.extra_turns += 1,
                _ => {}
            }
        }

        Ok(events)
    }

    /// Play until a team wins or `max_turns` is reached
    pub fn play_to_end(&mut self, max_turns: u32) -> Result<MatchOutcome, RunnerError> {
        loop {
            if let Some(winner) = self.game.winner() {
                info!(
                    winner = %winner,
                    turns = self.turns,
                    captures = self.captures,
                    "match finished"
                );
                return Ok(MatchOutcome {
                    winner,
                    turns: self.turns,
                    captures: self.captures,
                    extra_turns: self.extra_turns,
                });
            }

            if self.turns >= max_turns {
                return Err(RunnerError::TurnLimit(self.turns));
            }

            self.play_turn()?;
        }
    }
}

/// Running totals over several matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub white_wins: u32,
    pub black_wins: u32,
    pub abandoned: u32,
    pub total_turns: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: &MatchOutcome) {
        match outcome.winner {
            TeamColor::White => self.white_wins += 1,
            TeamColor::Black => self.black_wins += 1,
        }
        self.total_turns += outcome.turns as u64;
    }

    pub fn finished(&self) -> u32 {
        self.white_wins + self.black_wins
    }

    /// Mean turns per finished match
    pub fn average_turns(&self) -> f64 {
        match self.finished() {
            0 => 0.0,
            n => self.total_turns as f64 / n as f64,
        }
    }
}
