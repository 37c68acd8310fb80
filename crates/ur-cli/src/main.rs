//! Headless match runner for the race game engine.

use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod runner;

use config::MatchConfig;
use runner::{Match, RunnerError, Tally};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MatchConfig::from_env()?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    info!(
        start_pieces = config.start_pieces,
        games = config.games,
        seed,
        white = ?config.white,
        black = ?config.black,
        "Starting matches..."
    );

    let mut tally = Tally::default();

    for game in 0..config.games {
        let mut m = Match::new(
            config.start_pieces,
            config.white,
            config.black,
            seed.wrapping_add(game as u64),
        )?;

        match m.play_to_end(config.max_turns) {
            Ok(outcome) => {
                tally.record(&outcome);
                if config.dump_state {
                    println!("{}", serde_json::to_string(&outcome)?);
                    println!("{}", m.game.to_json()?);
                }
            }
            Err(RunnerError::TurnLimit(turns)) => {
                warn!(game, turns, "match abandoned");
                tally.abandoned += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        white_wins = tally.white_wins,
        black_wins = tally.black_wins,
        abandoned = tally.abandoned,
        average_turns = tally.average_turns(),
        "All matches finished"
    );

    Ok(())
}
