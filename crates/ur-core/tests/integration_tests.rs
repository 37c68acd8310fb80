//! Integration tests for the rules engine.
//!
//! These tests drive complete games through the public API and check the
//! piece invariants after every move.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ur_core::board::{Field, SAFE_END};
use ur_core::*;

/// Check that `mv` is on offer for `roll`, apply it, and return the events
fn play(game: &mut Game, roll: u8, mv: Option<Move>) -> Vec<GameEvent> {
    let moves = game.possible_moves(roll);
    match mv {
        Some(mv) => assert!(moves.contains(&mv), "{:?} not in {:?}", mv, moves),
        None => assert!(moves.is_empty(), "expected no moves, got {:?}", moves),
    }
    game.apply_move(mv).unwrap()
}

fn assert_board(game: &Game, to_move: TeamColor, white: &[Field], black: &[Field]) {
    assert_eq!(game.current_color(), to_move);
    assert_eq!(game.team(TeamColor::White).pieces, white.to_vec());
    assert_eq!(game.team(TeamColor::Black).pieces, black.to_vec());
}

fn assert_invariants(game: &Game) {
    for color in TeamColor::ALL {
        let team = game.team(color);
        assert_eq!(team.total(), u64::from(game.start_pieces()), "{} lost a piece", color);
        for (id, field) in team.pieces.iter().enumerate() {
            assert!((0..SAFE_END).contains(field), "{} piece on {}", color, field);
            assert!(
                !team.pieces[id + 1..].contains(field),
                "{} stacked on {}",
                color,
                field
            );
        }
    }
}

/// Play random legal moves with random rolls, checking invariants throughout
fn random_game(seed: u64, start_pieces: u32, max_turns: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(start_pieces);

    for _ in 0..max_turns {
        if game.is_over() {
            break;
        }
        let roll = dice::roll(&mut rng);
        let moves = game.possible_moves(roll);
        assert_eq!(moves, game.possible_moves(roll));

        let chosen = moves.choose(&mut rng).copied();
        game.apply_move(chosen).unwrap();
        assert_invariants(&game);
    }

    game
}

#[test]
fn test_scripted_single_piece_game() {
    use TeamColor::{Black, White};
    let mut game = Game::new(1);

    // White enters on 0, turn passes
    play(&mut game, 1, Some(Move::New { distance: 1 }));
    assert_board(&game, Black, &[0], &[]);
    assert_eq!(game.team(White).pieces_left, 0);

    // Black enters on the rosette at 3 and goes again
    let events = play(&mut game, 4, Some(Move::New { distance: 4 }));
    assert_board(&game, Black, &[0], &[3]);
    assert_eq!(
        events,
        vec![
            GameEvent::PieceEntered {
                team: Black,
                field: 3
            },
            GameEvent::ExtraTurn {
                team: Black,
                field: 3
            },
        ]
    );

    // Black steps onto the combat track
    play(
        &mut game,
        1,
        Some(Move::Advance {
            from: 3,
            distance: 1,
            piece: 0,
        }),
    );
    assert_board(&game, White, &[0], &[4]);

    // White captures on 4
    play(
        &mut game,
        4,
        Some(Move::Kill {
            from: 0,
            distance: 4,
            piece: 0,
            dying_piece: 0,
        }),
    );
    assert_board(&game, Black, &[4], &[]);
    assert_eq!(game.team(Black).pieces_left, 1);

    // Black throws zero and passes
    play(&mut game, 0, None);
    assert_board(&game, White, &[4], &[]);

    // White takes the central rosette, then moves on
    play(
        &mut game,
        3,
        Some(Move::Advance {
            from: 4,
            distance: 3,
            piece: 0,
        }),
    );
    assert_board(&game, White, &[7], &[]);
    play(
        &mut game,
        2,
        Some(Move::Advance {
            from: 7,
            distance: 2,
            piece: 0,
        }),
    );
    assert_board(&game, Black, &[9], &[]);

    // Black re-enters, chains two rosettes and captures on 9
    play(&mut game, 4, Some(Move::New { distance: 4 }));
    play(
        &mut game,
        4,
        Some(Move::Advance {
            from: 3,
            distance: 4,
            piece: 0,
        }),
    );
    assert_board(&game, Black, &[9], &[7]);
    play(
        &mut game,
        2,
        Some(Move::Kill {
            from: 7,
            distance: 2,
            piece: 0,
            dying_piece: 0,
        }),
    );
    assert_board(&game, White, &[], &[9]);

    // White answers the same way
    play(&mut game, 4, Some(Move::New { distance: 4 }));
    play(
        &mut game,
        4,
        Some(Move::Advance {
            from: 3,
            distance: 4,
            piece: 0,
        }),
    );
    play(
        &mut game,
        2,
        Some(Move::Kill {
            from: 7,
            distance: 2,
            piece: 0,
            dying_piece: 0,
        }),
    );
    assert_board(&game, Black, &[9], &[]);

    play(&mut game, 1, Some(Move::New { distance: 1 }));
    assert_board(&game, White, &[9], &[0]);

    // White reaches the home rosette, then overshoots
    play(
        &mut game,
        4,
        Some(Move::Advance {
            from: 9,
            distance: 4,
            piece: 0,
        }),
    );
    assert_board(&game, White, &[13], &[0]);
    play(&mut game, 2, None);
    assert_board(&game, Black, &[13], &[0]);

    play(
        &mut game,
        3,
        Some(Move::Advance {
            from: 0,
            distance: 3,
            piece: 0,
        }),
    );
    play(
        &mut game,
        4,
        Some(Move::Advance {
            from: 3,
            distance: 4,
            piece: 0,
        }),
    );
    play(
        &mut game,
        4,
        Some(Move::Advance {
            from: 7,
            distance: 4,
            piece: 0,
        }),
    );
    assert_board(&game, White, &[13], &[11]);

    // White saves its only piece and wins
    let events = play(
        &mut game,
        1,
        Some(Move::Save {
            from: 13,
            distance: 1,
            piece: 0,
        }),
    );
    assert_eq!(
        events,
        vec![
            GameEvent::PieceSaved {
                team: White,
                from: 13
            },
            GameEvent::GameWon { team: White },
            GameEvent::TurnPassed {
                from: White,
                to: Black
            },
        ]
    );
    assert_board(&game, Black, &[], &[11]);
    assert_eq!(game.team(White).pieces_safe, 1);
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(White));

    for roll in 0..=4 {
        assert!(game.possible_moves(roll).is_empty());
    }
}

#[test]
fn test_choke_point_blocks_both_move_kinds() {
    let teams = [
        Team {
            pieces_left: 5,
            pieces_safe: 0,
            pieces: vec![3, 6],
        },
        Team {
            pieces_left: 6,
            pieces_safe: 0,
            pieces: vec![7],
        },
    ];
    let game = Game::from_parts(7, TeamColor::White, teams).unwrap();

    assert!(game
        .possible_moves(4)
        .iter()
        .all(|m| m.landing() != 7));
    assert!(game
        .possible_moves(1)
        .iter()
        .all(|m| m.landing() != 7));
}

#[test]
fn test_moves_go_stale_after_a_capture() {
    let teams = [
        Team {
            pieces_left: 5,
            pieces_safe: 0,
            pieces: vec![5, 9],
        },
        Team {
            pieces_left: 5,
            pieces_safe: 0,
            pieces: vec![4, 8],
        },
    ];
    let mut game = Game::from_parts(7, TeamColor::Black, teams).unwrap();

    // Black's piece 0 captures White's piece 0, shifting White's ids
    let kill = Move::Kill {
        from: 4,
        distance: 1,
        piece: 0,
        dying_piece: 0,
    };
    let white_view_before: Vec<Move> = {
        let mut as_white = game.clone();
        as_white.apply_move(None).unwrap();
        as_white.possible_moves(1)
    };
    game.apply_move(Some(kill)).unwrap();
    assert_eq!(game.team(TeamColor::White).pieces, vec![9]);

    let stale = white_view_before
        .into_iter()
        .find(|m| m.piece() == Some(1))
        .unwrap();
    let before = game.clone();
    assert_eq!(
        game.apply_move(Some(stale)),
        Err(GameError::MoveInvalidated { piece: 1 })
    );
    assert_eq!(game, before);
}

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..40 {
        let game = random_game(seed, 7, 5_000);
        assert!(game.is_over(), "seed {} did not finish", seed);
    }
}

#[test]
fn test_bot_matches_finish() {
    let difficulties = [
        BotDifficulty::Easy,
        BotDifficulty::Medium,
        BotDifficulty::Hard,
    ];

    for (i, white) in difficulties.iter().enumerate() {
        for (j, black) in difficulties.iter().enumerate() {
            let seed = (i * 3 + j) as u64;
            let mut rng = StdRng::seed_from_u64(seed);
            let mut bots = [
                Bot::with_seed(TeamColor::White, *white, seed),
                Bot::with_seed(TeamColor::Black, *black, seed + 100),
            ];
            let mut game = Game::new(7);

            let mut turns = 0;
            while !game.is_over() && turns < 10_000 {
                let roll = dice::roll(&mut rng);
                let bot = &mut bots[game.current_color().index()];
                let mv = bot.choose_move(&game, roll);
                game.apply_move(mv).unwrap();
                assert_invariants(&game);
                turns += 1;
            }

            assert!(game.is_over(), "{:?} vs {:?} did not finish", white, black);
        }
    }
}

#[test]
fn test_save_and_load_mid_game() {
    let game = random_game(11, 7, 60);
    let json = game.to_json().unwrap();
    let restored = Game::from_json(&json).unwrap();
    assert_eq!(restored, game);
    for roll in 0..=4 {
        assert_eq!(restored.possible_moves(roll), game.possible_moves(roll));
    }
}

proptest! {
    #[test]
    fn prop_random_play_preserves_invariants(seed in any::<u64>(), start in 1u32..=7) {
        let game = random_game(seed, start, 400);
        for color in TeamColor::ALL {
            prop_assert_eq!(game.team(color).total(), u64::from(start));
        }
    }

    #[test]
    fn prop_zero_roll_never_moves(seed in any::<u64>()) {
        let game = random_game(seed, 7, 50);
        prop_assert!(game.possible_moves(0).is_empty());
    }
}
