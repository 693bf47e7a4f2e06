//! Integration tests for the TICTAC engine
//!
//! Tests the full stack: core game logic, minimax search, the memoized
//! solver, sessions, and the interactive loop driven through in-memory I/O.

use std::collections::HashSet;
use std::io::Cursor;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tictac_cli::{play, play_games, Opponent, PlaySummary, Screen, SelfplayArgs};
use tictac_core::{
    best_move, score_moves, Cell, GameError, GameState, Mark, MinimaxAI, Outcome, Phase, Player,
    SearchConfig, Session, Solver,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn cell(i: u8) -> Cell {
    Cell::new(i).unwrap()
}

fn board(s: &str) -> GameState {
    s.parse().unwrap()
}

/// Plain negamax with no tie-break, used as an independent reference
fn reference_value(state: &GameState, side: Player) -> i32 {
    let empty: Vec<Cell> = Cell::ALL
        .into_iter()
        .filter(|&c| state.get(c) == Mark::Empty)
        .collect();
    let remaining = empty.len() as i32;
    if state.has_won(Player::O) {
        return remaining + 1;
    }
    if state.has_won(Player::X) {
        return -(remaining + 1);
    }
    if empty.is_empty() {
        return 0;
    }

    let values = empty.into_iter().map(|c| {
        let mut child = state.clone();
        child.place(c, side).unwrap();
        reference_value(&child, side.opponent())
    });
    match side {
        Player::O => values.max().unwrap(),
        Player::X => values.min().unwrap(),
    }
}

/// Every open position reachable from the empty board with at least three
/// marks, with its side to move
fn reachable_positions() -> Vec<(GameState, Player)> {
    fn walk(state: &GameState, side: Player, seen: &mut HashSet<(GameState, Player)>) {
        if state.is_terminal() || !seen.insert((state.clone(), side)) {
            return;
        }
        for c in state.empty_cells() {
            let mut child = state.clone();
            child.place(c, side).unwrap();
            walk(&child, side.opponent(), seen);
        }
    }

    let mut seen = HashSet::new();
    for first in [Player::X, Player::O] {
        for a in Cell::ALL {
            for b in Cell::ALL {
                if a == b {
                    continue;
                }
                let mut state = GameState::new();
                state.place(a, first).unwrap();
                state.place(b, first.opponent()).unwrap();
                for c in state.empty_cells() {
                    let mut deeper = state.clone();
                    deeper.place(c, first).unwrap();
                    walk(&deeper, first.opponent(), &mut seen);
                }
            }
        }
    }
    seen.into_iter().collect()
}

/// Cells the human would type, playing the lowest open cell each turn
fn lowest_cell_script(seed: u64, first: Player) -> Vec<Cell> {
    let mut shadow = Session::with_first(SearchConfig::default().with_seed(seed), first);
    let mut cells = Vec::new();
    while let Some(side) = shadow.phase().to_move() {
        match side {
            Player::X => {
                let c = shadow.board().empty_cells()[0];
                cells.push(c);
                shadow.play_human(c).unwrap();
            }
            Player::O => {
                shadow.play_computer().unwrap();
            }
        }
    }
    cells
}

fn run_play(seed: u64, first: Player, script: &str) -> (PlaySummary, String) {
    let session = Session::with_first(SearchConfig::default().with_seed(seed), first);
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut screen = Screen::new(Vec::new(), false);
    let summary = play(session, &mut input, &mut screen).unwrap();
    (summary, String::from_utf8(screen.into_inner()).unwrap())
}

// ============================================================================
// GAME STATE TESTS
// ============================================================================

#[test]
fn test_place_then_occupied() {
    let mut game = GameState::new();
    assert_eq!(game.place(cell(4), Player::X), Ok(()));
    assert_eq!(game.place(cell(4), Player::O), Err(GameError::CellOccupied(cell(4))));
    assert_eq!(game.get(cell(4)), Mark::X);
}

#[test]
fn test_empty_cells_plus_occupied_is_nine() {
    for (state, _) in reachable_positions().iter().take(500) {
        assert_eq!(state.empty_cells().len() + state.occupied_count(), 9);
    }
}

#[test]
fn test_invalid_index_rejected_before_core() {
    assert_eq!(Cell::try_from(9i64), Err(GameError::InvalidIndex(9)));
    assert_eq!(Cell::try_from(-3i64), Err(GameError::InvalidIndex(-3)));
}

// ============================================================================
// SEARCH TESTS
// ============================================================================

#[test]
fn test_x_completes_row() {
    let game = board("XX OO    ");
    let result = best_move(&game, Player::X).unwrap();
    assert_eq!(result.cell, cell(2));
    let scores = score_moves(&game, Player::X);
    let min = scores.iter().map(|r| r.score).min().unwrap();
    assert_eq!(result.score, min);
    let block = scores.iter().find(|r| r.cell == cell(5)).unwrap();
    assert!(block.score > result.score);
}

#[test]
fn test_o_blocks_every_forced_line() {
    // O in the corner, X in the centre, X to move
    let game = board("O   X    ");
    let mut solver = Solver::new();
    for reply in game.empty_cells() {
        let mut after_x = game.clone();
        after_x.place(reply, Player::X).unwrap();
        if after_x.is_terminal() {
            continue;
        }
        let o_move = best_move(&after_x, Player::O).unwrap();
        let mut after_o = after_x.clone();
        after_o.place(o_move.cell, Player::O).unwrap();
        // X cannot force a win after O's answer
        assert!(solver.value(&after_o, Player::X) >= 0, "X reply {reply}");
    }
}

#[test]
fn test_empty_board_o_draws_at_least() {
    let result = best_move(&GameState::new(), Player::O).unwrap();
    assert_eq!(result.score, 0);
    assert!(result.cell.is_corner());
}

#[test]
fn test_search_matches_reference() {
    let mut solver = Solver::new();
    let positions = reachable_positions();
    assert!(positions.len() > 1000);

    for (state, side) in &positions {
        let result = best_move(state, *side).unwrap();
        let expected = reference_value(state, *side);
        assert_eq!(result.score, expected, "{state:?} {side}");

        // The chosen cell actually achieves the score
        let mut child = state.clone();
        child.place(result.cell, *side).unwrap();
        assert_eq!(reference_value(&child, side.opponent()), expected);

        // Memoized solver agrees, cell included
        assert_eq!(solver.best_move(state, *side), Some(result));
    }
}

#[test]
fn test_search_deterministic() {
    for s in ["O   X    ", "X   O   X", "XO  X  O "] {
        let game = board(s);
        for side in [Player::X, Player::O] {
            assert_eq!(best_move(&game, side), best_move(&game, side));
        }
    }
}

// ============================================================================
// FULL GAME TESTS
// ============================================================================

#[test]
fn test_optimal_play_always_draws() {
    for config in [
        SearchConfig::default().with_seed(1).exhaustive(),
        SearchConfig::default().with_seed(2).cached(),
    ] {
        let mut ai = MinimaxAI::new(config);
        for first in [Player::X, Player::O] {
            let (final_state, history) = ai.play_game(GameState::new(), first);
            assert_eq!(final_state.outcome(), Outcome::Draw);
            assert_eq!(history.len(), 9);
        }
    }
}

#[test]
fn test_computer_never_loses_to_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for game in 0..40 {
        let mut session = Session::new(SearchConfig::default().with_seed(game).cached());
        while let Some(side) = session.phase().to_move() {
            match side {
                Player::X => {
                    let empty = session.board().empty_cells();
                    let c = *empty.choose(&mut rng).unwrap();
                    session.play_human(c).unwrap();
                }
                Player::O => {
                    session.play_computer().unwrap();
                }
            }
        }
        assert_ne!(session.phase(), Phase::WonX, "game {game}");
        assert!(session.outcome().is_terminal());
    }
}

#[test]
fn test_selfplay_command_results() {
    let results = play_games(&SelfplayArgs {
        games: 6,
        seed: Some(5),
        ..Default::default()
    });
    assert_eq!(results.draws, 6);

    let results = play_games(&SelfplayArgs {
        games: 10,
        opponent: Opponent::Random,
        seed: Some(5),
        ..Default::default()
    });
    assert_eq!(results.x_wins, 0);
}

// ============================================================================
// INTERACTIVE LOOP TESTS
// ============================================================================

#[test]
fn test_scripted_game_to_the_end() {
    let cells = lowest_cell_script(21, Player::X);
    let mut script = String::from("\n");
    for c in &cells {
        script.push_str(&format!("{c}\n"));
    }
    script.push_str("q\n");

    let (summary, out) = run_play(21, Player::X, &script);
    assert_eq!(summary.games, 1);
    assert_eq!(summary.human_wins, 0);
    assert!(out.contains("Tails. you go first!"));
    assert!(out.contains("Thanks for playing."));
    assert!(out.contains("Press [1] to continue game."));
}

#[test]
fn test_restart_flips_again() {
    let cells = lowest_cell_script(8, Player::O);
    let mut script = String::from("\n");
    for c in &cells {
        script.push_str(&format!("{c}\n"));
    }
    // Restart, then input runs out during the second game
    script.push_str("1\n");

    let (summary, out) = run_play(8, Player::O, &script);
    assert_eq!(summary.games, 1);
    assert!(out.contains("Heads. I go first!"));
    assert_eq!(out.matches("go first!").count(), 2);
}

#[test]
fn test_bad_input_then_recovery() {
    let (summary, out) = run_play(4, Player::X, "\nx\n-1\n9\n0\n0\n");
    assert_eq!(summary.games, 0);
    assert!(out.contains("'x' is not an Integer!"));
    assert!(out.contains("'-1' is not in range 0-8!"));
    assert!(out.contains("'9' is not in range 0-8!"));
    assert!(out.contains("You chose cell 0"));
    assert!(out.contains("'0' is occupied!"));
}
