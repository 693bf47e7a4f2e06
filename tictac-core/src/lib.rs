//! TICTAC Core - Game engine and AI
//!
//! This crate provides the core game logic for tic-tac-toe:
//! - Board geometry (cells, marks, win lines)
//! - Game state with win/draw detection
//! - Terminal scoring with a depth bonus
//! - Exhaustive minimax search and a memoized solver
//! - The human-vs-computer session state machine

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod solver;
pub mod config;
pub mod session;

// Re-exports for convenient access
pub use board::{Cell, Mark, Player, BOARD_CELLS, CORNERS, WIN_LINES};
pub use game::{GameError, GameState, Move, Outcome};
pub use eval::{describe_score, terminal_score, MAX_SCORE, MIN_SCORE};
pub use ai::{best_move, best_move_with_stats, score_moves, MinimaxAI, SearchResult, SearchStats};
pub use solver::Solver;
pub use config::SearchConfig;
pub use session::{Phase, Session};
