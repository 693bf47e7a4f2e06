//! TICTAC CLI - terminal front end for the tic-tac-toe engine
//!
//! The game loop reads from any `BufRead` and renders to any `Write`, so the
//! whole interactive flow can be driven from tests.

pub mod input;
pub mod screen;
pub mod play_cmd;
pub mod selfplay_cmd;
pub mod analyze_cmd;

pub use input::{parse_cell, InputError};
pub use screen::Screen;
pub use play_cmd::{play, PlayArgs, PlaySummary};
pub use selfplay_cmd::{play_games, Opponent, SelfplayArgs, SelfplayResults};
pub use analyze_cmd::{analyze, AnalyzeArgs, Analysis, Side};
