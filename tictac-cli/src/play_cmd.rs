//! Play command - human (X) against the computer (O)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - wire stdin/stdout to the game loop
//! - Level 2: play() - coin flip, turns, restart loop
//! - Level 3: human_turn(), computer_turn(), announce_result()
//! - Level 4: line reading

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{Phase, Player, SearchConfig, Session};

use crate::input::parse_cell;
use crate::screen::{Screen, RESTART_PROMPT};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug, Default)]
pub struct PlayArgs {
    /// Random seed for the coin flip and opening move
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search the empty board instead of opening in a random corner
    #[arg(long)]
    pub exhaustive: bool,

    /// Memoize solved positions
    #[arg(long)]
    pub cached: bool,

    /// No ANSI cursor movement or colours
    #[arg(long)]
    pub plain: bool,
}

impl PlayArgs {
    pub fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.exhaustive {
            config = config.exhaustive();
        }
        if self.cached {
            config = config.cached();
        }
        config
    }
}

/// Tally over every game played in one run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    pub games: usize,
    pub human_wins: usize,
    pub computer_wins: usize,
    pub draws: usize,
}

impl PlaySummary {
    /// Count a finished game; open phases are ignored
    fn record(&mut self, phase: Phase) {
        let tally = match phase {
            Phase::WonX => &mut self.human_wins,
            Phase::WonO => &mut self.computer_wins,
            Phase::Draw => &mut self.draws,
            Phase::AwaitingX | Phase::AwaitingO => return,
        };
        *tally += 1;
        self.games += 1;
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on the process terminal
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut screen = Screen::new(stdout.lock(), !args.plain);
    let session = Session::new(args.search_config());

    let summary = play(session, &mut stdin.lock(), &mut screen)?;
    tracing::info!(?summary, "finished");
    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Drive a session until the player quits or input runs out
pub fn play<R: BufRead, W: Write>(
    mut session: Session,
    input: &mut R,
    screen: &mut Screen<W>,
) -> Result<PlaySummary> {
    let mut summary = PlaySummary::default();

    screen.welcome()?;
    if read_line(input)?.is_none() {
        return Ok(summary);
    }

    loop {
        screen.clear()?;
        match session.first_player() {
            Player::O => screen.message("Heads. I go first!")?,
            Player::X => screen.message("Tails. you go first!")?,
        }
        screen.board(session.board())?;

        while let Some(side) = session.phase().to_move() {
            let finished = match side {
                Player::X => !human_turn(&mut session, input, screen)?,
                Player::O => {
                    computer_turn(&mut session, screen)?;
                    false
                }
            };
            if finished {
                // Input ended mid-game
                return Ok(summary);
            }
        }

        let phase = session.phase();
        summary.record(phase);
        announce_result(phase, screen)?;

        screen.status(RESTART_PROMPT)?;
        screen.line_prompt()?;
        match read_line(input)? {
            Some(option) if option.trim() == "1" => session.restart(),
            _ => break,
        }
    }

    Ok(summary)
}

// ============================================================================
// LEVEL 3 - TURNS
// ============================================================================

/// Prompt until a legal cell is entered. Returns false if input ran out.
fn human_turn<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    screen: &mut Screen<W>,
) -> Result<bool> {
    let cell = loop {
        screen.move_prompt()?;
        let Some(raw) = read_line(input)? else {
            return Ok(false);
        };
        match parse_cell(&raw, session.board()) {
            Ok(cell) => break cell,
            Err(error) => {
                tracing::debug!(%error, "rejected input");
                screen.input_error(&error)?;
            }
        }
    };

    screen.message(&format!("You chose cell {cell}"))?;
    session
        .play_human(cell)
        .with_context(|| format!("placing X at {cell}"))?;
    screen.board(session.board())?;
    Ok(true)
}

fn computer_turn<W: Write>(session: &mut Session, screen: &mut Screen<W>) -> Result<()> {
    let (cell, _) = session.play_computer().context("computer move")?;
    screen.message(&format!("I chose cell {cell}"))?;
    screen.board(session.board())?;
    Ok(())
}

fn announce_result<W: Write>(phase: Phase, screen: &mut Screen<W>) -> Result<()> {
    let text = match phase {
        Phase::WonX => "You won! Thanks for playing.",
        Phase::WonO => "You lost! Thanks for playing.",
        Phase::Draw => "A draw! Thanks for playing.",
        Phase::AwaitingX | Phase::AwaitingO => return Ok(()),
    };
    screen.message(text)?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Next line without its terminator, or None at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
