//! Terminal rendering
//!
//! Fixed rows are addressed with ANSI cursor codes so the board stays put
//! between turns. With ANSI off every call just appends lines, which is what
//! pipes and tests want.

use std::io::{self, Write};

use tictac_core::GameState;

use crate::input::InputError;

const BOARD_ROW: u16 = 14;
const INPUT_ROW: u16 = 20;
const INFO_ROW: u16 = 22;
const STATUS_ROW: u16 = 24;

const CYAN: &str = "\x1b[0;96m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

pub const MOVE_PROMPT: &str = "> Next move for X (state a valid cell num): ";
pub const RESTART_PROMPT: &str = "Press [1] to continue game. Press anything else to end.";

/// Output side of the game loop
pub struct Screen<W: Write> {
    out: W,
    ansi: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self { out, ansi }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.ansi {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        self.clear()?;
        writeln!(self.out, "Welcome to Tic-Tac-Toe!\n")?;
        writeln!(self.out, "You play X and the computer plays O.\n")?;
        let (on, off) = self.colors(CYAN);
        writeln!(
            self.out,
            "{on}I've become sentient...\nI, as the computer, will now play strategically!{off}\n"
        )?;
        writeln!(self.out, "Let's determine who goes first! I call heads.\n")?;
        write!(self.out, "Press [Enter] to flip a coin ...")?;
        self.out.flush()
    }

    /// Info line (move reports, results)
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        self.erase_row(INFO_ROW)?;
        writeln!(self.out, "{text}")
    }

    /// Status line (restart prompt)
    pub fn status(&mut self, text: &str) -> io::Result<()> {
        self.erase_row(STATUS_ROW)?;
        writeln!(self.out, "{text}")
    }

    pub fn board(&mut self, board: &GameState) -> io::Result<()> {
        self.set_cursor(BOARD_ROW)?;
        writeln!(self.out, "{board}")
    }

    pub fn move_prompt(&mut self) -> io::Result<()> {
        self.erase_row(INPUT_ROW)?;
        write!(self.out, "{MOVE_PROMPT}")?;
        self.out.flush()
    }

    pub fn line_prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    pub fn input_error(&mut self, error: &InputError) -> io::Result<()> {
        self.set_cursor(INFO_ROW)?;
        let (on, off) = self.colors(RED);
        writeln!(self.out, "{on} {error}{off}")
    }

    fn colors(&self, color: &'static str) -> (&'static str, &'static str) {
        if self.ansi {
            (color, RESET)
        } else {
            ("", "")
        }
    }

    fn set_cursor(&mut self, row: u16) -> io::Result<()> {
        if self.ansi {
            write!(self.out, "\x1b[{row};0H")?;
        }
        Ok(())
    }

    fn erase_row(&mut self, row: u16) -> io::Result<()> {
        if self.ansi {
            write!(self.out, "\x1b[{row};0H\x1b[2K")?;
        }
        Ok(())
    }
}
