//! Live game between the human (X) and the computer (O)
//!
//! The session owns the board and the turn state machine:
//!
//! ```text
//! AwaitingX <-> AwaitingO     (coin flip picks the starting side)
//!     |             |
//!     +-> WonX / WonO / Draw  (absorbing until restart)
//! ```

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::MinimaxAI;
use crate::board::{Cell, Player};
use crate::config::SearchConfig;
use crate::game::{GameError, GameState, Move, Outcome};

/// Turn state of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingX,
    AwaitingO,
    WonX,
    WonO,
    Draw,
}

impl Phase {
    /// Phase in which `player` is to move
    pub fn awaiting(player: Player) -> Self {
        match player {
            Player::X => Phase::AwaitingX,
            Player::O => Phase::AwaitingO,
        }
    }

    /// Phase after a placement; `next` moves if the game goes on
    pub fn from_outcome(outcome: Outcome, next: Player) -> Self {
        match outcome {
            Outcome::Open => Phase::awaiting(next),
            Outcome::WinFor(Player::X) => Phase::WonX,
            Outcome::WinFor(Player::O) => Phase::WonO,
            Outcome::Draw => Phase::Draw,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::WonX | Phase::WonO | Phase::Draw)
    }

    pub fn to_move(self) -> Option<Player> {
        match self {
            Phase::AwaitingX => Some(Player::X),
            Phase::AwaitingO => Some(Player::O),
            Phase::WonX | Phase::WonO | Phase::Draw => None,
        }
    }
}

/// One game, restartable
pub struct Session {
    state: GameState,
    phase: Phase,
    first: Player,
    history: Vec<Move>,
    ai: MinimaxAI,
    rng: ChaCha8Rng,
}

impl Session {
    /// Start a game, flipping a coin for the first move
    pub fn new(config: SearchConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        // Keep the opponent's stream apart from the coin's
        let ai_config = SearchConfig {
            seed: Some(rng.gen()),
            ..config
        };
        let first = flip(&mut rng);
        tracing::info!(first = %first, "coin flip");

        Self {
            state: GameState::new(),
            phase: Phase::awaiting(first),
            first,
            history: Vec::new(),
            ai: MinimaxAI::new(ai_config),
            rng,
        }
    }

    /// Start a game with a fixed first player (no coin flip)
    pub fn with_first(config: SearchConfig, first: Player) -> Self {
        let mut session = Self::new(config);
        session.first = first;
        session.phase = Phase::awaiting(first);
        session
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn board(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// Side that won the coin flip
    pub fn first_player(&self) -> Player {
        self.first
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    /// Place the human's mark
    pub fn play_human(&mut self, cell: Cell) -> Result<Phase, GameError> {
        self.expect_turn(Player::HUMAN)?;
        self.state.place(cell, Player::HUMAN)?;
        Ok(self.advance(Move::new(Player::HUMAN, cell)))
    }

    /// Let the computer search and play its move
    pub fn play_computer(&mut self) -> Result<(Cell, Phase), GameError> {
        self.expect_turn(Player::COMPUTER)?;
        let result = self
            .ai
            .choose_move(&self.state, Player::COMPUTER)
            .ok_or(GameError::GameOver(self.phase))?;
        self.state.place(result.cell, Player::COMPUTER)?;
        tracing::debug!(cell = %result.cell, score = result.score, "computer move");
        Ok((result.cell, self.advance(Move::new(Player::COMPUTER, result.cell))))
    }

    /// Clear the board and flip again
    pub fn restart(&mut self) {
        self.state.clear();
        self.history.clear();
        self.first = flip(&mut self.rng);
        self.phase = Phase::awaiting(self.first);
        tracing::info!(first = %self.first, "restart");
    }

    fn expect_turn(&self, player: Player) -> Result<(), GameError> {
        match self.phase.to_move() {
            None => Err(GameError::GameOver(self.phase)),
            Some(side) if side != player => Err(GameError::NotYourTurn(side)),
            Some(_) => Ok(()),
        }
    }

    fn advance(&mut self, mv: Move) -> Phase {
        self.history.push(mv);
        self.phase = Phase::from_outcome(self.state.outcome(), mv.player.opponent());
        if self.phase.is_terminal() {
            tracing::info!(phase = ?self.phase, moves = self.history.len(), "game over");
        }
        self.phase
    }
}

fn flip(rng: &mut ChaCha8Rng) -> Player {
    if rng.gen::<bool>() {
        Player::O
    } else {
        Player::X
    }
}
