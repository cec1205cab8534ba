//! Turn phases and game outcomes.

use serde::{Deserialize, Serialize};

use crate::types::Seat;

/// Where the turn controller stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `seat` to move.
    AwaitingMove(Seat),
    /// No further moves are accepted.
    Finished,
}

impl Phase {
    /// The seat to move, if the game is still running.
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Phase::AwaitingMove(seat) => Some(*seat),
            Phase::Finished => None,
        }
    }

    /// Whether the game has finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished)
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The seat with more cells won.
    Winner(Seat),
    /// Both seats hold the same number of cells.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Winner(seat) => Some(*seat),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(seat) => write!(f, "{} wins", seat),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
