//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, parse_command};

use anyhow::Result;
use trilines_engine::{Point, TurnController};

/// What a player wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Draw the line between two points.
    Play(Point, Point),
    /// Give up the turn.
    Pass,
    /// Leave the game.
    Quit,
}

/// A seat driven from outside the turn controller.
pub trait Player {
    /// Picks an action for the seat to move.
    fn choose(&mut self, game: &TurnController) -> Result<Choice>;

    /// Display name.
    fn name(&self) -> &str;

    /// Whether the session should show a thinking pause before this player.
    fn is_computer(&self) -> bool {
        false
    }
}
