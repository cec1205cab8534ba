//! End-of-game detection.

use tracing::instrument;

use super::resolve::legal_chains;
use crate::phases::Outcome;
use crate::state::GameState;
use crate::types::Seat;

/// Whether no legal move remains for anyone.
///
/// Legality does not depend on the seat, so a blocked state is blocked for
/// both players.
#[instrument(skip(state))]
pub fn is_blocked(state: &GameState) -> bool {
    legal_chains(state).next().is_none()
}

/// Whether the game is over: every cell filled, or no move can be made.
#[instrument(skip(state))]
pub fn is_terminal(state: &GameState) -> bool {
    state.is_complete() || is_blocked(state)
}

/// Result by score, ignoring whether the game is actually over.
#[instrument(skip(state))]
pub fn outcome(state: &GameState) -> Outcome {
    let (one, two) = state.scores();
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => Outcome::Winner(Seat::ONE),
        std::cmp::Ordering::Less => Outcome::Winner(Seat::TWO),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}
