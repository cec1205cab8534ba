//! Alternating turn invariant: seat 1, seat 2, seat 1, ... regardless of score.

use super::Invariant;
use crate::controller::TurnController;
use crate::phases::Phase;
use crate::types::Seat;

/// Invariant: seats alternate turns, starting with seat 1.
///
/// Scoring a cell never grants an extra turn, and passing counts as a turn.
pub struct AlternatingTurnInvariant;

impl Invariant<TurnController> for AlternatingTurnInvariant {
    fn holds(game: &TurnController) -> bool {
        let history = game.history();

        if history.first().is_some_and(|turn| turn.seat != Seat::ONE) {
            return false;
        }
        if history.windows(2).any(|pair| pair[0].seat == pair[1].seat) {
            return false;
        }

        let expected_next = history.last().map_or(Seat::ONE, |turn| turn.seat.other());
        match game.phase() {
            Phase::AwaitingMove(seat) => seat == expected_next && game.state().current_seat() == expected_next,
            Phase::Finished => true,
        }
    }

    fn description() -> &'static str {
        "Seats alternate turns (1, 2, 1, 2, ...)"
    }
}
