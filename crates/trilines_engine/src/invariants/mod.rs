//! First-class invariants for the line game.
//!
//! Invariants are logical properties that must hold after every committed
//! move. The turn controller checks them in debug builds and the tests
//! exercise each one on its own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(failed: impl IntoIterator<Item = Option<&'static str>>) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = failed.into_iter().flatten().map(InvariantViolation::new).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check<S, I: Invariant<S>>(state: &S) -> Option<&'static str> {
    (!I::holds(state)).then(I::description)
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect([check::<S, I1>(state), check::<S, I2>(state), check::<S, I3>(state)])
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect([check::<S, I1>(state), check::<S, I2>(state)])
    }
}

pub mod alternating_turn;
pub mod cell_closure;
pub mod score_tally;
pub mod shared_owner;

pub use alternating_turn::AlternatingTurnInvariant;
pub use cell_closure::CellClosureInvariant;
pub use score_tally::ScoreTallyInvariant;
pub use shared_owner::SharedOwnerInvariant;

/// All board-state invariants as a composable set.
pub type BoardInvariants = (SharedOwnerInvariant, CellClosureInvariant, ScoreTallyInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{BoardSize, Lattice};
    use crate::rules::{apply_in_place, legal_moves};
    use crate::state::GameState;
    use crate::types::Seat;
    use std::sync::Arc;

    fn small() -> GameState {
        let lattice = Lattice::for_size(BoardSize::Small).expect("preset");
        GameState::new(Arc::new(lattice), 2).expect("valid setup")
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(BoardInvariants::check_all(&small()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_game() {
        let mut state = small();
        let mut seat = Seat::ONE;
        while let Some(mv) = legal_moves(&state).pop() {
            apply_in_place(&mut state, &mv, seat).expect("applies");
            assert!(BoardInvariants::check_all(&state).is_ok());
            seat = seat.other();
        }
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = small();
        state.cells[0].filled = true;
        state.edges[0].shared_owner = Some(Seat::TWO);
        let violations = BoardInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].description, SharedOwnerInvariant::description());
    }
}
