//! Shared owner invariant: the overlay is written once, by the other seat.

use super::Invariant;
use crate::state::GameState;

/// Invariant: a shared owner only exists on a drawn, owned edge and differs
/// from the owner.
pub struct SharedOwnerInvariant;

impl Invariant<GameState> for SharedOwnerInvariant {
    fn holds(state: &GameState) -> bool {
        state.edges().all(|(_, edge)| match edge.shared_owner() {
            None => edge.drawn() == edge.owner().is_some(),
            Some(shared) => edge.drawn() && edge.owner().is_some_and(|owner| owner != shared),
        })
    }

    fn description() -> &'static str {
        "Shared owner is set only on drawn edges and differs from the owner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{BoardSize, Lattice};
    use crate::types::Seat;
    use std::sync::Arc;

    fn small() -> GameState {
        let lattice = Lattice::for_size(BoardSize::Small).expect("preset");
        GameState::new(Arc::new(lattice), 3).expect("valid setup")
    }

    #[test]
    fn test_fresh_board_holds() {
        assert!(SharedOwnerInvariant::holds(&small()));
    }

    #[test]
    fn test_shared_on_undrawn_edge_violates() {
        let mut state = small();
        state.edges[3].shared_owner = Some(Seat::ONE);
        assert!(!SharedOwnerInvariant::holds(&state));
    }

    #[test]
    fn test_shared_equal_to_owner_violates() {
        let mut state = small();
        let edge = &mut state.edges[3];
        edge.drawn = true;
        edge.owner = Some(Seat::ONE);
        edge.shared_owner = Some(Seat::ONE);
        assert!(!SharedOwnerInvariant::holds(&state));
    }
}
