//! Cell closure invariant: a cell is filled exactly when its sides are drawn.

use super::Invariant;
use crate::state::GameState;

/// Invariant: every cell is filled if and only if all three of its edges are
/// drawn, and every filled cell has an owner.
pub struct CellClosureInvariant;

impl Invariant<GameState> for CellClosureInvariant {
    fn holds(state: &GameState) -> bool {
        state.cells().all(|(id, cell)| {
            let closed = state.drawn_sides(id) == 3;
            cell.filled() == closed && cell.filled() == cell.owner().is_some()
        })
    }

    fn description() -> &'static str {
        "A cell is filled and owned exactly when its three edges are drawn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{BoardSize, Lattice};
    use crate::types::Seat;
    use std::sync::Arc;

    #[test]
    fn test_unscored_closed_cell_violates() {
        let lattice = Lattice::for_size(BoardSize::Small).expect("preset");
        let mut state = GameState::new(Arc::new(lattice), 3).expect("valid setup");
        assert!(CellClosureInvariant::holds(&state));

        let sides = *state.lattice().cell_edge_indices(0);
        for i in sides {
            state.edges[i].drawn = true;
            state.edges[i].owner = Some(Seat::ONE);
        }
        assert!(!CellClosureInvariant::holds(&state));
    }
}
