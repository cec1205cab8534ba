//! Static positional evaluation used at the search horizon.

use crate::state::GameState;
use crate::types::Seat;

/// Weight of one completed cell.
pub const FILLED_WEIGHT: i32 = 100;

/// Weight of one cell that is a single edge away from completion.
pub const SETUP_WEIGHT: i32 = 10;

/// Scores `state` from `computer`'s point of view (positive is good for it).
///
/// `100 × (computer cells − opponent cells) + 10 × (computer setups −
/// opponent setups)`. A setup is an unfilled cell with exactly two drawn
/// sides, credited to the seat that owns both of them; a one-each split
/// credits nobody.
pub fn evaluate(state: &GameState, computer: Seat) -> i32 {
    let opponent = computer.other();
    let mut filled_diff = 0;
    let mut setup_diff = 0;

    for (id, cell) in state.cells() {
        if cell.filled() {
            if cell.owner() == Some(computer) {
                filled_diff += 1;
            } else {
                filled_diff -= 1;
            }
            continue;
        }

        let sides = state.lattice().cell_edge_indices(id.0);
        let drawn: Vec<_> = sides
            .iter()
            .map(|&i| &state.edges[i])
            .filter(|edge| edge.drawn())
            .collect();
        if drawn.len() != 2 {
            continue;
        }
        let mine = drawn.iter().filter(|e| e.owner() == Some(computer)).count();
        let theirs = drawn.iter().filter(|e| e.owner() == Some(opponent)).count();
        match mine.cmp(&theirs) {
            std::cmp::Ordering::Greater => setup_diff += 1,
            std::cmp::Ordering::Less => setup_diff -= 1,
            std::cmp::Ordering::Equal => {}
        }
    }

    FILLED_WEIGHT * filled_diff + SETUP_WEIGHT * setup_diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{BoardSize, Lattice};
    use crate::rules::{apply_in_place, resolve};
    use crate::types::Point;
    use std::sync::Arc;

    fn play(state: &mut GameState, a: (usize, usize), b: (usize, usize), seat: Seat) {
        let mv = resolve(state, Point::new(a.0, a.1), Point::new(b.0, b.1)).expect("legal");
        apply_in_place(state, &mv, seat).expect("applies");
    }

    fn small() -> GameState {
        let lattice = Lattice::for_size(BoardSize::Small).expect("preset");
        GameState::new(Arc::new(lattice), 3).expect("valid setup")
    }

    #[test]
    fn test_empty_board_is_neutral() {
        assert_eq!(evaluate(&small(), Seat::TWO), 0);
    }

    #[test]
    fn test_split_setup_credits_nobody() {
        let mut state = small();
        play(&mut state, (2, 0), (2, 3), Seat::ONE);
        play(&mut state, (0, 1), (3, 0), Seat::TWO);
        // Cell (1,1),(2,1),(2,2) has one side from each seat; cell
        // (2,0),(2,1),(3,0) likewise.
        assert_eq!(evaluate(&state, Seat::TWO), 0);
    }

    #[test]
    fn test_own_setup_scores_ten() {
        let mut state = small();
        play(&mut state, (2, 0), (2, 3), Seat::TWO);
        play(&mut state, (0, 1), (3, 0), Seat::TWO);
        // Two cells now have two computer-owned sides.
        assert_eq!(evaluate(&state, Seat::TWO), 2 * SETUP_WEIGHT);
        assert_eq!(evaluate(&state, Seat::ONE), -2 * SETUP_WEIGHT);
    }

    #[test]
    fn test_completed_cell_dominates() {
        let mut state = small();
        play(&mut state, (2, 0), (2, 3), Seat::ONE);
        play(&mut state, (0, 1), (3, 0), Seat::TWO);
        play(&mut state, (0, 0), (3, 2), Seat::TWO);
        assert_eq!(state.score(Seat::TWO), 1);
        assert!(evaluate(&state, Seat::TWO) >= FILLED_WEIGHT - 4 * SETUP_WEIGHT);
    }
}
