//! Move resolution: turns a pair of points into a legal chain of unit edges.
//!
//! The geometric checks ([`trace`]) depend only on the lattice, so they run
//! once per game over every point pair to build the candidate chains. The
//! "new ground" check runs against live edge state. Interactive play and
//! search both go through these two functions.

use tracing::{debug, instrument};

use crate::action::{Move, MoveRejection};
use crate::lattice::Lattice;
use crate::state::GameState;
use crate::types::{EdgeKey, Point};

/// A geometrically valid chain with its edge indices resolved.
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    pub(crate) mv: Move,
    pub(crate) indices: Vec<usize>,
}

/// Geometric part of resolution.
///
/// Checks, in order: distinct points, both on the board, one of the six
/// lattice directions, every consecutive pair along the line joined by an
/// edge, and exactly `required_length` unit edges.
pub(crate) fn trace(
    lattice: &Lattice,
    a: Point,
    b: Point,
    required_length: usize,
) -> Result<Chain, MoveRejection> {
    if a == b {
        return Err(MoveRejection::DegenerateMove);
    }
    let (ax, ay) = lattice.coord(a).ok_or(MoveRejection::UnknownPoint(a))?;
    let (bx, by) = lattice.coord(b).ok_or(MoveRejection::UnknownPoint(b))?;
    let (dx, dy) = (bx - ax, by - ay);
    let ((sx, sy), steps) = if dy == 0 && dx % 2 == 0 {
        ((dx.signum() * 2, 0), dx.abs() / 2)
    } else if dx.abs() == dy.abs() {
        ((dx.signum(), dy.signum()), dy.abs())
    } else {
        return Err(MoveRejection::InvalidDirection);
    };

    let on_line: Vec<Point> = (0..=steps)
        .filter_map(|k| lattice.point_at(ax + k * sx, ay + k * sy))
        .collect();

    let mut edges = Vec::with_capacity(on_line.len().saturating_sub(1));
    let mut indices = Vec::with_capacity(edges.capacity());
    for pair in on_line.windows(2) {
        let key = EdgeKey::new(pair[0], pair[1]);
        let index = lattice
            .edge_index(&key)
            .ok_or(MoveRejection::MisalignedMove)?;
        edges.push(key);
        indices.push(index);
    }

    if edges.len() != required_length {
        return Err(MoveRejection::WrongLength {
            expected: required_length,
            actual: edges.len(),
        });
    }

    Ok(Chain {
        mv: Move::new(a, b, edges),
        indices,
    })
}

/// Whether at least one edge of the chain is still undrawn.
pub(crate) fn has_new_ground(state: &GameState, indices: &[usize]) -> bool {
    indices.iter().any(|&i| !state.edges[i].drawn)
}

/// Every geometrically valid chain on the lattice, one per unordered point pair.
pub(crate) fn candidate_chains(lattice: &Lattice, required_length: usize) -> Vec<Chain> {
    let points = lattice.points();
    let mut chains = Vec::new();
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            if let Ok(chain) = trace(lattice, a, b, required_length) {
                chains.push(chain);
            }
        }
    }
    chains
}

/// Resolves the line from `a` to `b` against the current state.
///
/// Pure and deterministic. `resolve(a, b)` and `resolve(b, a)` cover the
/// same edges in reverse order.
///
/// # Errors
///
/// Returns the [`MoveRejection`] reason when the pair is not a legal move.
#[instrument(skip(state), fields(from = %a, to = %b))]
pub fn resolve(state: &GameState, a: Point, b: Point) -> Result<Move, MoveRejection> {
    let chain = trace(state.lattice(), a, b, state.required_length()).inspect_err(|reason| {
        debug!(%reason, "Move rejected");
    })?;
    if !has_new_ground(state, &chain.indices) {
        debug!("Move rejected: no undrawn edge");
        return Err(MoveRejection::NoNewGround);
    }
    Ok(chain.mv)
}

/// Legal chains in candidate order, without cloning.
pub(crate) fn legal_chains(state: &GameState) -> impl Iterator<Item = &Chain> + '_ {
    state
        .candidates()
        .iter()
        .filter(|chain| has_new_ground(state, &chain.indices))
}

/// All legal moves in the current state, one per unordered point pair.
#[instrument(skip(state))]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    legal_chains(state).map(|chain| chain.mv.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::BoardSize;
    use std::sync::Arc;

    fn small() -> GameState {
        let lattice = Lattice::for_size(BoardSize::Small).expect("preset");
        GameState::new(Arc::new(lattice), 3).expect("valid setup")
    }

    #[test]
    fn test_horizontal_move() {
        let state = small();
        let mv = resolve(&state, Point::new(2, 0), Point::new(2, 3)).expect("legal");
        assert_eq!(mv.len(), 3);
        assert_eq!(mv.edges()[0], EdgeKey::new(Point::new(2, 0), Point::new(2, 1)));
        assert_eq!(mv.edges()[2], EdgeKey::new(Point::new(2, 2), Point::new(2, 3)));
    }

    #[test]
    fn test_diagonal_across_growing_and_shrinking_rows() {
        let state = small();
        let mv = resolve(&state, Point::new(0, 1), Point::new(3, 0)).expect("legal");
        assert_eq!(
            mv.edges(),
            &[
                EdgeKey::new(Point::new(0, 1), Point::new(1, 1)),
                EdgeKey::new(Point::new(1, 1), Point::new(2, 1)),
                EdgeKey::new(Point::new(2, 1), Point::new(3, 0)),
            ]
        );
    }

    #[test]
    fn test_degenerate() {
        let state = small();
        let p = Point::new(1, 1);
        assert_eq!(resolve(&state, p, p), Err(MoveRejection::DegenerateMove));
    }

    #[test]
    fn test_unknown_point() {
        let state = small();
        let off = Point::new(0, 7);
        assert_eq!(
            resolve(&state, Point::new(0, 0), off),
            Err(MoveRejection::UnknownPoint(off))
        );
    }

    #[test]
    fn test_knight_step_is_invalid_direction() {
        let state = small();
        assert_eq!(
            resolve(&state, Point::new(0, 0), Point::new(1, 2)),
            Err(MoveRejection::InvalidDirection)
        );
    }

    #[test]
    fn test_wrong_length() {
        let state = small();
        assert_eq!(
            resolve(&state, Point::new(2, 0), Point::new(2, 4)),
            Err(MoveRejection::WrongLength {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn test_vertical_between_equal_rows_is_invalid_direction() {
        // Equal rows stack points vertically, which no lattice direction reaches.
        let lattice = Lattice::build(&[3, 3]).expect("valid profile");
        let state = GameState::new(Arc::new(lattice), 1).expect("valid setup");
        assert_eq!(
            resolve(&state, Point::new(0, 1), Point::new(1, 1)),
            Err(MoveRejection::InvalidDirection)
        );
    }

    #[test]
    fn test_gap_in_line_is_misaligned() {
        // Row 1 is shifted by a full spacing, so the diagonal from (0,0)
        // lands on row 2 without passing through a row 1 point.
        let lattice = Lattice::build(&[3, 5, 3]).expect("valid profile");
        let state = GameState::new(Arc::new(lattice), 2).expect("valid setup");
        let (x, y) = state.lattice().coord(Point::new(0, 0)).expect("on board");
        let target = state.lattice().point_at(x + 2, y + 2).expect("row 2 point");
        assert_eq!(
            resolve(&state, Point::new(0, 0), target),
            Err(MoveRejection::MisalignedMove)
        );
    }

    #[test]
    fn test_small_board_candidate_count() {
        // Lattice lines on the small hexagon span 2, 3, 4, 3, 2 edges in
        // each of three directions: 0 + 1 + 2 + 1 + 0 chains of length 3.
        let state = small();
        assert_eq!(legal_moves(&state).len(), 12);
    }
}
