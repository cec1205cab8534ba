//! State mutation: draws a move's edges and scores completed cells.
//!
//! The same code path serves live play and search simulation; the only
//! difference is whether the caller hands in the live state or a clone.

use derive_more::Display;
use tracing::{debug, instrument};

use crate::action::Move;
use crate::state::GameState;
use crate::types::{CellId, EdgeKey, Seat};

/// A move could not be applied to this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ApplyError {
    /// The move references an edge that does not exist on this board.
    #[display("Edge {} is not on this board", _0)]
    ForeignEdge(EdgeKey),
}

impl std::error::Error for ApplyError {}

/// Draws the edges at `indices` for `actor` and scores newly closed cells.
///
/// Undrawn edges become owned by `actor`. A drawn edge owned by another
/// seat records `actor` as its shared owner, once. Afterwards every
/// unfilled cell whose three edges are drawn is filled for `actor`.
pub(crate) fn apply_indices(state: &mut GameState, indices: &[usize], actor: Seat) -> Vec<CellId> {
    for &i in indices {
        let edge = &mut state.edges[i];
        if !edge.drawn {
            edge.drawn = true;
            edge.owner = Some(actor);
        } else if edge.owner != Some(actor) && edge.shared_owner.is_none() {
            edge.shared_owner = Some(actor);
        }
    }

    let mut scored = Vec::new();
    for id in 0..state.cells.len() {
        if state.cells[id].filled {
            continue;
        }
        let sides = *state.lattice().cell_edge_indices(id);
        if sides.iter().all(|&i| state.edges[i].drawn) {
            let cell = &mut state.cells[id];
            cell.filled = true;
            cell.owner = Some(actor);
            *state.scores.entry(actor).or_default() += 1;
            state.filled += 1;
            scored.push(CellId(id));
        }
    }
    scored
}

fn edge_indices(state: &GameState, mv: &Move) -> Result<Vec<usize>, ApplyError> {
    mv.edges()
        .iter()
        .map(|key| {
            state
                .lattice()
                .edge_index(key)
                .ok_or(ApplyError::ForeignEdge(*key))
        })
        .collect()
}

/// Applies a move to `state` in place, returning the cells it scored.
///
/// # Errors
///
/// Returns [`ApplyError::ForeignEdge`] before touching the state if the
/// move was resolved against a different board.
#[instrument(skip(state, mv), fields(mv = %mv))]
pub fn apply_in_place(state: &mut GameState, mv: &Move, actor: Seat) -> Result<Vec<CellId>, ApplyError> {
    let indices = edge_indices(state, mv)?;
    let scored = apply_indices(state, &indices, actor);
    if !scored.is_empty() {
        debug!(cells = ?scored, score = state.score(actor), "Cells scored");
    }
    Ok(scored)
}

/// Applies a move to a copy of `state`, leaving the original untouched.
///
/// # Errors
///
/// Returns [`ApplyError::ForeignEdge`] if the move was resolved against a
/// different board.
#[instrument(skip(state, mv), fields(mv = %mv))]
pub fn apply(state: &GameState, mv: &Move, actor: Seat) -> Result<(GameState, Vec<CellId>), ApplyError> {
    let mut next = state.clone();
    let scored = apply_in_place(&mut next, mv, actor)?;
    Ok((next, scored))
}
