//! Per-game mutable state layered over the shared lattice.

use std::collections::BTreeMap;
use std::sync::Arc;

use derive_more::{Display, Error, From};
use tracing::{info, instrument};

use crate::lattice::{InvalidProfile, Lattice};
use crate::rules::resolve::{Chain, candidate_chains};
use crate::types::{CellId, CellState, EdgeKey, EdgeState, Seat};

/// Errors creating a new game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SetupError {
    /// The row-length profile is malformed.
    #[display("{}", _0)]
    Profile(InvalidProfile),

    /// The required chain length is zero.
    #[display("Required line length must be at least 1, got {}", _0)]
    #[from(ignore)]
    RequiredLength(#[error(not(source))] usize),
}

/// Complete state of one game session.
///
/// Cloning is cheap relative to the topology: the lattice and the candidate
/// chains are shared, only edge/cell/score state is copied.
#[derive(Debug, Clone)]
pub struct GameState {
    lattice: Arc<Lattice>,
    required_length: usize,
    candidates: Arc<[Chain]>,
    pub(crate) edges: Vec<EdgeState>,
    pub(crate) cells: Vec<CellState>,
    pub(crate) scores: BTreeMap<Seat, u32>,
    pub(crate) filled: usize,
    current: Seat,
}

impl GameState {
    /// Creates a fresh game over an existing lattice, seat 1 to move.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::RequiredLength`] if `required_length` is zero.
    #[instrument(skip(lattice), fields(rows = ?lattice.rows()))]
    pub fn new(lattice: Arc<Lattice>, required_length: usize) -> Result<Self, SetupError> {
        if required_length == 0 {
            return Err(SetupError::RequiredLength(required_length));
        }
        let candidates: Arc<[Chain]> = candidate_chains(&lattice, required_length).into();
        info!(
            cells = lattice.cells().len(),
            candidates = candidates.len(),
            required_length,
            "New game"
        );
        Ok(Self {
            edges: vec![EdgeState::default(); lattice.edges().len()],
            cells: vec![CellState::default(); lattice.cells().len()],
            scores: BTreeMap::new(),
            filled: 0,
            current: Seat::ONE,
            candidates,
            required_length,
            lattice,
        })
    }

    /// The shared board topology.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Shared handle to the topology.
    pub fn lattice_handle(&self) -> Arc<Lattice> {
        Arc::clone(&self.lattice)
    }

    /// Number of unit edges a move must span.
    pub fn required_length(&self) -> usize {
        self.required_length
    }

    pub(crate) fn candidates(&self) -> &[Chain] {
        &self.candidates
    }

    /// State of an edge, if it exists on this board.
    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeState> {
        self.lattice.edge_index(key).map(|i| &self.edges[i])
    }

    /// All edges with their state.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeState)> + '_ {
        self.lattice.edges().iter().copied().zip(self.edges.iter())
    }

    /// State of a cell.
    pub fn cell(&self, id: CellId) -> Option<&CellState> {
        self.cells.get(id.0)
    }

    /// All cells with their state.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &CellState)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// Number of drawn edges of a cell.
    pub fn drawn_sides(&self, id: CellId) -> usize {
        self.lattice
            .cell_edge_indices(id.0)
            .iter()
            .filter(|&&i| self.edges[i].drawn)
            .count()
    }

    /// Score of a single seat.
    pub fn score(&self, seat: Seat) -> u32 {
        self.scores.get(&seat).copied().unwrap_or_default()
    }

    /// Scores of seat 1 and seat 2.
    pub fn scores(&self) -> (u32, u32) {
        (self.score(Seat::ONE), self.score(Seat::TWO))
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// The seat whose turn it is.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub(crate) fn set_current_seat(&mut self, seat: Seat) {
        self.current = seat;
    }
}
