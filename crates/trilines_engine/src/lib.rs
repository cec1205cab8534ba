//! Pure game logic for a line-drawing game on a triangular lattice.
//!
//! Players take turns drawing straight chains of a fixed number of unit
//! edges. Drawing the last side of a triangular cell scores it for the
//! player who drew it. A depth-bounded minimax search plays the computer
//! seat.
//!
//! # Architecture
//!
//! - [`lattice`]: builds immutable board topology from a row-length profile
//! - [`rules`]: resolves point pairs into moves, applies them, detects the end
//! - [`eval`]: static evaluation used at the search horizon
//! - [`search`]: minimax (optionally alpha-beta) for the computer seat
//! - [`controller`]: turn order, game end and computer replies
//! - [`invariants`]: properties checked after every committed move
//!
//! # Example
//!
//! ```
//! use trilines_engine::{Point, Seat, new_game, propose_move, commit_move, scores};
//!
//! let state = new_game(&[3, 4, 5, 4, 3], 3).unwrap();
//! let mv = propose_move(&state, Point::new(2, 0), Point::new(2, 3)).unwrap();
//! let (state, scored) = commit_move(&state, &mv, Seat::ONE).unwrap();
//! assert!(scored.is_empty());
//! assert_eq!(scores(&state), (0, 0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod action;
pub mod controller;
pub mod eval;
pub mod invariants;
pub mod lattice;
pub mod phases;
pub mod rules;
pub mod search;
pub mod state;
pub mod types;

use std::sync::Arc;

pub use action::{Move, MoveRejection};
pub use controller::{Mode, Turn, TurnAction, TurnController, TurnError, TurnReport};
pub use eval::{FILLED_WEIGHT, SETUP_WEIGHT, evaluate};
pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation};
pub use lattice::{BoardSize, Cell, InvalidProfile, Lattice};
pub use phases::{Outcome, Phase};
pub use rules::{ApplyError, apply, apply_in_place, is_blocked, is_terminal, legal_moves, outcome, resolve};
pub use search::{SEARCH_DEPTH, SearchConfig, SearchResult, SearchStats, Searcher, minimax};
pub use state::{GameState, SetupError};
pub use types::{CellId, CellState, EdgeKey, EdgeState, Point, Seat};

/// Builds the lattice for `rows` and starts a game with seat 1 to move.
///
/// # Errors
///
/// Returns [`SetupError`] for a malformed profile or a zero length.
pub fn new_game(rows: &[usize], required_length: usize) -> Result<GameState, SetupError> {
    let lattice = Lattice::build(rows)?;
    GameState::new(Arc::new(lattice), required_length)
}

/// Validates a move from `a` to `b` against `state`.
///
/// # Errors
///
/// Returns the [`MoveRejection`] reason when the pair is not legal.
pub fn propose_move(state: &GameState, a: Point, b: Point) -> Result<Move, MoveRejection> {
    resolve(state, a, b)
}

/// Applies `mv` for `seat`, returning the new state and the cells it scored.
///
/// # Errors
///
/// Returns [`ApplyError`] if the move belongs to a different board.
pub fn commit_move(state: &GameState, mv: &Move, seat: Seat) -> Result<(GameState, Vec<CellId>), ApplyError> {
    apply(state, mv, seat)
}

/// Scores of seat 1 and seat 2.
pub fn scores(state: &GameState) -> (u32, u32) {
    state.scores()
}

/// Best move for `config.computer`, or `None` if it must pass.
pub fn choose_computer_move(state: &GameState, config: SearchConfig) -> Option<Move> {
    Searcher::new(config).choose_move(state)
}
