//! Game rules for the triangle lattice.
//!
//! Pure functions over [`GameState`](crate::GameState): resolving a point
//! pair into a move, applying a move, and detecting the end of the game.

pub mod apply;
pub mod resolve;
pub mod terminal;

pub use apply::{ApplyError, apply, apply_in_place};
pub use resolve::{legal_moves, resolve};
pub use terminal::{is_blocked, is_terminal, outcome};
