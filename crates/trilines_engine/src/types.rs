//! Core domain types: seats, lattice points, edge keys and per-game edge/cell state.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A participant seat.
///
/// The game has two seats ([`Seat::ONE`] and [`Seat::TWO`]); other values
/// only exist so that rule code can be exercised with an injected actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(u8);

impl Seat {
    /// Seat 1 (moves first).
    pub const ONE: Seat = Seat(1);
    /// Seat 2.
    pub const TWO: Seat = Seat(2);

    /// Creates a seat from its number.
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Returns the seat number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Returns the opposing seat.
    ///
    /// Seat 1 and seat 2 swap; any injected seat faces seat 1.
    pub fn other(self) -> Self {
        if self == Seat::ONE {
            Seat::TWO
        } else {
            Seat::ONE
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// A lattice point identified by `(row, col)`.
///
/// The derived ordering (row first, then column) is the total order used to
/// canonicalize edge keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index within the row, left to right.
    pub col: usize,
}

impl Point {
    /// Creates a point.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parses `"r,c"` (whitespace around either number is ignored).
    #[instrument]
    pub fn parse(s: &str) -> Option<Self> {
        let (row, col) = s.trim().split_once(',')?;
        Some(Self::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Canonical key of a unit edge: lower endpoint first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeKey {
    low: Point,
    high: Point,
}

impl EdgeKey {
    /// Builds the key for the edge between `a` and `b`, in either order.
    pub fn new(a: Point, b: Point) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The lower endpoint.
    pub fn low(&self) -> Point {
        self.low
    }

    /// The higher endpoint.
    pub fn high(&self) -> Point {
        self.high
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.low, self.high)
    }
}

/// Index of a triangular cell within its lattice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CellId(pub usize);

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

/// Mutable per-game state of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeState {
    pub(crate) drawn: bool,
    pub(crate) owner: Option<Seat>,
    pub(crate) shared_owner: Option<Seat>,
}

impl EdgeState {
    /// Whether any seat has drawn this edge.
    pub fn drawn(&self) -> bool {
        self.drawn
    }

    /// The seat that drew the edge first.
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }

    /// The opposing seat that later traced over the edge, if any.
    pub fn shared_owner(&self) -> Option<Seat> {
        self.shared_owner
    }

    /// Whether the edge carries an overlay from a second seat.
    pub fn is_shared(&self) -> bool {
        self.shared_owner.is_some() && self.shared_owner != self.owner
    }
}

/// Mutable per-game state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellState {
    pub(crate) filled: bool,
    pub(crate) owner: Option<Seat>,
}

impl CellState {
    /// Whether the cell has been completed.
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// The seat that completed the cell.
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }
}
