//! First-class move types.
//!
//! A [`Move`] is a validated request: it only comes out of the resolver, so
//! holding one means its chain passed the geometric rules.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeKey, Point};

/// A validated straight chain of unit edges from one point to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    from: Point,
    to: Point,
    edges: Vec<EdgeKey>,
}

impl Move {
    pub(crate) fn new(from: Point, to: Point, edges: Vec<EdgeKey>) -> Self {
        Self { from, to, edges }
    }

    /// Where the chain starts.
    pub fn from(&self) -> Point {
        self.from
    }

    /// Where the chain ends.
    pub fn to(&self) -> Point {
        self.to
    }

    /// Unit edges covered, ordered from `from` to `to`.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    /// Number of unit edges covered.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false for a resolved move.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The same chain walked the other way.
    pub fn reversed(&self) -> Self {
        let mut edges = self.edges.clone();
        edges.reverse();
        Self::new(self.to, self.from, edges)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a pair of points does not form a legal move.
///
/// These are ordinary outcomes surfaced to the player, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum MoveRejection {
    /// Both points are the same.
    #[display("A line needs two different points")]
    DegenerateMove,

    /// A point does not exist on this board.
    #[display("Point {} is not on the board", _0)]
    UnknownPoint(Point),

    /// The points do not lie along one of the six lattice directions.
    #[display("Lines must run along the grid")]
    InvalidDirection,

    /// Consecutive points along the line are not joined by an edge.
    #[display("Line does not follow the grid edges")]
    MisalignedMove,

    /// The chain covers the wrong number of unit edges.
    #[display("Line must span exactly {} edges, not {}", expected, actual)]
    WrongLength {
        /// Configured required length.
        expected: usize,
        /// Edges actually covered.
        actual: usize,
    },

    /// Every edge on the chain is already drawn.
    #[display("Line must cover at least one undrawn edge")]
    NoNewGround,
}

impl std::error::Error for MoveRejection {}
