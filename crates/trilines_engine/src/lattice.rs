//! Lattice builder: points, adjacency edges and triangular cells from a row profile.

use std::collections::HashMap;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::{CellId, EdgeKey, Point};

/// Board size presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BoardSize {
    /// Hexagon with three points per side.
    Small,
    /// Hexagon with four points per side.
    #[default]
    Medium,
    /// Hexagon with five points per side.
    Large,
}

impl BoardSize {
    /// Row-length profile for this preset.
    pub fn rows(self) -> Vec<usize> {
        match self {
            BoardSize::Small => vec![3, 4, 5, 4, 3],
            BoardSize::Medium => vec![4, 5, 6, 7, 6, 5, 4],
            BoardSize::Large => vec![5, 6, 7, 8, 9, 8, 7, 6, 5],
        }
    }
}

/// Malformed row-length profile.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid profile: {} at {}:{}", message, file, line)]
pub struct InvalidProfile {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidProfile {
    /// Creates a new profile error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Topology of one triangular cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    points: [Point; 3],
    edges: [EdgeKey; 3],
}

impl Cell {
    fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            points: [a, b, c],
            edges: [EdgeKey::new(a, b), EdgeKey::new(a, c), EdgeKey::new(b, c)],
        }
    }

    /// The three corner points.
    pub fn points(&self) -> &[Point; 3] {
        &self.points
    }

    /// The three edge keys.
    pub fn edges(&self) -> &[EdgeKey; 3] {
        &self.edges
    }
}

/// Immutable board topology.
///
/// Built once per game and shared read-only by every state derived from it.
#[derive(Debug, Clone)]
pub struct Lattice {
    rows: Vec<usize>,
    width: usize,
    points: Vec<Point>,
    edges: Vec<EdgeKey>,
    edge_index: HashMap<EdgeKey, usize>,
    cells: Vec<Cell>,
    cell_edges: Vec<[usize; 3]>,
}

impl Lattice {
    /// Builds the lattice for a row-length profile.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProfile`] if the profile has fewer than two rows or
    /// any row has fewer than two points.
    #[instrument]
    pub fn build(rows: &[usize]) -> Result<Self, InvalidProfile> {
        if rows.len() < 2 {
            return Err(InvalidProfile::new(format!(
                "profile needs at least 2 rows, got {}",
                rows.len()
            )));
        }
        if let Some((row, len)) = rows.iter().enumerate().find(|(_, len)| **len < 2) {
            return Err(InvalidProfile::new(format!(
                "row {} has {} points, need at least 2",
                row, len
            )));
        }

        let width = rows.iter().copied().max().unwrap_or_default();
        let points = rows
            .iter()
            .enumerate()
            .flat_map(|(r, &len)| (0..len).map(move |c| Point::new(r, c)))
            .collect();

        let mut lattice = Self {
            rows: rows.to_vec(),
            width,
            points,
            edges: Vec::new(),
            edge_index: HashMap::new(),
            cells: Vec::new(),
            cell_edges: Vec::new(),
        };
        lattice.connect();
        lattice.triangulate()?;

        debug!(
            points = lattice.points.len(),
            edges = lattice.edges.len(),
            cells = lattice.cells.len(),
            "Lattice built"
        );
        Ok(lattice)
    }

    /// Builds the lattice for a preset.
    #[instrument]
    pub fn for_size(size: BoardSize) -> Result<Self, InvalidProfile> {
        Self::build(&size.rows())
    }

    fn add_edge(&mut self, a: Point, b: Point) {
        let key = EdgeKey::new(a, b);
        if !self.edge_index.contains_key(&key) {
            self.edge_index.insert(key, self.edges.len());
            self.edges.push(key);
        }
    }

    /// Adds the horizontal edges of each row and the diagonal edges to the row below.
    fn connect(&mut self) {
        let rows = self.rows.clone();
        for (r, &len) in rows.iter().enumerate() {
            for c in 0..len {
                let here = Point::new(r, c);
                if c + 1 < len {
                    self.add_edge(here, Point::new(r, c + 1));
                }
                let Some(&next) = rows.get(r + 1) else {
                    continue;
                };
                if next > len {
                    self.add_edge(here, Point::new(r + 1, c));
                    self.add_edge(here, Point::new(r + 1, c + 1));
                } else {
                    if c < next {
                        self.add_edge(here, Point::new(r + 1, c));
                    }
                    if c > 0 && c - 1 < next {
                        self.add_edge(here, Point::new(r + 1, c - 1));
                    }
                }
            }
        }
    }

    /// Emits the triangular cells between each pair of adjacent rows.
    fn triangulate(&mut self) -> Result<(), InvalidProfile> {
        let mut cells = Vec::new();
        for r in 0..self.rows.len() - 1 {
            let (len, next) = (self.rows[r], self.rows[r + 1]);
            if next > len {
                // Growing: apex on top, then an inverted cell to its right.
                for c in 0..len {
                    let top = Point::new(r, c);
                    let below_right = Point::new(r + 1, c + 1);
                    cells.push(Cell::new(top, Point::new(r + 1, c), below_right));
                    if c + 1 < len {
                        cells.push(Cell::new(top, Point::new(r, c + 1), below_right));
                    }
                }
            } else {
                // Shrinking: inverted cell first, then an apex-up cell to its right.
                for c in 0..next {
                    if c + 1 >= len {
                        continue;
                    }
                    let top_right = Point::new(r, c + 1);
                    let below = Point::new(r + 1, c);
                    cells.push(Cell::new(Point::new(r, c), top_right, below));
                    if c + 1 < next {
                        cells.push(Cell::new(top_right, below, Point::new(r + 1, c + 1)));
                    }
                }
            }
        }

        let mut cell_edges = Vec::with_capacity(cells.len());
        for cell in &cells {
            let mut indices = [0; 3];
            for (slot, key) in indices.iter_mut().zip(cell.edges()) {
                *slot = self.edge_index.get(key).copied().ok_or_else(|| {
                    InvalidProfile::new(format!("cell edge {} missing from topology", key))
                })?;
            }
            cell_edges.push(indices);
        }

        self.cells = cells;
        self.cell_edges = cell_edges;
        Ok(())
    }

    /// The row-length profile.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// All points in row-major order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the point exists on this board.
    pub fn contains(&self, point: Point) -> bool {
        self.rows.get(point.row).is_some_and(|&len| point.col < len)
    }

    /// All edge keys, in construction order.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    /// Index of an edge, if it exists.
    pub fn edge_index(&self, key: &EdgeKey) -> Option<usize> {
        self.edge_index.get(key).copied()
    }

    /// Whether `a` and `b` are joined by a unit edge.
    pub fn is_adjacent(&self, a: Point, b: Point) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(a, b))
    }

    /// All cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Looks up a cell.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub(crate) fn cell_edge_indices(&self, id: usize) -> &[usize; 3] {
        &self.cell_edges[id]
    }

    /// Finds the cell with exactly these three corners, in any order.
    #[instrument(skip(self))]
    pub fn cell_at(&self, corners: [Point; 3]) -> Option<CellId> {
        let mut wanted = corners;
        wanted.sort();
        self.cells
            .iter()
            .position(|cell| {
                let mut have = *cell.points();
                have.sort();
                have == wanted
            })
            .map(CellId)
    }

    /// Lattice embedding of a point in half-spacing units.
    ///
    /// `x` grows left to right with rows centred on the widest row; `y` is
    /// the row. Neighbours differ by `(±2, 0)` or `(±1, ±1)`. `None` for a
    /// point off the board.
    pub fn coord(&self, point: Point) -> Option<(i64, i64)> {
        let len = *self.rows.get(point.row)?;
        (point.col < len).then(|| ((2 * point.col + self.width - len) as i64, point.row as i64))
    }

    /// Inverse of [`Lattice::coord`].
    pub fn point_at(&self, x: i64, y: i64) -> Option<Point> {
        let row = usize::try_from(y).ok()?;
        let len = *self.rows.get(row)?;
        let rel = x - (self.width - len) as i64;
        if rel < 0 || rel % 2 != 0 {
            return None;
        }
        let col = (rel / 2) as usize;
        (col < len).then_some(Point::new(row, col))
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.width
    }
}
