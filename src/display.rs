//! Plain-text board rendering.
//!
//! Points print as their column index so a player can read coordinates off
//! the board. Drawn edges carry the owner's seat number (`*` once shared),
//! and completed cells show `A` for seat 1 or `B` for seat 2.

use trilines_engine::{GameState, Seat};

const EMPTY: char = ' ';

fn seat_mark(owner: Option<Seat>, shared: bool) -> char {
    match owner {
        _ if shared => '*',
        Some(seat) => char::from_digit(u32::from(seat.number()) % 10, 10).unwrap_or('?'),
        None => EMPTY,
    }
}

fn cell_mark(owner: Option<Seat>) -> char {
    match owner {
        Some(Seat::ONE) => 'A',
        Some(Seat::TWO) => 'B',
        Some(_) => '?',
        None => EMPTY,
    }
}

/// Grid position of lattice coordinates; rows and columns are doubled.
fn slot(x: i64, y: i64) -> (usize, usize) {
    ((2 * y) as usize, (2 * x) as usize)
}

/// Renders the board with a row label on every point row.
pub fn render_board(state: &GameState) -> String {
    let lattice = state.lattice();
    let rows = lattice.rows().len();
    let height = 2 * rows - 1;
    let width = 4 * lattice.width();
    let mut grid = vec![vec![EMPTY; width]; height];

    for (key, edge) in state.edges() {
        if !edge.drawn() {
            continue;
        }
        let mark = seat_mark(edge.owner(), edge.is_shared());
        let (Some((ax, ay)), Some((bx, by))) = (lattice.coord(key.low()), lattice.coord(key.high()))
        else {
            continue;
        };
        if ay == by {
            let (r, c) = slot(ax.min(bx), ay);
            for cell in grid[r].iter_mut().skip(c + 1).take(3) {
                *cell = mark;
            }
        } else {
            // Midpoint of a diagonal, in doubled coordinates.
            grid[(ay + by) as usize][(ax + bx) as usize] = mark;
        }
    }

    for (id, cell) in state.cells() {
        let Some(shape) = lattice.cell(id).filter(|_| cell.filled()) else {
            continue;
        };
        let [Some(p0), Some(p1), Some(p2)] = shape.points().map(|p| lattice.coord(p)) else {
            continue;
        };
        let coords = [p0, p1, p2];
        let top = coords.iter().map(|&(_, y)| y).min().unwrap_or_default();
        let mid = coords.iter().map(|&(x, _)| x).sum::<i64>() / 3;
        let (r, c) = slot(mid, top);
        grid[r + 1][c] = cell_mark(cell.owner());
    }

    for &point in lattice.points() {
        let Some((x, y)) = lattice.coord(point) else {
            continue;
        };
        let (r, c) = slot(x, y);
        grid[r][c] = char::from_digit((point.col % 10) as u32, 10).unwrap_or('?');
    }

    let mut out = String::new();
    for (i, line) in grid.iter().enumerate() {
        let label = if i % 2 == 0 {
            format!("{:>2} ", i / 2)
        } else {
            "   ".to_string()
        };
        let text: String = line.iter().collect();
        out.push_str(&label);
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

/// One-line score summary.
pub fn render_scores(state: &GameState) -> String {
    let (one, two) = state.scores();
    format!(
        "{}: {}  {}: {}  ({}/{} cells)",
        Seat::ONE,
        one,
        Seat::TWO,
        two,
        state.filled_count(),
        state.lattice().cells().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trilines_engine::{Point, apply_in_place, new_game, resolve};

    #[test]
    fn test_empty_board_shows_column_labels() {
        let state = new_game(&[3, 4, 5, 4, 3], 3).expect("valid setup");
        let board = render_board(&state);
        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], " 0     0   1   2");
        assert_eq!(lines[4], " 2 0   1   2   3   4");
    }

    #[test]
    fn test_drawn_edges_and_cells() {
        let mut state = new_game(&[3, 4, 5, 4, 3], 3).expect("valid setup");
        for (a, b, seat) in [
            ((2, 0), (2, 3), Seat::ONE),
            ((0, 1), (3, 0), Seat::TWO),
            ((0, 0), (3, 2), Seat::TWO),
        ] {
            let mv = resolve(&state, Point::new(a.0, a.1), Point::new(b.0, b.1)).expect("legal");
            apply_in_place(&mut state, &mv, seat).expect("applies");
        }
        let board = render_board(&state);
        let lines: Vec<_> = board.lines().collect();
        assert!(lines[4].starts_with(" 2 0111"), "{board}");
        assert!(board.contains('B'), "{board}");
        assert!(!board.contains('A'), "{board}");
        assert!(render_scores(&state).contains("seat 2: 1"));
    }
}
