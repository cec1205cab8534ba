//! Depth-bounded adversarial search for the computer seat.
//!
//! The computer maximizes [`evaluate`], its opponent minimizes it, and the
//! turn strictly alternates between plies whether or not a move scored.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trilines_engine::{BoardSize, GameState, Lattice, SearchConfig, Searcher};
//!
//! let lattice = Lattice::for_size(BoardSize::Small).unwrap();
//! let state = GameState::new(Arc::new(lattice), 3).unwrap();
//!
//! let mut searcher = Searcher::new(SearchConfig { seed: Some(7), ..SearchConfig::default() });
//! let best = searcher.choose_move(&state);
//! assert!(best.is_some());
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::action::Move;
use crate::eval::evaluate;
use crate::rules::apply::apply_indices;
use crate::rules::apply;
use crate::rules::resolve::legal_chains;
use crate::state::GameState;
use crate::types::Seat;

/// Plies searched by default, counting the computer's own move.
pub const SEARCH_DEPTH: u8 = 3;

/// Bound wider than any reachable evaluation.
const INF: i32 = i32::MAX / 2;

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to look ahead, including the computer's own move.
    pub depth: u8,
    /// Use alpha-beta pruning. Never changes the chosen move.
    pub pruning: bool,
    /// The seat the search plays for.
    pub computer: Seat,
    /// Seed for tie-breaking; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
            pruning: true,
            computer: Seat::TWO,
            seed: None,
        }
    }
}

/// Counters accumulated across searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed root searches.
    pub searches: u64,
    /// Nodes visited below the root.
    pub nodes: u64,
    /// Root candidates that failed to apply.
    pub skipped: u64,
}

/// Outcome of one root search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` means the computer must pass.
    pub best: Option<Move>,
    /// Backed-up score of the best move.
    pub score: i32,
    /// Nodes visited below the root.
    pub nodes: u64,
    /// Legal moves at the root.
    pub candidates: usize,
    /// Root candidates that failed to apply.
    pub skipped: usize,
}

/// Chooses moves for the computer seat.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    rng: StdRng,
    stats: SearchStats,
}

impl Searcher {
    /// Creates a searcher; seeded when `config.seed` is set.
    #[instrument]
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// The active settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best move for the computer seat, or `None` if it must pass.
    pub fn choose_move(&mut self, state: &GameState) -> Option<Move> {
        self.search(state).best
    }

    /// Runs a full root search.
    ///
    /// Root moves are shuffled so that equally scored candidates are picked
    /// at random; the first strictly better score wins.
    #[instrument(skip(self, state), fields(depth = self.config.depth, computer = %self.config.computer))]
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        let computer = self.config.computer;
        let child_depth = self.config.depth.saturating_sub(1);

        let mut roots: Vec<_> = legal_chains(state).collect();
        roots.shuffle(&mut self.rng);

        let mut nodes = 0;
        let mut skipped = 0;
        let mut best: Option<(&Move, i32)> = None;
        for chain in &roots {
            let child = match apply(state, &chain.mv, computer) {
                Ok((child, _)) => child,
                Err(e) => {
                    warn!(mv = %chain.mv, error = %e, "Skipping candidate");
                    skipped += 1;
                    continue;
                }
            };
            let value = if self.config.pruning {
                let alpha = best.map_or(-INF, |(_, score)| score);
                alphabeta(&child, child_depth, alpha, INF, false, computer, &mut nodes)
            } else {
                minimax_counted(&child, child_depth, false, computer, &mut nodes)
            };
            if best.is_none_or(|(_, score)| value > score) {
                best = Some((&chain.mv, value));
            }
        }

        self.stats.searches += 1;
        self.stats.nodes += nodes;
        self.stats.skipped += skipped as u64;

        let result = SearchResult {
            best: best.map(|(mv, _)| mv.clone()),
            score: best.map_or_else(|| evaluate(state, computer), |(_, score)| score),
            nodes,
            candidates: roots.len(),
            skipped,
        };
        debug!(
            best = ?result.best.as_ref().map(ToString::to_string),
            score = result.score,
            nodes,
            candidates = result.candidates,
            "Search complete"
        );
        result
    }
}

/// Plain minimax value of `state`, `depth` plies deep.
///
/// `maximizing` is true when the computer moves next.
pub fn minimax(state: &GameState, depth: u8, maximizing: bool, computer: Seat) -> i32 {
    let mut nodes = 0;
    minimax_counted(state, depth, maximizing, computer, &mut nodes)
}

fn minimax_counted(state: &GameState, depth: u8, maximizing: bool, computer: Seat, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate(state, computer);
    }
    let actor = if maximizing { computer } else { computer.other() };

    let mut best: Option<i32> = None;
    for chain in legal_chains(state) {
        let mut child = state.clone();
        apply_indices(&mut child, &chain.indices, actor);
        let value = minimax_counted(&child, depth - 1, !maximizing, computer, nodes);
        best = Some(match best {
            None => value,
            Some(b) if maximizing => b.max(value),
            Some(b) => b.min(value),
        });
    }
    best.unwrap_or_else(|| evaluate(state, computer))
}

/// Fail-soft alpha-beta; equals [`minimax`] whenever the true value lies
/// strictly inside `(alpha, beta)`.
fn alphabeta(
    state: &GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    computer: Seat,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate(state, computer);
    }
    let actor = if maximizing { computer } else { computer.other() };

    let mut best: Option<i32> = None;
    for chain in legal_chains(state) {
        let mut child = state.clone();
        apply_indices(&mut child, &chain.indices, actor);
        let value = alphabeta(&child, depth - 1, alpha, beta, !maximizing, computer, nodes);
        if maximizing {
            let b = best.map_or(value, |b| b.max(value));
            best = Some(b);
            alpha = alpha.max(b);
        } else {
            let b = best.map_or(value, |b| b.min(value));
            best = Some(b);
            beta = beta.min(b);
        }
        if alpha >= beta {
            break;
        }
    }
    best.unwrap_or_else(|| evaluate(state, computer))
}
