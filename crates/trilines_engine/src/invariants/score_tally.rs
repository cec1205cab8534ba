//! Score tally invariant: scores count filled cells per owner.

use std::collections::BTreeMap;

use super::Invariant;
use crate::state::GameState;

/// Invariant: each seat's score equals the number of cells it owns, and the
/// filled counter matches.
pub struct ScoreTallyInvariant;

impl Invariant<GameState> for ScoreTallyInvariant {
    fn holds(state: &GameState) -> bool {
        let mut tally = BTreeMap::new();
        let mut filled = 0;
        for (_, cell) in state.cells() {
            if let Some(owner) = cell.owner() {
                *tally.entry(owner).or_insert(0u32) += 1;
            }
            if cell.filled() {
                filled += 1;
            }
        }
        let scores: BTreeMap<_, _> = state.scores.iter().filter(|(_, n)| **n > 0).map(|(s, n)| (*s, *n)).collect();
        scores == tally && filled == state.filled_count()
    }

    fn description() -> &'static str {
        "Scores equal the number of filled cells each seat owns"
    }
}
