//! Computer player backed by the search engine.

use super::{Choice, Player};
use anyhow::Result;
use tracing::debug;
use trilines_engine::{SearchConfig, SearchStats, Searcher, TurnController};

/// Plays the seat it is asked about with a [`Searcher`].
pub struct ComputerPlayer {
    name: String,
    searcher: Searcher,
}

impl ComputerPlayer {
    /// Creates a computer player; `config.computer` names its seat.
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        Self {
            name: name.into(),
            searcher: Searcher::new(config),
        }
    }

    /// Search counters so far.
    pub fn stats(&self) -> &SearchStats {
        self.searcher.stats()
    }
}

impl Player for ComputerPlayer {
    fn choose(&mut self, game: &TurnController) -> Result<Choice> {
        let result = self.searcher.search(game.state());
        debug!(player = %self.name, score = result.score, nodes = result.nodes, "Computer chose");
        Ok(match result.best {
            Some(mv) => Choice::Play(mv.from(), mv.to()),
            None => Choice::Pass,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
