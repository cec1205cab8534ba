//! Computer-versus-computer matches.

use crate::config::GameConfig;
use crate::players::ComputerPlayer;
use crate::session::{NullSink, Session};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};
use trilines_engine::{Mode, Outcome, SearchConfig, Seat, TurnController};

/// Totals over a batch of self-play games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfPlaySummary {
    /// Games played.
    pub games: u32,
    /// Games won by seat 1.
    pub seat_one_wins: u32,
    /// Games won by seat 2.
    pub seat_two_wins: u32,
    /// Drawn games.
    pub draws: u32,
    /// Mean number of completed cells per game.
    pub average_cells: f64,
    /// Games that ended with cells still open.
    pub blocked_endings: u32,
}

impl std::fmt::Display for SelfPlaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "games:          {}", self.games)?;
        writeln!(f, "seat 1 wins:    {}", self.seat_one_wins)?;
        writeln!(f, "seat 2 wins:    {}", self.seat_two_wins)?;
        writeln!(f, "draws:          {}", self.draws)?;
        writeln!(f, "blocked ends:   {}", self.blocked_endings)?;
        write!(f, "average cells:  {:.2}", self.average_cells)
    }
}

/// Seed for one seat in one game, derived from the batch seed.
fn seat_seed(base: Option<u64>, game: u32, seat: Seat) -> Option<u64> {
    base.map(|seed| {
        seed.wrapping_add(u64::from(game) * 2)
            .wrapping_add(u64::from(seat.number()))
    })
}

/// Plays `games` games between two computer players.
///
/// # Errors
///
/// Fails if the configured board cannot be built.
#[instrument(skip(config), fields(board = ?config.profile()))]
pub fn run_selfplay(config: &GameConfig, games: u32) -> Result<SelfPlaySummary> {
    let base = config.search_config();
    let mut summary = SelfPlaySummary {
        games,
        ..SelfPlaySummary::default()
    };
    let mut cells = 0usize;

    for game in 0..games {
        let controller = TurnController::new(
            &config.profile(),
            *config.required_length(),
            Mode::TwoPlayer,
            base,
        )?;
        let mut session = Session::new(controller, NullSink, Duration::ZERO);
        for seat in [Seat::ONE, Seat::TWO] {
            let search = SearchConfig {
                computer: seat,
                seed: seat_seed(base.seed, game, seat),
                ..base
            };
            let player = ComputerPlayer::new(format!("computer {}", seat.number()), search);
            session = session.with_player(&[seat], Box::new(player));
        }

        let outcome = session.run()?;
        let state = session.controller().state();
        cells += state.filled_count();
        if !state.is_complete() {
            summary.blocked_endings += 1;
        }
        match outcome {
            Some(Outcome::Winner(Seat::ONE)) => summary.seat_one_wins += 1,
            Some(Outcome::Winner(_)) => summary.seat_two_wins += 1,
            Some(Outcome::Draw) | None => summary.draws += 1,
        }
        info!(game, outcome = ?outcome, scores = ?state.scores(), "Self-play game finished");
    }

    if games > 0 {
        summary.average_cells = cells as f64 / f64::from(games);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_seeds_differ() {
        assert_ne!(seat_seed(Some(1), 0, Seat::ONE), seat_seed(Some(1), 0, Seat::TWO));
        assert_ne!(seat_seed(Some(1), 0, Seat::TWO), seat_seed(Some(1), 1, Seat::TWO));
        assert_eq!(seat_seed(None, 3, Seat::ONE), None);
    }
}
