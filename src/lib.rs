//! Trilines - a line-drawing game on a triangular lattice.
//!
//! This crate wraps the pure [`trilines_engine`] with everything needed to
//! play it from a terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML game settings with command-line overrides
//! - **Session**: drives players through the turn controller, emits events
//! - **Players**: humans typing `r,c r,c`, or the search engine
//! - **Display**: plain-text board rendering
//! - **Self-play**: computer-versus-computer batches
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use trilines::{GameConfig, Session, TextSink, TurnController};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("trilines.toml")?;
//! let controller = TurnController::manual(
//!     &config.profile(),
//!     *config.required_length(),
//!     config.mode(),
//!     config.search_config(),
//! )?;
//! let mut session = Session::new(controller, TextSink::new(std::io::stdout()), Duration::ZERO);
//! session.run()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod display;
pub mod players;
pub mod selfplay;
pub mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, Opponent, Overrides, SearchSection};

// Crate-level exports - Session orchestration
pub use session::{EventSink, GameEvent, NullSink, Session, TextSink};

// Crate-level exports - Players
pub use players::{Choice, ComputerPlayer, HumanPlayer, Player};

// Crate-level exports - Self-play
pub use selfplay::{SelfPlaySummary, run_selfplay};

// Crate-level exports - Engine
pub use trilines_engine::{
    BoardSize, GameState, Mode, Move, MoveRejection, Outcome, Phase, Point, SearchConfig, Seat,
    TurnController, TurnError,
};
