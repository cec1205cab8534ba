//! Game configuration loaded from TOML, with command-line overrides.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use tracing::{debug, info, instrument};
use trilines_engine::{BoardSize, Mode, SEARCH_DEPTH, SearchConfig, Seat};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "trilines.toml";

/// Who sits opposite the human.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    StrumDisplay,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opponent {
    /// A second human at the same terminal.
    Human,
    /// The search engine.
    #[default]
    Computer,
}

/// Search settings as written in the `[search]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Plies to look ahead.
    depth: u8,
    /// Alpha-beta pruning.
    pruning: bool,
    /// Tie-break seed.
    seed: Option<u64>,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            depth: SEARCH_DEPTH,
            pruning: true,
            seed: None,
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board preset.
    board: BoardSize,

    /// Explicit row-length profile; replaces `board` when set.
    rows: Option<Vec<usize>>,

    /// Unit edges every move must span.
    required_length: usize,

    /// Who plays the other seat.
    opponent: Opponent,

    /// Seat number the computer takes.
    computer_seat: u8,

    /// Pause before showing the computer's move.
    think_delay_ms: u64,

    /// Search settings.
    search: SearchSection,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardSize::default(),
            rows: None,
            required_length: 3,
            opponent: Opponent::default(),
            computer_seat: 2,
            think_delay_ms: 750,
            search: SearchSection::default(),
        }
    }
}

/// Values given on the command line, each replacing its file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Board preset.
    pub board: Option<BoardSize>,
    /// Explicit row profile.
    pub rows: Option<Vec<usize>>,
    /// Required line length.
    pub required_length: Option<usize>,
    /// Opponent kind.
    pub opponent: Option<Opponent>,
    /// Computer seat number.
    pub computer_seat: Option<u8>,
    /// Search depth.
    pub depth: Option<u8>,
    /// Turn pruning off.
    pub no_pruning: bool,
    /// Tie-break seed.
    pub seed: Option<u64>,
    /// Think delay in milliseconds.
    pub think_delay_ms: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or
    /// holds invalid values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(board = %config.board, required_length = config.required_length, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the result holds invalid values.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(board) = overrides.board {
            self.board = board;
            self.rows = None;
        }
        if let Some(rows) = &overrides.rows {
            self.rows = Some(rows.clone());
        }
        if let Some(length) = overrides.required_length {
            self.required_length = length;
        }
        if let Some(opponent) = overrides.opponent {
            self.opponent = opponent;
        }
        if let Some(seat) = overrides.computer_seat {
            self.computer_seat = seat;
        }
        if let Some(depth) = overrides.depth {
            self.search.depth = depth;
        }
        if overrides.no_pruning {
            self.search.pruning = false;
        }
        if let Some(seed) = overrides.seed {
            self.search.seed = Some(seed);
        }
        if let Some(delay) = overrides.think_delay_ms {
            self.think_delay_ms = delay;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.computer_seat, 1 | 2) {
            return Err(ConfigError::new(format!(
                "computer_seat must be 1 or 2, got {}",
                self.computer_seat
            )));
        }
        if self.search.depth == 0 {
            return Err(ConfigError::new("search depth must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Row-length profile in effect.
    pub fn profile(&self) -> Vec<usize> {
        self.rows.clone().unwrap_or_else(|| self.board.rows())
    }

    /// The computer's seat.
    pub fn computer(&self) -> Seat {
        Seat::new(self.computer_seat)
    }

    /// Seat assignment for an interactive game.
    pub fn mode(&self) -> Mode {
        match self.opponent {
            Opponent::Human => Mode::TwoPlayer,
            Opponent::Computer => Mode::VersusComputer {
                computer: self.computer(),
            },
        }
    }

    /// Search settings for the computer seat.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.search.depth,
            pruning: self.search.pruning,
            computer: self.computer(),
            seed: self.search.seed,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.profile(), vec![4, 5, 6, 7, 6, 5, 4]);
        assert_eq!(*config.required_length(), 3);
        assert_eq!(config.mode(), Mode::VersusComputer { computer: Seat::TWO });
        assert_eq!(config.search_config(), SearchConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str("board = \"small\"\n[search]\nseed = 4\n").expect("parses");
        assert_eq!(*config.board(), BoardSize::Small);
        assert_eq!(*config.think_delay_ms(), 750);
        assert_eq!(*config.search().seed(), Some(4));
        assert!(*config.search().pruning());
    }

    #[test]
    fn test_board_override_clears_rows() {
        let config = GameConfig {
            rows: Some(vec![2, 3, 2]),
            ..GameConfig::default()
        };
        let overrides = Overrides {
            board: Some(BoardSize::Large),
            ..Overrides::default()
        };
        let config = config.with_overrides(&overrides).expect("valid");
        assert_eq!(config.profile(), BoardSize::Large.rows());
    }

    #[test]
    fn test_bad_seat_rejected() {
        let overrides = Overrides {
            computer_seat: Some(3),
            ..Overrides::default()
        };
        let err = GameConfig::default().with_overrides(&overrides).unwrap_err();
        assert!(err.message.contains("computer_seat"));
        assert!(err.file.ends_with("config.rs"));
    }
}
