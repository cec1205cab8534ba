//! Command-line interface for trilines.

use crate::config::{DEFAULT_CONFIG_FILE, Opponent, Overrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trilines_engine::BoardSize;

/// Trilines - draw lines on a triangular lattice, close cells, beat the computer
#[derive(Parser, Debug)]
#[command(name = "trilines")]
#[command(about = "Line-drawing game on a triangular lattice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (missing file means defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal against the computer or another human
    Play {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },

    /// Let the computer play itself and summarize the results
    Selfplay {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,

        /// Number of games to play
        #[arg(long, default_value = "10")]
        games: u32,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the legal opening moves for a board
    Moves {
        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },
}

impl Command {
    /// Game settings given with the subcommand.
    pub fn game_args(&self) -> &GameArgs {
        match self {
            Command::Play { game } | Command::Selfplay { game, .. } | Command::Moves { game } => game,
        }
    }
}

/// Settings shared by every subcommand; each overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Board preset (small, medium, large)
    #[arg(long)]
    pub board: Option<BoardSize>,

    /// Explicit row-length profile, e.g. 3,4,5,4,3
    #[arg(long, value_delimiter = ',')]
    pub rows: Option<Vec<usize>>,

    /// Unit edges every move must span
    #[arg(long)]
    pub length: Option<usize>,

    /// Who plays the other seat
    #[arg(long, value_enum)]
    pub opponent: Option<Opponent>,

    /// Seat number the computer takes (1 or 2)
    #[arg(long)]
    pub computer_seat: Option<u8>,

    /// Search depth in plies
    #[arg(long)]
    pub depth: Option<u8>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,

    /// Seed for the computer's tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before showing the computer's move, in milliseconds
    #[arg(long)]
    pub think_delay_ms: Option<u64>,
}

impl GameArgs {
    /// Converts the flags into config overrides.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            board: self.board,
            rows: self.rows.clone(),
            required_length: self.length,
            opponent: self.opponent,
            computer_seat: self.computer_seat,
            depth: self.depth,
            no_pruning: self.no_pruning,
            seed: self.seed,
            think_delay_ms: self.think_delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from([
            "trilines",
            "play",
            "--board",
            "small",
            "--opponent",
            "human",
            "--seed",
            "9",
        ])
        .expect("parses");
        let overrides = cli.command.game_args().overrides();
        assert_eq!(overrides.board, Some(BoardSize::Small));
        assert_eq!(overrides.opponent, Some(Opponent::Human));
        assert_eq!(overrides.seed, Some(9));
    }

    #[test]
    fn test_parse_rows_list() {
        let cli = Cli::try_parse_from(["trilines", "moves", "--rows", "3,4,5,4,3", "--length", "2"])
            .expect("parses");
        let overrides = cli.command.game_args().overrides();
        assert_eq!(overrides.rows, Some(vec![3, 4, 5, 4, 3]));
        assert_eq!(overrides.required_length, Some(2));
    }

    #[test]
    fn test_selfplay_defaults() {
        let cli = Cli::try_parse_from(["trilines", "selfplay", "--json"]).expect("parses");
        assert!(matches!(cli.command, Command::Selfplay { games: 10, json: true, .. }));
        assert_eq!(cli.log_level, "warn");
    }
}
