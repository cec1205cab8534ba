//! Trilines - terminal front end.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io::{BufReader, Write};
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use trilines::cli::{Cli, Command};
use trilines::{
    GameConfig, HumanPlayer, Mode, Seat, Session, TextSink, TurnController, run_selfplay,
};
use trilines_engine::{legal_moves, new_game};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(&cli.config)?
        .with_overrides(&cli.command.game_args().overrides())?;

    match cli.command {
        Command::Play { .. } => run_play(&config),
        Command::Selfplay { games, json, .. } => run_batch(&config, games, json),
        Command::Moves { .. } => run_moves(&config),
    }
}

/// Interactive game on stdin/stdout.
#[instrument(skip(config))]
fn run_play(config: &GameConfig) -> Result<()> {
    let mode = config.mode();
    let controller = TurnController::manual(
        &config.profile(),
        *config.required_length(),
        mode,
        config.search_config(),
    )?;

    let human_seats: Vec<Seat> = match mode {
        Mode::TwoPlayer => vec![Seat::ONE, Seat::TWO],
        Mode::VersusComputer { computer } => vec![computer.other()],
    };
    info!(?mode, ?human_seats, "Starting interactive game");

    let human = HumanPlayer::new("you", BufReader::new(std::io::stdin()), std::io::stdout());
    let sink = TextSink::new(std::io::stdout());
    let delay = Duration::from_millis(*config.think_delay_ms());
    let mut session = Session::new(controller, sink, delay).with_player(&human_seats, Box::new(human));

    if session.run()?.is_none() {
        println!("Bye.");
    }
    Ok(())
}

/// Computer-versus-computer batch.
#[instrument(skip(config))]
fn run_batch(config: &GameConfig, games: u32, json: bool) -> Result<()> {
    let summary = run_selfplay(config, games)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

/// Lists the legal opening moves.
#[instrument(skip(config))]
fn run_moves(config: &GameConfig) -> Result<()> {
    let state = new_game(&config.profile(), *config.required_length())?;
    let moves = legal_moves(&state);
    let mut out = std::io::stdout().lock();
    for mv in &moves {
        writeln!(out, "{mv}")?;
    }
    writeln!(
        out,
        "{} moves, {} cells, lines of {} edges",
        moves.len(),
        state.lattice().cells().len(),
        state.required_length()
    )?;
    Ok(())
}
