//! Game session orchestration between players and an event sink.

use crate::display::{render_board, render_scores};
use crate::players::{Choice, Player};
use anyhow::{Result, anyhow};
use derive_new::new;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, instrument};
use trilines_engine::{
    CellId, GameState, Move, MoveRejection, Outcome, Phase, Seat, Turn, TurnAction,
    TurnController, TurnError,
};

/// Notifications sent from the session to the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A game began.
    Started {
        /// Row-length profile.
        rows: Vec<usize>,
        /// Unit edges per move.
        required_length: usize,
    },
    /// A move was drawn.
    MovePlayed {
        /// Acting seat.
        seat: Seat,
        /// The move.
        mv: Move,
        /// Cells it completed.
        scored: Vec<CellId>,
    },
    /// The board changed; emitted once after each batch of turns.
    StateChanged {
        /// Scores of seat 1 and seat 2.
        scores: (u32, u32),
    },
    /// A seat passed.
    Passed {
        /// Acting seat.
        seat: Seat,
    },
    /// A proposed move was refused; the seat tries again.
    Rejected {
        /// Seat that proposed it.
        seat: Seat,
        /// Why.
        reason: MoveRejection,
    },
    /// The computer is about to move.
    ComputerThinking {
        /// The computer's seat.
        seat: Seat,
    },
    /// The game ended.
    GameOver {
        /// Winner or draw.
        outcome: Outcome,
        /// Final scores of seat 1 and seat 2.
        scores: (u32, u32),
    },
}

/// Receives game events.
pub trait EventSink {
    /// Handles one event; `state` is the state after it.
    fn emit(&mut self, event: &GameEvent, state: &GameState) -> Result<()>;
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: &GameEvent, _state: &GameState) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent, _state: &GameState) -> Result<()> {
        Ok(())
    }
}

/// Writes events and redraws the board as text.
#[derive(Debug, new)]
pub struct TextSink<W> {
    out: W,
}

impl<W: Write> EventSink for TextSink<W> {
    fn emit(&mut self, event: &GameEvent, state: &GameState) -> Result<()> {
        match event {
            GameEvent::Started { rows, required_length } => {
                writeln!(self.out, "Board {:?}, lines of {} edges", rows, required_length)?;
                write!(self.out, "{}", render_board(state))?;
            }
            GameEvent::MovePlayed { seat, mv, scored, .. } => {
                if scored.is_empty() {
                    writeln!(self.out, "{seat} played {mv}")?;
                } else {
                    writeln!(self.out, "{seat} played {mv} and completed {} cell(s)", scored.len())?;
                }
            }
            GameEvent::StateChanged { .. } => {
                write!(self.out, "{}", render_board(state))?;
                writeln!(self.out, "{}", render_scores(state))?;
            }
            GameEvent::Passed { seat } => writeln!(self.out, "{seat} passed")?,
            GameEvent::Rejected { reason, .. } => writeln!(self.out, "Illegal move: {reason}")?,
            GameEvent::ComputerThinking { seat } => writeln!(self.out, "{seat} is thinking...")?,
            GameEvent::GameOver { outcome, .. } => {
                writeln!(self.out, "Game over: {outcome}")?;
                writeln!(self.out, "{}", render_scores(state))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Runs one game: asks players for moves and reports what happened.
pub struct Session<S> {
    controller: TurnController,
    players: Vec<Box<dyn Player>>,
    seats: BTreeMap<Seat, usize>,
    sink: S,
    think_delay: Duration,
}

impl<S: EventSink> Session<S> {
    /// Creates a session around a controller.
    ///
    /// The session takes over the computer seat's turns, so the controller
    /// stops replying on its own.
    pub fn new(mut controller: TurnController, sink: S, think_delay: Duration) -> Self {
        controller.set_auto_reply(false);
        Self {
            controller,
            players: Vec::new(),
            seats: BTreeMap::new(),
            sink,
            think_delay,
        }
    }

    /// Lets `player` act for every seat in `seats`.
    pub fn with_player(mut self, seats: &[Seat], player: Box<dyn Player>) -> Self {
        let index = self.players.len();
        self.players.push(player);
        for &seat in seats {
            self.seats.insert(seat, index);
        }
        self
    }

    /// The controller.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Consumes the session, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Plays until the game ends or a player quits.
    ///
    /// Returns the outcome, or `None` if a player quit.
    ///
    /// # Errors
    ///
    /// Fails if a seat has no player, a player fails to answer, or the
    /// controller reports anything other than a rejected move.
    #[instrument(skip(self), fields(mode = ?self.controller.mode()))]
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        let state = self.controller.state();
        let started = GameEvent::Started {
            rows: state.lattice().rows().to_vec(),
            required_length: state.required_length(),
        };
        self.sink.emit(&started, state)?;
        let opening = self.controller.history().to_vec();
        self.report(&opening)?;

        while let Phase::AwaitingMove(seat) = self.controller.phase() {
            if Some(seat) == self.controller.mode().computer() {
                self.think(seat)?;
                let report = self.controller.play_computer()?;
                self.report(&report.turns)?;
                continue;
            }

            let index = *self
                .seats
                .get(&seat)
                .ok_or_else(|| anyhow!("No player for {seat}"))?;

            if self.players[index].is_computer() {
                self.think(seat)?;
            }
            let player = &mut self.players[index];
            debug!(player = %player.name(), %seat, "Waiting for move");
            let result = match player.choose(&self.controller)? {
                Choice::Quit => {
                    info!(%seat, "Player quit");
                    return Ok(None);
                }
                Choice::Pass => self.controller.pass(seat),
                Choice::Play(a, b) => self.controller.play(seat, a, b),
            };

            match result {
                Ok(report) => self.report(&report.turns)?,
                Err(TurnError::Rejected(reason)) => {
                    self.sink
                        .emit(&GameEvent::Rejected { seat, reason }, self.controller.state())?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let state = self.controller.state();
        let outcome = self
            .controller
            .outcome()
            .ok_or_else(|| anyhow!("Game stopped without an outcome"))?;
        self.sink.emit(
            &GameEvent::GameOver {
                outcome,
                scores: state.scores(),
            },
            state,
        )?;
        Ok(Some(outcome))
    }

    /// Announces that `seat` is searching, then waits the think delay.
    fn think(&mut self, seat: Seat) -> Result<()> {
        self.sink
            .emit(&GameEvent::ComputerThinking { seat }, self.controller.state())?;
        std::thread::sleep(self.think_delay);
        Ok(())
    }

    fn report(&mut self, turns: &[Turn]) -> Result<()> {
        for turn in turns {
            let seat = turn.seat;
            let event = match &turn.action {
                TurnAction::Played { mv, scored } => GameEvent::MovePlayed {
                    seat,
                    mv: mv.clone(),
                    scored: scored.clone(),
                },
                TurnAction::Passed => GameEvent::Passed { seat },
            };
            self.sink.emit(&event, self.controller.state())?;
        }
        if !turns.is_empty() {
            let state = self.controller.state();
            self.sink.emit(&GameEvent::StateChanged { scores: state.scores() }, state)?;
        }
        Ok(())
    }
}
