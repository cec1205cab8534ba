//! Turn controller: whose turn it is, when the game ends, and when the
//! computer moves.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::action::{Move, MoveRejection};
use crate::lattice::Lattice;
use crate::phases::{Outcome, Phase};
use crate::rules::{self, ApplyError};
use crate::search::{SearchConfig, SearchStats, Searcher};
use crate::state::{GameState, SetupError};
use crate::types::{CellId, Point, Seat};
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────
//  Mode and history
// ─────────────────────────────────────────────────────────────

/// Who sits in the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Both seats are driven by the caller.
    #[default]
    TwoPlayer,
    /// The controller plays `computer` itself.
    VersusComputer {
        /// The seat the search engine plays.
        computer: Seat,
    },
}

impl Mode {
    /// The computer's seat, if any.
    pub fn computer(&self) -> Option<Seat> {
        match self {
            Mode::TwoPlayer => None,
            Mode::VersusComputer { computer } => Some(*computer),
        }
    }
}

/// What a seat did on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Drew a move, scoring the listed cells.
    Played {
        /// The move drawn.
        mv: Move,
        /// Cells completed by the move.
        scored: Vec<CellId>,
    },
    /// Gave up the turn.
    Passed,
}

/// One entry in the game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The seat that acted.
    pub seat: Seat,
    /// What it did.
    pub action: TurnAction,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            TurnAction::Played { mv, scored } if scored.is_empty() => write!(f, "{} played {}", self.seat, mv),
            TurnAction::Played { mv, scored } => {
                write!(f, "{} played {} and scored {}", self.seat, mv, scored.len())
            }
            TurnAction::Passed => write!(f, "{} passed", self.seat),
        }
    }
}

/// Turns taken by one controller call, including any computer reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Turns in the order they were taken.
    pub turns: Vec<Turn>,
    /// Phase after the last turn.
    pub phase: Phase,
}

/// Error from a controller operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum TurnError {
    /// The game has finished.
    #[display("Game is already over")]
    #[from(ignore)]
    GameOver,

    /// Another seat is to move.
    #[display("It is not {}'s turn", _0)]
    #[from(ignore)]
    NotYourTurn(Seat),

    /// The move is not legal in the current state.
    #[display("Move rejected: {}", _0)]
    Rejected(MoveRejection),

    /// The move could not be applied.
    #[display("{}", _0)]
    Apply(ApplyError),

    /// The game could not be created.
    #[display("{}", _0)]
    Setup(SetupError),

    /// No seat is played by the computer.
    #[display("This game has no computer seat")]
    #[from(ignore)]
    NoComputer,

    /// A postcondition failed after a move.
    #[display("Invariant violation: {}", _0)]
    #[from(ignore)]
    InvariantViolation(String),
}

impl std::error::Error for TurnError {}

// ─────────────────────────────────────────────────────────────
//  Controller
// ─────────────────────────────────────────────────────────────

/// Runs one game session: validates moves, alternates turns, detects the
/// end of the game and plays the computer seat.
#[derive(Debug, Clone)]
pub struct TurnController {
    mode: Mode,
    state: GameState,
    phase: Phase,
    history: Vec<Turn>,
    searcher: Searcher,
    auto_reply: bool,
}

impl TurnController {
    /// Builds the lattice and starts a game with seat 1 to move.
    ///
    /// If the computer holds seat 1 it moves before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::Setup`] for a malformed profile or length.
    pub fn new(rows: &[usize], required_length: usize, mode: Mode, search: SearchConfig) -> Result<Self, TurnError> {
        Self::build(rows, required_length, mode, search, true)
    }

    /// Like [`new`](Self::new), but the computer only moves when
    /// [`play_computer`](Self::play_computer) is called.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::Setup`] for a malformed profile or length.
    pub fn manual(rows: &[usize], required_length: usize, mode: Mode, search: SearchConfig) -> Result<Self, TurnError> {
        Self::build(rows, required_length, mode, search, false)
    }

    #[instrument(skip(search))]
    fn build(
        rows: &[usize],
        required_length: usize,
        mode: Mode,
        search: SearchConfig,
        auto_reply: bool,
    ) -> Result<Self, TurnError> {
        let lattice = Lattice::build(rows).map_err(SetupError::from)?;
        let state = GameState::new(Arc::new(lattice), required_length)?;
        let search = match mode.computer() {
            Some(computer) => SearchConfig { computer, ..search },
            None => search,
        };
        let mut controller = Self {
            mode,
            state,
            phase: Phase::AwaitingMove(Seat::ONE),
            history: Vec::new(),
            searcher: Searcher::new(search),
            auto_reply,
        };
        controller.settle();
        controller.computer_reply()?;
        Ok(controller)
    }

    /// The live game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seat assignment.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Every turn taken so far.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Search counters for the computer seat.
    pub fn search_stats(&self) -> &SearchStats {
        self.searcher.stats()
    }

    /// The result, once the game has finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.is_finished().then(|| rules::outcome(&self.state))
    }

    /// Validates a point pair without changing anything.
    ///
    /// # Errors
    ///
    /// [`TurnError::GameOver`] once finished, otherwise the rejection reason.
    #[instrument(skip(self), fields(from = %a, to = %b))]
    pub fn propose(&self, a: Point, b: Point) -> Result<Move, TurnError> {
        if self.phase.is_finished() {
            return Err(TurnError::GameOver);
        }
        Ok(rules::resolve(&self.state, a, b)?)
    }

    /// Commits a move for `seat`, then lets the computer reply.
    ///
    /// The move is resolved again against the live state, so a stale
    /// proposal that lost its new ground is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError`] if the game is over, it is not `seat`'s turn,
    /// or the move is no longer legal.
    #[instrument(skip(self, mv), fields(mv = %mv))]
    pub fn commit(&mut self, seat: Seat, mv: &Move) -> Result<TurnReport, TurnError> {
        self.expect_turn(seat)?;
        let fresh = rules::resolve(&self.state, mv.from(), mv.to())?;
        let mut turns = vec![self.apply_turn(seat, fresh)?];
        turns.extend(self.computer_reply()?);
        Ok(self.report(turns))
    }

    /// Resolves and commits in one step.
    ///
    /// # Errors
    ///
    /// Same as [`propose`](Self::propose) and [`commit`](Self::commit).
    pub fn play(&mut self, seat: Seat, a: Point, b: Point) -> Result<TurnReport, TurnError> {
        self.expect_turn(seat)?;
        let mv = self.propose(a, b)?;
        self.commit(seat, &mv)
    }

    /// Gives up `seat`'s turn.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError`] if the game is over or it is not `seat`'s turn.
    #[instrument(skip(self))]
    pub fn pass(&mut self, seat: Seat) -> Result<TurnReport, TurnError> {
        self.expect_turn(seat)?;
        let mut turns = vec![self.record(seat, TurnAction::Passed)?];
        turns.extend(self.computer_reply()?);
        Ok(self.report(turns))
    }

    /// Plays the computer's turn now.
    ///
    /// # Errors
    ///
    /// [`TurnError::NoComputer`] without a computer seat, otherwise the same
    /// errors as [`pass`](Self::pass).
    #[instrument(skip(self))]
    pub fn play_computer(&mut self) -> Result<TurnReport, TurnError> {
        let computer = self.mode.computer().ok_or(TurnError::NoComputer)?;
        self.expect_turn(computer)?;
        let turn = self.computer_turn(computer)?;
        Ok(self.report(vec![turn]))
    }

    /// Whether the controller moves for the computer on its own.
    pub fn auto_reply(&self) -> bool {
        self.auto_reply
    }

    /// Turns automatic computer replies on or off.
    pub fn set_auto_reply(&mut self, on: bool) {
        self.auto_reply = on;
    }

    /// Starts over on a freshly built board with seat 1 to move.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError`] if the computer's opening move fails its checks.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<TurnReport, TurnError> {
        let lattice = Lattice::build(self.state.lattice().rows()).map_err(SetupError::from)?;
        self.state = GameState::new(Arc::new(lattice), self.state.required_length())?;
        self.history.clear();
        self.phase = Phase::AwaitingMove(Seat::ONE);
        self.settle();
        let turns = self.computer_reply()?.into_iter().collect();
        Ok(self.report(turns))
    }

    fn expect_turn(&self, seat: Seat) -> Result<(), TurnError> {
        match self.phase {
            Phase::Finished => Err(TurnError::GameOver),
            Phase::AwaitingMove(current) if current != seat => Err(TurnError::NotYourTurn(seat)),
            Phase::AwaitingMove(_) => Ok(()),
        }
    }

    fn apply_turn(&mut self, seat: Seat, mv: Move) -> Result<Turn, TurnError> {
        let scored = rules::apply_in_place(&mut self.state, &mv, seat)?;
        self.record(seat, TurnAction::Played { mv, scored })
    }

    /// Appends the turn, flips the seat and settles the phase.
    fn record(&mut self, seat: Seat, action: TurnAction) -> Result<Turn, TurnError> {
        let turn = Turn { seat, action };
        debug!(%turn, "Turn taken");
        self.history.push(turn.clone());
        self.state.set_current_seat(seat.other());
        self.phase = Phase::AwaitingMove(seat.other());
        self.settle();
        self.verify()?;
        Ok(turn)
    }

    /// Finishes the game if no move can follow.
    fn settle(&mut self) {
        if !self.phase.is_finished() && rules::is_terminal(&self.state) {
            self.phase = Phase::Finished;
            let (one, two) = self.state.scores();
            info!(
                outcome = %rules::outcome(&self.state),
                seat_one = one,
                seat_two = two,
                complete = self.state.is_complete(),
                "Game over"
            );
        }
    }

    /// Plays the computer's turn if it is to move and replies are automatic.
    fn computer_reply(&mut self) -> Result<Option<Turn>, TurnError> {
        match self.mode.computer() {
            Some(computer) if self.auto_reply && self.phase == Phase::AwaitingMove(computer) => {
                self.computer_turn(computer).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn computer_turn(&mut self, computer: Seat) -> Result<Turn, TurnError> {
        let turn = match self.searcher.choose_move(&self.state) {
            Some(mv) => self.apply_turn(computer, mv)?,
            None => {
                warn!(seat = %computer, "Computer found no move, passing");
                self.record(computer, TurnAction::Passed)?
            }
        };
        Ok(turn)
    }

    fn report(&self, turns: Vec<Turn>) -> TurnReport {
        TurnReport {
            turns,
            phase: self.phase,
        }
    }

    /// Postcondition checks, debug builds only.
    fn verify(&self) -> Result<(), TurnError> {
        #[cfg(debug_assertions)]
        {
            use crate::invariants::{AlternatingTurnInvariant, BoardInvariants, Invariant, InvariantSet};

            let mut failed: Vec<String> = match BoardInvariants::check_all(&self.state) {
                Ok(()) => Vec::new(),
                Err(violations) => violations.into_iter().map(|v| v.description).collect(),
            };
            if !AlternatingTurnInvariant::holds(self) {
                failed.push(AlternatingTurnInvariant::description().to_string());
            }
            if !failed.is_empty() {
                return Err(TurnError::InvariantViolation(format!(
                    "Postcondition failed: {}",
                    failed.join("; ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::BoardSize;

    fn small(mode: Mode) -> TurnController {
        let search = SearchConfig {
            seed: Some(1),
            depth: 2,
            ..SearchConfig::default()
        };
        TurnController::new(&BoardSize::Small.rows(), 3, mode, search).expect("valid setup")
    }

    #[test]
    fn test_two_player_alternates() {
        let mut game = small(Mode::TwoPlayer);
        let report = game
            .play(Seat::ONE, Point::new(2, 0), Point::new(2, 3))
            .expect("legal");
        assert_eq!(report.phase, Phase::AwaitingMove(Seat::TWO));
        assert_eq!(report.turns.len(), 1);
        assert_eq!(game.state().current_seat(), Seat::TWO);
    }

    #[test]
    fn test_wrong_seat_rejected() {
        let mut game = small(Mode::TwoPlayer);
        let err = game
            .play(Seat::TWO, Point::new(2, 0), Point::new(2, 3))
            .unwrap_err();
        assert_eq!(err, TurnError::NotYourTurn(Seat::TWO));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_stale_proposal_rejected_on_commit() {
        let mut game = small(Mode::TwoPlayer);
        let mv = game.propose(Point::new(2, 0), Point::new(2, 3)).expect("legal");
        game.commit(Seat::ONE, &mv).expect("first commit");
        game.pass(Seat::TWO).expect("pass");
        let err = game.commit(Seat::ONE, &mv).unwrap_err();
        assert_eq!(err, TurnError::Rejected(MoveRejection::NoNewGround));
    }

    #[test]
    fn test_computer_replies_after_human() {
        let mut game = small(Mode::VersusComputer { computer: Seat::TWO });
        let report = game
            .play(Seat::ONE, Point::new(2, 0), Point::new(2, 3))
            .expect("legal");
        assert_eq!(report.turns.len(), 2);
        assert_eq!(report.turns[1].seat, Seat::TWO);
        assert_eq!(game.phase(), Phase::AwaitingMove(Seat::ONE));
    }

    #[test]
    fn test_computer_opens_as_seat_one() {
        let game = small(Mode::VersusComputer { computer: Seat::ONE });
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].seat, Seat::ONE);
        assert_eq!(game.phase(), Phase::AwaitingMove(Seat::TWO));
    }

    #[test]
    fn test_manual_controller_waits_for_computer() {
        let search = SearchConfig {
            seed: Some(1),
            depth: 2,
            ..SearchConfig::default()
        };
        let mode = Mode::VersusComputer { computer: Seat::ONE };
        let mut game =
            TurnController::manual(&BoardSize::Small.rows(), 3, mode, search).expect("valid setup");
        assert!(!game.auto_reply());
        assert!(game.history().is_empty());
        assert_eq!(game.phase(), Phase::AwaitingMove(Seat::ONE));

        let report = game.play_computer().expect("computer moves");
        assert_eq!(report.turns.len(), 1);
        assert_eq!(report.turns[0].seat, Seat::ONE);
        assert_eq!(game.play_computer(), Err(TurnError::NotYourTurn(Seat::ONE)));

        let report = game
            .play(Seat::TWO, Point::new(2, 0), Point::new(2, 3))
            .or_else(|_| game.pass(Seat::TWO))
            .expect("seat 2 acts");
        assert_eq!(report.turns.len(), 1, "no automatic reply");
        assert_eq!(game.phase(), Phase::AwaitingMove(Seat::ONE));
    }

    #[test]
    fn test_play_computer_needs_a_computer_seat() {
        let mut game = small(Mode::TwoPlayer);
        assert_eq!(game.play_computer(), Err(TurnError::NoComputer));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut game = small(Mode::TwoPlayer);
        game.play(Seat::ONE, Point::new(2, 0), Point::new(2, 3))
            .expect("legal");
        let report = game.reset().expect("reset");
        assert!(report.turns.is_empty());
        assert!(game.history().is_empty());
        assert_eq!(game.phase(), Phase::AwaitingMove(Seat::ONE));
        assert_eq!(game.state().filled_count(), 0);
    }

    #[test]
    fn test_finished_game_rejects_everything() {
        let mut game = small(Mode::TwoPlayer);
        let mut seat = Seat::ONE;
        while let Some(mv) = rules::legal_moves(game.state()).pop() {
            game.commit(seat, &mv).expect("legal");
            seat = seat.other();
        }
        assert!(game.phase().is_finished());
        assert!(game.outcome().is_some());
        assert_eq!(
            game.propose(Point::new(2, 0), Point::new(2, 3)),
            Err(TurnError::GameOver)
        );
        assert_eq!(game.pass(seat), Err(TurnError::GameOver));
    }

    #[test]
    fn test_history_serializes() {
        let mut game = small(Mode::TwoPlayer);
        game.play(Seat::ONE, Point::new(2, 0), Point::new(2, 3))
            .expect("legal");
        game.pass(Seat::TWO).expect("pass");
        let json = serde_json::to_string(game.history()).expect("serializes");
        let back: Vec<Turn> = serde_json::from_str(&json).expect("parses");
        assert_eq!(back, game.history());
    }

    #[test]
    fn test_bad_profile_is_setup_error() {
        let err = TurnController::new(&[3], 3, Mode::TwoPlayer, SearchConfig::default()).unwrap_err();
        assert!(matches!(err, TurnError::Setup(SetupError::Profile(_))));
    }
}
