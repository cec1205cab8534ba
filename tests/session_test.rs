//! Sessions driven by scripted players.

use std::time::Duration;
use trilines::{
    BoardSize, EventSink, GameEvent, GameState, HumanPlayer, Mode, SearchConfig, Seat, Session, TextSink,
    TurnController, run_selfplay,
};
use trilines::{GameConfig, Overrides};

fn controller(mode: Mode) -> TurnController {
    let search = SearchConfig {
        depth: 2,
        seed: Some(3),
        ..SearchConfig::default()
    };
    TurnController::manual(&BoardSize::Small.rows(), 3, mode, search).expect("valid setup")
}

/// Records each event with the number of drawn edges it was emitted against.
#[derive(Default)]
struct DrawnEdges(Vec<(GameEvent, usize)>);

impl EventSink for DrawnEdges {
    fn emit(&mut self, event: &GameEvent, state: &GameState) -> anyhow::Result<()> {
        let drawn = state.edges().filter(|(_, edge)| edge.drawn()).count();
        self.0.push((event.clone(), drawn));
        Ok(())
    }
}

#[test]
fn test_human_against_computer_events() {
    let script = "0,0 0,2\n2,0 2,3\nquit\n".as_bytes();
    let human = HumanPlayer::new("tester", script, std::io::sink());
    let mut session = Session::new(
        controller(Mode::VersusComputer { computer: Seat::TWO }),
        Vec::new(),
        Duration::ZERO,
    )
    .with_player(&[Seat::ONE], Box::new(human));

    let outcome = session.run().expect("runs");
    assert_eq!(outcome, None, "player quit");
    let events = session.into_sink();

    assert!(matches!(events[0], GameEvent::Started { required_length: 3, .. }));
    assert!(matches!(events[1], GameEvent::Rejected { seat: Seat::ONE, .. }));
    assert!(matches!(events[2], GameEvent::MovePlayed { seat: Seat::ONE, .. }));
    assert!(matches!(events[3], GameEvent::StateChanged { .. }));
    assert!(matches!(events[4], GameEvent::ComputerThinking { seat: Seat::TWO }));
    assert!(matches!(events[5], GameEvent::MovePlayed { seat: Seat::TWO, .. }));
    assert!(matches!(events[6], GameEvent::StateChanged { .. }));
}

#[test]
fn test_computer_thinks_before_it_moves() {
    let human = HumanPlayer::new("tester", "quit\n".as_bytes(), std::io::sink());
    let mut session = Session::new(
        controller(Mode::VersusComputer { computer: Seat::ONE }),
        DrawnEdges::default(),
        Duration::ZERO,
    )
    .with_player(&[Seat::TWO], Box::new(human));

    assert_eq!(session.run().expect("runs"), None);
    assert_eq!(session.controller().history().len(), 1);
    let events = session.into_sink().0;

    assert!(matches!(events[0], (GameEvent::Started { .. }, 0)));
    assert!(matches!(events[1], (GameEvent::ComputerThinking { seat: Seat::ONE }, 0)));
    assert!(matches!(events[2].0, GameEvent::MovePlayed { seat: Seat::ONE, .. }));
    assert!(events[2].1 >= 3, "opening move is drawn after thinking");
}

#[test]
fn test_text_sink_draws_the_board() {
    let script = "2,0 2,3\nquit\n".as_bytes();
    let human = HumanPlayer::new("tester", script, std::io::sink());
    let mut out = Vec::new();
    let mut session = Session::new(controller(Mode::TwoPlayer), TextSink::new(&mut out), Duration::ZERO)
        .with_player(&[Seat::ONE, Seat::TWO], Box::new(human));
    session.run().expect("runs");
    drop(session);

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("seat 1 played 2,0 -> 2,3"), "{text}");
    assert!(text.contains(" 2 0111"), "{text}");
}

#[test]
fn test_selfplay_finishes_every_game() {
    let config = GameConfig::default()
        .with_overrides(&Overrides {
            board: Some(BoardSize::Small),
            depth: Some(2),
            seed: Some(8),
            ..Overrides::default()
        })
        .expect("valid");
    let summary = run_selfplay(&config, 3).expect("runs");
    assert_eq!(summary.games, 3);
    assert_eq!(summary.seat_one_wins + summary.seat_two_wins + summary.draws, 3);
    // Border lines of the small board are too short for three-edge moves.
    assert_eq!(summary.blocked_endings, 3);
}
