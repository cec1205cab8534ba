//! Configuration file loading.

use std::io::Write;
use trilines::{BoardSize, GameConfig, Mode, Opponent, Overrides, Seat};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
board = "large"
required_length = 4
opponent = "computer"
computer_seat = 1
think_delay_ms = 0

[search]
depth = 2
pruning = false
seed = 99
"#
    )
    .expect("write");

    let config = GameConfig::from_file(file.path()).expect("loads");
    assert_eq!(config.profile(), BoardSize::Large.rows());
    assert_eq!(*config.required_length(), 4);
    assert_eq!(config.mode(), Mode::VersusComputer { computer: Seat::ONE });
    let search = config.search_config();
    assert_eq!(search.depth, 2);
    assert!(!search.pruning);
    assert_eq!(search.seed, Some(99));
    assert_eq!(search.computer, Seat::ONE);
}

#[test]
fn test_missing_file_means_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = GameConfig::load_or_default(dir.path().join("trilines.toml")).expect("defaults");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "board = [1, 2").expect("write");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_explicit_rows_and_overrides() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "rows = [2, 3, 2]\nrequired_length = 1").expect("write");
    let config = GameConfig::from_file(file.path()).expect("loads");
    assert_eq!(config.profile(), vec![2, 3, 2]);

    let overrides = Overrides {
        opponent: Some(Opponent::Human),
        required_length: Some(2),
        ..Overrides::default()
    };
    let config = config.with_overrides(&overrides).expect("valid");
    assert_eq!(config.mode(), Mode::TwoPlayer);
    assert_eq!(*config.required_length(), 2);
    assert_eq!(config.profile(), vec![2, 3, 2]);
}
