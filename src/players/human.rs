//! Human player reading moves as text.

use super::{Choice, Player};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;
use trilines_engine::{Point, TurnController};

/// Parses one line of input.
///
/// Accepts `r,c r,c`, `pass` or `quit`. The error is a message for the player.
pub fn parse_command(line: &str) -> Result<Choice, String> {
    let words: Vec<_> = line.split_whitespace().collect();
    match words.as_slice() {
        ["quit" | "q" | "exit"] => Ok(Choice::Quit),
        ["pass"] => Ok(Choice::Pass),
        [a, b] => {
            let a = Point::parse(a).ok_or_else(|| format!("Not a point: {a}"))?;
            let b = Point::parse(b).ok_or_else(|| format!("Not a point: {b}"))?;
            Ok(Choice::Play(a, b))
        }
        _ => Err("Enter two points like `2,0 2,3`, or `pass`, or `quit`".to_string()),
    }
}

/// Human player reading one command per line.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a human player over the given streams.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn choose(&mut self, game: &TurnController) -> Result<Choice> {
        let seat = game.state().current_seat();
        loop {
            write!(self.output, "{} ({})> ", self.name, seat)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!(player = %self.name, "Input closed");
                return Ok(Choice::Quit);
            }
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(choice) => return Ok(choice),
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
