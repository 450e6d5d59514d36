use core::str::FromStr;
use sapper_core::{Coord, Coord2, Difficulty, GameError};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Difficulty(Difficulty),
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `h` for help")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `{0} <row> <col>`")]
    BadCoords(String),
    #[error("Unexpected input after command: {0:?}")]
    Trailing(String),
    #[error(transparent)]
    Difficulty(#[from] GameError),
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  d <easy|medium|hard>   new game on another board
  n               new game
  h               this help
  q               quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match verb {
            "r" | "reveal" | "o" | "open" => Command::Reveal(parse_coords(verb, &mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(verb, &mut words)?),
            "d" | "difficulty" => Command::Difficulty(words.next().unwrap_or_default().parse()?),
            "n" | "new" | "restart" => Command::Restart,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandError::Trailing(rest.join(" ")));
        }
        Ok(command)
    }
}

fn parse_coords<'a>(verb: &str, words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let mut next = || -> Option<Coord> { words.next()?.parse().ok() };
    match (next(), next()) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(CommandError::BadCoords(verb.to_owned())),
    }
}
