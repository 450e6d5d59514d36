use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Not enough room for {requested} mines, only {available} cells are outside the protected region")]
    InsufficientSpace {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Unknown difficulty, expected one of: easy, medium, hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Malformed record line {line:?}: {reason}")]
    MalformedLine { line: String, reason: &'static str },
    #[error("Record ledger I/O failed")]
    Io(#[from] std::io::Error),
}
