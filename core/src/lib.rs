use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use grid::*;
pub use layout::*;
pub use records::*;
pub use session::*;
pub use snapshot::*;
pub use timer::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod game;
mod grid;
mod layout;
mod records;
mod session;
mod snapshot;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn total_cells(&self) -> CellCount {
        area(self.rows, self.columns)
    }
}

/// The three board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig {
                rows: 8,
                columns: 10,
                mines: 10,
            },
            Self::Medium => GameConfig {
                rows: 14,
                columns: 18,
                mines: 40,
            },
            Self::Hard => GameConfig {
                rows: 20,
                columns: 24,
                mines: 99,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name() == s)
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "win" => Some(Self::Win),
            "lose" => Some(Self::Lose),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One finished game, as reported by the session and stored in the record ledger.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub elapsed_secs: f64,
    pub outcome: Outcome,
    pub difficulty: Difficulty,
}
