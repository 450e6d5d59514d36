use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw one frame of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub difficulty: Difficulty,
    pub rows: Coord,
    pub columns: Coord,
    pub phase: Phase,
    pub remaining_flags: CellCount,
    pub elapsed_secs: u64,
    /// Playable cells only, `cells[[row - 1, col - 1]]`.
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let grid = session.grid();
        let mut cells = Array2::default((usize::from(grid.rows()), usize::from(grid.columns())));
        grid.for_each_playable_cell(|(row, col), cell| {
            cells[[usize::from(row) - 1, usize::from(col) - 1]] = cell.view();
        });

        Self {
            difficulty: session.difficulty(),
            rows: grid.rows(),
            columns: grid.columns(),
            phase: session.phase(),
            remaining_flags: session.remaining_flags(),
            elapsed_secs: session.elapsed().as_secs(),
            cells,
        }
    }

    /// View of the playable cell at 1-indexed `coords`.
    pub fn cell(&self, (row, col): Coord2) -> CellView {
        self.cells[[usize::from(row) - 1, usize::from(col) - 1]]
    }
}
