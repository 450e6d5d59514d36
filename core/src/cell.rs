use serde::{Deserialize, Serialize};

/// Stamp left on a cell by the end-of-game mine sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineMarker {
    /// Flag placed on a mine.
    CorrectFlag,
    /// Flag placed on a safe cell.
    WrongFlag,
    /// Mine nobody flagged.
    ExposedMine,
}

/// State stored for every grid position, border cells included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) open: bool,
    pub(crate) flagged: bool,
    pub(crate) marker: Option<MineMarker>,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    /// Number of mines among the eight neighbors. Meaningless for mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// What a renderer should draw for this cell.
    pub const fn view(&self) -> CellView {
        match (self.marker, self.open, self.mine) {
            (_, true, true) => CellView::Detonated,
            (_, true, false) => CellView::Open(self.adjacent_mines),
            (Some(MineMarker::CorrectFlag), _, _) => CellView::CorrectFlag,
            (Some(MineMarker::WrongFlag), _, _) => CellView::WrongFlag,
            (Some(MineMarker::ExposedMine), _, _) => CellView::ExposedMine,
            (None, false, _) if self.flagged => CellView::Flagged,
            (None, false, _) => CellView::Closed,
        }
    }
}

/// Player-visible state of a cell, the only thing the presentation layer needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Closed,
    Flagged,
    /// Opened safe cell with its adjacent mine count, 0 renders blank.
    Open(u8),
    /// The mine that was opened.
    Detonated,
    CorrectFlag,
    WrongFlag,
    ExposedMine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Closed
    }
}
