use ndarray::Array2;

use crate::*;

/// Outcome of a reveal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already open, flagged, or the game does not accept moves.
    NoChange,
    /// Safe cells opened by this request, flood-filled ones included.
    Opened(Vec<Coord2>),
    /// The revealed cell held a mine.
    MineHit(Coord2),
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagResult {
    NoChange,
    Placed,
    Removed,
    /// No flags left to place.
    Refused,
}

/// Opens the cell at `coords`, flood-filling from it when it has no adjacent mines.
///
/// Open and flagged cells are inert. Flood fill opens the connected zero-count region
/// plus the numbered cells bordering it, and leaves flagged cells closed.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> RevealOutcome {
    if !grid.is_playable(coords) {
        return RevealOutcome::NoChange;
    }

    let cell = grid[coords];
    if cell.open || cell.flagged {
        return RevealOutcome::NoChange;
    }

    if cell.mine {
        grid[coords].open = true;
        log::debug!("Mine hit at {:?}", coords);
        return RevealOutcome::MineHit(coords);
    }

    if cell.adjacent_mines > 0 {
        grid[coords].open = true;
        log::debug!("Open cell at {:?}, mine count: {}", coords, cell.adjacent_mines);
        return RevealOutcome::Opened(vec![coords]);
    }

    RevealOutcome::Opened(flood_fill(grid, coords))
}

fn flood_fill(grid: &mut Grid, start: Coord2) -> Vec<Coord2> {
    let dim = (usize::from(grid.rows()) + 2, usize::from(grid.columns()) + 2);
    let mut queued = Array2::from_elem(dim, false);
    let mut to_visit = vec![start];
    let mut opened = Vec::new();
    queued[nd_index(start)] = true;
    log::trace!("Starting flood-fill from {:?}", start);

    while let Some(visit_coords) = to_visit.pop() {
        if grid[visit_coords].open {
            continue;
        }

        grid[visit_coords].open = true;
        opened.push(visit_coords);
        let count = grid[visit_coords].adjacent_mines;
        log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, count);

        if count == 0 {
            for pos in grid.neighbors(visit_coords) {
                let cell = &grid[pos];
                if grid.is_playable(pos) && !queued[nd_index(pos)] && !cell.open && !cell.flagged {
                    queued[nd_index(pos)] = true;
                    to_visit.push(pos);
                }
            }
        }
    }

    log::debug!("Flood-fill from {:?} opened {} cells", start, opened.len());
    opened
}

/// Flips the flag on a closed cell, spending or refunding one unit of `remaining_flags`.
pub fn toggle_flag(grid: &mut Grid, coords: Coord2, remaining_flags: &mut CellCount) -> FlagResult {
    if !grid.is_playable(coords) || grid[coords].open {
        return FlagResult::NoChange;
    }

    let cell = &mut grid[coords];
    if cell.flagged {
        cell.flagged = false;
        *remaining_flags += 1;
        FlagResult::Removed
    } else if *remaining_flags == 0 {
        FlagResult::Refused
    } else {
        cell.flagged = true;
        *remaining_flags -= 1;
        FlagResult::Placed
    }
}

/// Stamps every flagged or mined cell with its end-of-game marker.
///
/// Only presentation state changes: open and mine state stay as they are.
pub fn reveal_all_mines(grid: &mut Grid) {
    for coords in grid.playable_coords() {
        let cell = &mut grid[coords];
        cell.marker = match (cell.mine, cell.flagged) {
            (true, true) => Some(MineMarker::CorrectFlag),
            (false, true) => Some(MineMarker::WrongFlag),
            (true, false) => Some(MineMarker::ExposedMine),
            (false, false) => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Column 3 is a wall of mines, column 1 is all zeros, column 2 all numbered.
    fn walled() -> Grid {
        let mines: Vec<Coord2> = (1..=5).map(|row| (row, 3)).collect();
        Grid::from_mine_coords(5, 5, &mines).unwrap()
    }

    #[test]
    fn flood_fill_opens_zero_region_and_its_border() {
        let mut grid = walled();

        let RevealOutcome::Opened(mut opened) = reveal(&mut grid, (3, 1)) else {
            panic!("expected cells to open");
        };

        opened.sort_unstable();
        let mut expected: Vec<Coord2> = (1..=5).flat_map(|row| [(row, 1), (row, 2)]).collect();
        expected.sort_unstable();
        assert_eq!(opened, expected);
        assert_eq!(grid.count_cells(|c| c.is_open() && c.is_mine()), 0);
        assert!(!grid[(3, 4)].is_open());
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let mut grid = walled();

        assert_eq!(reveal(&mut grid, (2, 2)), RevealOutcome::Opened(vec![(2, 2)]));
        assert_eq!(grid.count_cells(|c| c.is_open()), 1);
    }

    #[test]
    fn opened_cell_is_inert() {
        let mut grid = walled();
        reveal(&mut grid, (2, 2));

        assert_eq!(reveal(&mut grid, (2, 2)), RevealOutcome::NoChange);
    }

    #[test]
    fn flagged_cell_is_inert_and_blocks_flood() {
        let mut grid = walled();
        let mut flags = 5;
        toggle_flag(&mut grid, (5, 1), &mut flags);

        assert_eq!(reveal(&mut grid, (5, 1)), RevealOutcome::NoChange);
        reveal(&mut grid, (1, 1));

        assert!(!grid[(5, 1)].is_open());
        assert!(grid[(5, 1)].is_flagged());
        assert!(grid[(4, 1)].is_open());
    }

    #[test]
    fn revealing_mine_reports_hit() {
        let mut grid = walled();

        assert_eq!(reveal(&mut grid, (4, 3)), RevealOutcome::MineHit((4, 3)));
        assert!(grid[(4, 3)].is_open());
    }

    #[test]
    fn flag_budget_is_enforced() {
        let mut grid = walled();
        let mut flags = 1;

        assert_eq!(toggle_flag(&mut grid, (1, 3), &mut flags), FlagResult::Placed);
        assert_eq!(flags, 0);
        assert_eq!(toggle_flag(&mut grid, (2, 3), &mut flags), FlagResult::Refused);
        assert!(!grid[(2, 3)].is_flagged());
        assert_eq!(toggle_flag(&mut grid, (1, 3), &mut flags), FlagResult::Removed);
        assert_eq!(flags, 1);
        assert_eq!(grid[(1, 3)], walled()[(1, 3)]);
    }

    #[test]
    fn open_cells_cannot_be_flagged() {
        let mut grid = walled();
        let mut flags = 5;
        reveal(&mut grid, (2, 2));

        assert_eq!(toggle_flag(&mut grid, (2, 2), &mut flags), FlagResult::NoChange);
        assert_eq!(flags, 5);
    }

    #[test]
    fn sweep_categorizes_flags_and_mines() {
        let mut grid = walled();
        let mut flags = 5;
        toggle_flag(&mut grid, (1, 3), &mut flags);
        toggle_flag(&mut grid, (2, 4), &mut flags);
        reveal(&mut grid, (3, 3));

        reveal_all_mines(&mut grid);

        assert_eq!(grid[(1, 3)].view(), CellView::CorrectFlag);
        assert_eq!(grid[(2, 4)].view(), CellView::WrongFlag);
        assert_eq!(grid[(3, 3)].view(), CellView::Detonated);
        assert_eq!(grid[(4, 3)].view(), CellView::ExposedMine);
        assert_eq!(grid[(5, 5)].view(), CellView::Closed);
        assert!(!grid[(4, 3)].is_open());
    }
}
