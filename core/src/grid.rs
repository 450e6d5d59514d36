use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size cell storage with a one-cell sentinel border.
///
/// The backing array is `(rows + 2) x (columns + 2)`. Playable cells live at
/// `1..=rows` by `1..=columns`; row/column `0` and `rows + 1`/`columns + 1` form the
/// border, which never holds a mine, is never opened or flagged, and exists only so
/// that every playable cell has eight addressable neighbors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    rows: Coord,
    columns: Coord,
}

impl Grid {
    pub fn new(rows: Coord, columns: Coord) -> Self {
        assert!(
            rows > 0 && columns > 0 && rows < Coord::MAX && columns < Coord::MAX,
            "grid of {rows}x{columns} does not fit the coordinate type"
        );
        let dim = (usize::from(rows) + 2, usize::from(columns) + 2);
        Self {
            cells: Array2::default(dim),
            rows,
            columns,
        }
    }

    /// Builds a populated grid with mines at exactly `mine_coords`, adjacency included.
    pub fn from_mine_coords(rows: Coord, columns: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(rows, columns);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].mine = true;
        }
        compute_adjacency_counts(&mut grid);
        Ok(grid)
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn columns(&self) -> Coord {
        self.columns
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.rows, self.columns)
    }

    pub fn is_playable(&self, (row, col): Coord2) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.columns).contains(&col)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_playable(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// The eight coordinates around a playable cell, border cells included.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords)
    }

    /// Playable coordinates in row-major order.
    pub fn playable_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, columns) = (self.rows, self.columns);
        (1..=rows).flat_map(move |row| (1..=columns).map(move |col| (row, col)))
    }

    pub fn for_each_playable_cell(&self, mut f: impl FnMut(Coord2, &Cell)) {
        for coords in self.playable_coords() {
            f(coords, &self[coords]);
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(Cell::is_mine)
    }

    pub fn count_cells(&self, mut pred: impl FnMut(&Cell) -> bool) -> CellCount {
        let mut count = 0;
        self.for_each_playable_cell(|_, cell| {
            if pred(cell) {
                count += 1;
            }
        });
        count
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd_index(coords)]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[nd_index(coords)]
    }
}

/// Debug dump of the layout: `*` for a mine, the adjacency count otherwise.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.rows {
            for col in 1..=self.columns {
                if col > 1 {
                    f.write_str(" ")?;
                }
                let cell = &self[(row, col)];
                if cell.mine {
                    f.write_str("*")?;
                } else {
                    write!(f, "{}", cell.adjacent_mines)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_surrounds_playable_region() {
        let grid = Grid::new(2, 3);

        assert!(grid.is_playable((1, 1)));
        assert!(grid.is_playable((2, 3)));
        assert!(!grid.is_playable((0, 1)));
        assert!(!grid.is_playable((3, 1)));
        assert!(!grid.is_playable((1, 4)));
        // corner neighbors reach into the border without panicking
        assert_eq!(grid.neighbors((1, 1)).filter(|&c| grid[c].is_open()).count(), 0);
    }

    #[test]
    fn playable_coords_are_row_major() {
        let grid = Grid::new(2, 2);

        let coords: Vec<_> = grid.playable_coords().collect();

        assert_eq!(coords, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn from_mine_coords_rejects_border() {
        assert_eq!(
            Grid::from_mine_coords(3, 3, &[(0, 1)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn display_dumps_layout() {
        let grid = Grid::from_mine_coords(2, 3, &[(1, 1)]).unwrap();

        assert_eq!(grid.to_string(), "* 1 0\n1 1 0\n");
    }
}
