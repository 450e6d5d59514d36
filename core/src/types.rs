/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag budgets, and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`, 1-indexed inside the playable region.
pub type Coord2 = (Coord, Coord);

/// Index of `coords` in the bordered backing array.
pub(crate) fn nd_index((row, column): Coord2) -> [usize; 2] {
    [usize::from(row), usize::from(column)]
}

/// Cell count of a `rows` by `columns` board. 255 * 255 still fits a `CellCount`.
pub const fn area(rows: Coord, columns: Coord) -> CellCount {
    rows as CellCount * columns as CellCount
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Yields the eight coordinates surrounding `center`.
///
/// There is no bounds checking: the grid keeps a one-cell border around the playable
/// region, so every neighbor of a playable cell is a valid index.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2) -> Self {
        debug_assert!(center.0 > 0 && center.1 > 0, "border cells have no neighbors");
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (dr, dc) = *DISPLACEMENTS.get(usize::from(self.index))?;
        self.index += 1;
        let (row, col) = self.center;
        Some((row.wrapping_add_signed(dr), col.wrapping_add_signed(dc)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = DISPLACEMENTS.len() - usize::from(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for NeighborIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_the_eight_surrounding_cells() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&(0, 0)));
        assert!(neighbors.contains(&(2, 2)));
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn largest_board_area_fits() {
        assert_eq!(area(255, 255), 65_025);
        assert_eq!(nd_index((3, 7)), [3, 7]);
    }
}
