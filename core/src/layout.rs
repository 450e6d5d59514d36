use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Cells that must stay safe when the game starts at `first`: the cell itself and its
/// playable neighbors, 4 to 9 cells depending on how close it is to an edge.
pub fn protected_region(grid: &Grid, first: Coord2) -> impl Iterator<Item = Coord2> + use<'_> {
    core::iter::once(first).chain(grid.neighbors(first).filter(|&pos| grid.is_playable(pos)))
}

/// Places exactly `mine_count` mines outside the protected region around `first`.
///
/// Every subset of `mine_count` candidate cells is equally likely: the candidates are
/// partially Fisher-Yates shuffled and the shuffled prefix becomes the mines.
pub fn place_mines<R: Rng + ?Sized>(
    grid: &mut Grid,
    first: Coord2,
    mine_count: CellCount,
    rng: &mut R,
) -> Result<()> {
    let first = grid.validate_coords(first)?;

    let mut candidates: Vec<Coord2> = {
        let protected: Vec<Coord2> = protected_region(grid, first).collect();
        grid.playable_coords()
            .filter(|pos| !protected.contains(pos))
            .collect()
    };

    let available = CellCount::try_from(candidates.len()).unwrap_or(CellCount::MAX);
    if mine_count > available {
        return Err(GameError::InsufficientSpace {
            requested: mine_count,
            available,
        });
    }

    let (chosen, _) = candidates.partial_shuffle(rng, mine_count.into());
    for &coords in chosen.iter() {
        grid[coords].mine = true;
    }

    log::debug!(
        "Placed {} mines on {}x{} grid, first reveal at {:?}",
        mine_count,
        grid.rows(),
        grid.columns(),
        first
    );
    Ok(())
}

/// Stores the number of adjacent mines in every safe playable cell.
pub fn compute_adjacency_counts(grid: &mut Grid) {
    for coords in grid.playable_coords() {
        let count = if grid[coords].mine {
            0
        } else {
            grid.count_adjacent_mines(coords)
        };
        grid[coords].adjacent_mines = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn places_exact_count_outside_protected_region() {
        for (seed, first) in [(1, (1, 1)), (2, (4, 5)), (3, (8, 10)), (4, (1, 6))] {
            let mut grid = Grid::new(8, 10);
            let mut rng = SmallRng::seed_from_u64(seed);

            place_mines(&mut grid, first, 10, &mut rng).unwrap();

            assert_eq!(grid.mine_count(), 10);
            for pos in protected_region(&grid, first) {
                assert!(!grid[pos].is_mine(), "mine in protected cell {pos:?}");
            }
        }
    }

    #[test]
    fn protected_region_shrinks_at_edges() {
        let grid = Grid::new(5, 5);

        assert_eq!(protected_region(&grid, (1, 1)).count(), 4);
        assert_eq!(protected_region(&grid, (1, 3)).count(), 6);
        assert_eq!(protected_region(&grid, (3, 3)).count(), 9);
    }

    #[test]
    fn refuses_when_mines_do_not_fit() {
        let mut grid = Grid::new(3, 3);
        let mut rng = SmallRng::seed_from_u64(7);

        let result = place_mines(&mut grid, (2, 2), 1, &mut rng);

        assert_eq!(
            result,
            Err(GameError::InsufficientSpace {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(grid.mine_count(), 0);
    }

    #[test]
    fn fills_every_candidate_when_count_matches() {
        let mut grid = Grid::new(3, 3);
        let mut rng = SmallRng::seed_from_u64(7);

        place_mines(&mut grid, (1, 1), 5, &mut rng).unwrap();

        assert_eq!(grid.mine_count(), 5);
    }

    #[test]
    fn adjacency_matches_brute_force_recount() {
        let mines = [(1, 1), (1, 2), (2, 4), (3, 3), (4, 1), (4, 4)];
        let grid = Grid::from_mine_coords(4, 4, &mines).unwrap();

        for coords in grid.playable_coords() {
            if grid[coords].is_mine() {
                continue;
            }
            let (row, col) = (i16::from(coords.0), i16::from(coords.1));
            let expected = mines
                .iter()
                .filter(|&&(r, c)| {
                    let (dr, dc) = (i16::from(r) - row, i16::from(c) - col);
                    (dr, dc) != (0, 0) && dr.abs() <= 1 && dc.abs() <= 1
                })
                .count();
            assert_eq!(usize::from(grid[coords].adjacent_mines()), expected, "at {coords:?}");
        }
        assert_eq!(grid[(2, 2)].adjacent_mines(), 3);
        assert_eq!(grid[(3, 4)].adjacent_mines(), 3);
    }
}
