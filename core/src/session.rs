use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Pending -> Active, on the first reveal
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No cell opened yet, mines not placed
    #[default]
    Pending,
    /// Timer running, moves accepted
    Active,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl Phase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to win or loss.
///
/// A session is never reset in place: restarting or changing difficulty means
/// building a new one.
#[derive(Clone, Debug)]
pub struct GameSession {
    difficulty: Difficulty,
    mine_count: CellCount,
    grid: Grid,
    populated: bool,
    phase: Phase,
    remaining_flags: CellCount,
    rng: SmallRng,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl GameSession {
    /// Fresh pending session; mines are placed from `seed` on the first reveal.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let config = difficulty.config();
        Self {
            difficulty,
            mine_count: config.mines,
            grid: Grid::new(config.rows, config.columns),
            populated: false,
            phase: Phase::Pending,
            remaining_flags: config.mines,
            rng: SmallRng::seed_from_u64(seed),
            started_at: None,
            ended_at: None,
        }
    }

    /// Pending session over an already populated grid, used for hand-built boards.
    ///
    /// The first reveal starts the timer but places no mines.
    pub fn with_layout(difficulty: Difficulty, grid: Grid) -> Self {
        let mine_count = grid.mine_count();
        Self {
            difficulty,
            mine_count,
            grid,
            populated: true,
            phase: Phase::Pending,
            remaining_flags: mine_count,
            rng: SmallRng::seed_from_u64(0),
            started_at: None,
            ended_at: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.remaining_flags
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.grid[coords].view())
    }

    /// Time since the first reveal, frozen once the game ends; zero before it starts.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// The final result, once the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        let outcome = match self.phase {
            Phase::Won => Outcome::Win,
            Phase::Lost => Outcome::Lose,
            Phase::Pending | Phase::Active => return None,
        };
        Some(GameResult {
            elapsed_secs: self.elapsed().as_secs_f64(),
            outcome,
            difficulty: self.difficulty,
        })
    }

    pub fn handle_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.phase.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        if self.phase.is_pending() {
            self.start(coords)?;
        }

        let outcome = engine::reveal(&mut self.grid, coords);
        match outcome {
            RevealOutcome::MineHit(_) => self.finish(Outcome::Lose),
            RevealOutcome::Opened(_) => self.evaluate_win(),
            RevealOutcome::NoChange => {}
        }
        Ok(outcome)
    }

    pub fn handle_flag_toggle(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.grid.validate_coords(coords)?;

        if !self.phase.is_active() {
            return Ok(FlagResult::NoChange);
        }

        let outcome = engine::toggle_flag(&mut self.grid, coords, &mut self.remaining_flags);
        log::debug!("Flag toggle at {:?}: {:?}, {} left", coords, outcome, self.remaining_flags);
        self.evaluate_win();
        Ok(outcome)
    }

    /// Pending -> Active: place mines, count neighbors, start the clock.
    fn start(&mut self, first: Coord2) -> Result<()> {
        if !self.populated {
            place_mines(&mut self.grid, first, self.mine_count, &mut self.rng)?;
            compute_adjacency_counts(&mut self.grid);
            self.populated = true;
            log::debug!("Board layout:\n{}", self.grid);
        }
        self.started_at = Some(Instant::now());
        self.phase = Phase::Active;
        log::debug!("Game started on {} board", self.difficulty);
        Ok(())
    }

    /// Only checked once every flag is placed; then every cell must be open or
    /// flagged and every flag must sit on a mine.
    fn evaluate_win(&mut self) {
        if !self.phase.is_active() || self.remaining_flags != 0 {
            return;
        }

        let settled = self.grid.count_cells(|cell| cell.is_open() || cell.is_flagged());
        let correct_flags = self.grid.count_cells(|cell| cell.is_mine() && cell.is_flagged());

        if settled == self.grid.total_cells() && correct_flags == self.mine_count {
            self.finish(Outcome::Win);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.phase.is_finished() {
            return;
        }

        self.ended_at = Some(Instant::now());
        self.phase = match outcome {
            Outcome::Win => Phase::Won,
            Outcome::Lose => Phase::Lost,
        };
        engine::reveal_all_mines(&mut self.grid);
        log::info!(
            "Game {} on {} board after {:.1}s",
            match outcome {
                Outcome::Win => "won",
                Outcome::Lose => "lost",
            },
            self.difficulty,
            self.elapsed().as_secs_f64()
        );
    }
}
