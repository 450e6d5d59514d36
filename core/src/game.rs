use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// What the player gets shown when a game ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameReport {
    pub result: GameResult,
    /// Best winning time for the difficulty after this result was recorded.
    pub best_time: Option<f64>,
    pub new_best: bool,
}

/// Result of one player input.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn<T> {
    pub outcome: T,
    /// Set on the turn that ended the game, and only then.
    pub report: Option<GameReport>,
}

/// Owns the current session and the record ledger, and drives both from player input.
#[derive(Debug)]
pub struct Game<L> {
    session: GameSession,
    records: RecordStore<L>,
    seeder: SmallRng,
}

impl<L: RecordLog> Game<L> {
    pub fn new(difficulty: Difficulty, records: RecordStore<L>, seed: u64) -> Self {
        let mut seeder = SmallRng::seed_from_u64(seed);
        let session = GameSession::new(difficulty, seeder.random());
        Self {
            session,
            records,
            seeder,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn records(&self) -> &RecordStore<L> {
        &self.records
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty()
    }

    /// Best winning time on the current difficulty.
    pub fn best_time(&self) -> Option<f64> {
        self.records.best_time(self.difficulty())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_session(&self.session)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Turn<RevealOutcome>> {
        let was_finished = self.session.phase().is_finished();
        let outcome = self.session.handle_reveal(coords)?;
        Ok(Turn {
            outcome,
            report: self.settle(was_finished),
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Turn<FlagResult>> {
        let was_finished = self.session.phase().is_finished();
        let outcome = self.session.handle_flag_toggle(coords)?;
        Ok(Turn {
            outcome,
            report: self.settle(was_finished),
        })
    }

    /// Discards the current session and starts a pending one on `difficulty`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("New {} session", difficulty);
        self.session = GameSession::new(difficulty, self.seeder.random());
    }

    pub fn restart(&mut self) {
        self.set_difficulty(self.difficulty());
    }

    /// Records the result if this turn is the one that ended the game.
    fn settle(&mut self, was_finished: bool) -> Option<GameReport> {
        if was_finished {
            return None;
        }
        let result = self.session.result()?;

        let new_best = self.records.update_best(&result);
        if new_best {
            log::info!(
                "New best time on {}: {:.1}s",
                result.difficulty,
                result.elapsed_secs
            );
        }
        if let Err(err) = self.records.append(&result) {
            log::error!("Could not append game record: {}", err);
        }

        Some(GameReport {
            result,
            best_time: self.records.best_time(result.difficulty),
            new_best,
        })
    }
}
