use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::*;

/// Line format: `<elapsed_secs>,<win|lose>,<easy|medium|hard>`.
impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.elapsed_secs, self.outcome, self.difficulty)
    }
}

impl FromStr for GameResult {
    type Err = RecordError;

    fn from_str(line: &str) -> core::result::Result<Self, Self::Err> {
        let malformed = |reason| RecordError::MalformedLine {
            line: line.to_owned(),
            reason,
        };

        let mut fields = line.trim().split(',').map(str::trim);
        let (Some(time), Some(outcome), Some(difficulty), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed("expected 3 comma-separated fields"));
        };

        let elapsed_secs: f64 = time
            .parse()
            .map_err(|_| malformed("elapsed time is not a number"))?;
        // a monotonic clock never yields a negative elapsed time
        if !elapsed_secs.is_finite() || elapsed_secs < 0.0 {
            return Err(malformed("elapsed time out of range"));
        }
        let outcome = Outcome::from_name(outcome).ok_or_else(|| malformed("unknown outcome"))?;
        let difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(|_| malformed("unknown difficulty"))?;

        Ok(Self {
            elapsed_secs,
            outcome,
            difficulty,
        })
    }
}

/// Append-only storage for finished-game lines.
pub trait RecordLog {
    /// Every line stored so far, oldest first.
    fn read_lines(&mut self) -> core::result::Result<Vec<String>, RecordError>;

    /// Appends one complete line, terminator included.
    fn append_line(&mut self, line: &str) -> core::result::Result<(), RecordError>;
}

impl<L: RecordLog + ?Sized> RecordLog for Box<L> {
    fn read_lines(&mut self) -> core::result::Result<Vec<String>, RecordError> {
        (**self).read_lines()
    }

    fn append_line(&mut self, line: &str) -> core::result::Result<(), RecordError> {
        (**self).append_line(line)
    }
}

/// Ledger kept in a text file. A missing file reads as empty and is created on the
/// first append. Lines that are not UTF-8 are dropped with a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecordLog {
    path: PathBuf,
}

impl FileRecordLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordLog for FileRecordLog {
    fn read_lines(&mut self) -> core::result::Result<Vec<String>, RecordError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No record file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        // a bad byte only costs its own line
        let mut lines = Vec::new();
        for raw in bytes.split(|&b| b == b'\n') {
            match core::str::from_utf8(raw) {
                Ok(line) => lines.push(line.trim_end_matches('\r').to_owned()),
                Err(_) => {
                    let err = RecordError::MalformedLine {
                        line: String::from_utf8_lossy(raw).into_owned(),
                        reason: "not valid UTF-8",
                    };
                    log::warn!("Skipping record line: {}", err);
                }
            }
        }
        Ok(lines)
    }

    fn append_line(&mut self, line: &str) -> core::result::Result<(), RecordError> {
        // one write per line so concurrent appenders cannot interleave partial lines
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Ledger kept in memory only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryRecordLog {
    lines: Vec<String>,
}

impl MemoryRecordLog {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl RecordLog for MemoryRecordLog {
    fn read_lines(&mut self) -> core::result::Result<Vec<String>, RecordError> {
        Ok(self.lines.clone())
    }

    fn append_line(&mut self, line: &str) -> core::result::Result<(), RecordError> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Best winning time per difficulty, rebuilt from the ledger at load.
#[derive(Clone, Debug)]
pub struct RecordStore<L> {
    log: L,
    best_times: BTreeMap<Difficulty, f64>,
}

impl<L: RecordLog> RecordStore<L> {
    /// Replays the ledger. Malformed lines are logged and skipped.
    pub fn load(mut log: L) -> core::result::Result<Self, RecordError> {
        let lines = log.read_lines()?;
        let mut store = Self {
            log,
            best_times: BTreeMap::new(),
        };

        for line in lines.iter().filter(|line| !line.trim().is_empty()) {
            match line.parse::<GameResult>() {
                Ok(result) => {
                    store.update_best(&result);
                }
                Err(err) => log::warn!("Skipping record line: {}", err),
            }
        }

        Ok(store)
    }

    /// Best winning time in seconds, `None` when nothing was won yet.
    pub fn best_time(&self, difficulty: Difficulty) -> Option<f64> {
        self.best_times.get(&difficulty).copied()
    }

    /// Lowers the best time if `result` is a faster win; returns whether it did.
    pub fn update_best(&mut self, result: &GameResult) -> bool {
        if result.outcome != Outcome::Win {
            return false;
        }
        match self.best_times.get(&result.difficulty) {
            Some(&best) if best <= result.elapsed_secs => false,
            _ => {
                self.best_times.insert(result.difficulty, result.elapsed_secs);
                true
            }
        }
    }

    pub fn append(&mut self, result: &GameResult) -> core::result::Result<(), RecordError> {
        self.log.append_line(&format!("{result}\n"))
    }

    pub fn log(&self) -> &L {
        &self.log
    }
}
