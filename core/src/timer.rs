use core::time::Duration;
use web_time::Instant;

use crate::*;

/// How often the elapsed-time display is refreshed.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Repeating, cancellable schedule for sampling a session's elapsed time.
///
/// The ticker never blocks: the caller asks how long to wait with [`Ticker::until_next`]
/// and calls [`Ticker::poll`] when it wakes up. It only reads the session, and stops
/// scheduling by itself once the session is no longer active.
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the first tick at `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns the elapsed whole seconds when a tick is due and schedules the next one.
    pub fn poll(&mut self, session: &GameSession, now: Instant) -> Option<u64> {
        let due = self.next_due?;
        if !session.phase().is_active() {
            log::trace!("Session {:?}, cancelling ticker", session.phase());
            self.cancel();
            return None;
        }
        if now < due {
            return None;
        }
        self.next_due = Some(now + TICK_INTERVAL);
        Some(session.elapsed_at(now).as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_session() -> GameSession {
        let grid = Grid::from_mine_coords(2, 2, &[(2, 2)]).unwrap();
        let mut session = GameSession::with_layout(Difficulty::Easy, grid);
        session.handle_reveal((1, 1)).unwrap();
        session
    }

    #[test]
    fn ticks_every_interval_while_active() {
        let session = active_session();
        let mut ticker = Ticker::new();
        let now = Instant::now();
        ticker.start(now);

        assert!(ticker.poll(&session, now).is_some());
        assert_eq!(ticker.poll(&session, now + Duration::from_millis(100)), None);
        assert_eq!(ticker.until_next(now), Some(TICK_INTERVAL));

        let later = now + Duration::from_secs(3);
        assert!(ticker.poll(&session, later).unwrap() >= 3);
        assert!(ticker.is_running());
    }

    #[test]
    fn stops_once_session_finishes() {
        let mut session = active_session();
        let mut ticker = Ticker::new();
        let now = Instant::now();
        ticker.start(now);

        session.handle_reveal((2, 2)).unwrap();

        assert_eq!(session.phase(), Phase::Lost);
        assert_eq!(ticker.poll(&session, now + TICK_INTERVAL), None);
        assert!(!ticker.is_running());
        assert_eq!(ticker.until_next(now), None);
    }

    #[test]
    fn cancelled_ticker_stays_silent() {
        let session = active_session();
        let mut ticker = Ticker::new();
        let now = Instant::now();
        ticker.start(now);
        ticker.cancel();

        assert_eq!(ticker.poll(&session, now + TICK_INTERVAL), None);
    }
}
