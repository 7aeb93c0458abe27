//! Time source for date-driven lifecycle rules.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of `now()` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Midnight UTC of the given date. Returns `None` for impossible dates.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self::new(date.and_hms_opt(0, 0, 0)?.and_utc()))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let clock = FixedClock::at_date(2026, 5, 20).unwrap();
        let other = clock.clone();
        clock.advance(chrono::Duration::days(2));
        assert_eq!(other.today(), NaiveDate::from_ymd_opt(2026, 5, 22).unwrap());
    }

    #[test]
    fn test_at_date_rejects_impossible_date() {
        assert!(FixedClock::at_date(2026, 2, 30).is_none());
    }
}
