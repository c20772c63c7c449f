//! Calendar source for visitor-day keys.

use std::sync::Mutex;

use chrono::{Days, NaiveDate, Utc};

/// Supplies the current UTC calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date: Mutex::new(date) }
    }

    pub fn set(&self, date: NaiveDate) {
        // A poisoned lock still holds a valid date.
        let mut g = self.date.lock().unwrap_or_else(|e| e.into_inner());
        *g = date;
    }

    /// Move forward by whole days (saturates at the calendar limit).
    pub fn advance_days(&self, days: u64) {
        let mut g = self.date.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = g.checked_add_days(Days::new(days)) {
            *g = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}
