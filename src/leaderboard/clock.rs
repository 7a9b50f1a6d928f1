//! Source of "today" for window computation.

use time::{Date, OffsetDateTime};

/// Supplies the current UTC calendar date.
pub trait Clock: Send + Sync {
    /// Today's date in UTC.
    fn today(&self) -> Date;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn fixed_clock_returns_its_date() {
        let clock = FixedClock(date!(2024 - 12 - 31));
        assert_eq!(clock.today(), date!(2024 - 12 - 31));
    }

    #[test]
    fn system_clock_matches_utc_now() {
        let before = OffsetDateTime::now_utc().date();
        let today = SystemClock.today();
        let after = OffsetDateTime::now_utc().date();
        assert!(before <= today && today <= after);
    }
}
