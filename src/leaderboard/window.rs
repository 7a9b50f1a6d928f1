//! Bi-weekly leaderboard date windows.
//!
//! Every month is split into two buckets:
//!
//! ```text
//! day  1..=14  ->  [YYYY-MM-01, YYYY-MM-15)
//! day 15..     ->  [YYYY-MM-15, first day of next month)
//! ```

use std::fmt;

use time::macros::format_description;
use time::{Date, Month};

use crate::error::WindowError;

/// Last day of month that still belongs to the first bucket.
const FIRST_HALF_LAST_DAY: u8 = 14;

/// Day of month where the second bucket starts.
const SECOND_HALF_START_DAY: u8 = 15;

/// Query parameter carrying the inclusive lower bound.
pub const FROM_DATE_PARAM: &str = "fromDate";

/// Query parameter carrying the exclusive upper bound.
pub const TO_DATE_PARAM: &str = "toDate";

/// Half-open `[from, to)` calendar date range sent to the leaderboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    from: Date,
    to: Date,
}

impl DateWindow {
    /// Window containing `today` (a UTC calendar date).
    pub fn containing(today: Date) -> Result<Self, WindowError> {
        let (from, to) = if today.day() <= FIRST_HALF_LAST_DAY {
            (today.replace_day(1)?, today.replace_day(SECOND_HALF_START_DAY)?)
        } else {
            (
                today.replace_day(SECOND_HALF_START_DAY)?,
                first_of_next_month(today)?,
            )
        };

        Ok(Self { from, to })
    }

    /// Inclusive lower bound.
    pub fn from(&self) -> Date {
        self.from
    }

    /// Exclusive upper bound.
    pub fn to(&self) -> Date {
        self.to
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date < self.to
    }

    /// `(fromDate, toDate)` query pairs with `YYYY-MM-DD` values.
    pub fn query_pairs(&self) -> Result<[(&'static str, String); 2], WindowError> {
        Ok([
            (FROM_DATE_PARAM, format_date(self.from)?),
            (TO_DATE_PARAM, format_date(self.to)?),
        ])
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: Date) -> Result<String, WindowError> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<Date, WindowError> {
    Ok(Date::parse(
        input.trim(),
        format_description!("[year]-[month]-[day]"),
    )?)
}

fn first_of_next_month(date: Date) -> Result<Date, WindowError> {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };

    Ok(Date::from_calendar_date(year, month, 1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn window_strings(today: Date) -> (String, String) {
        let window = DateWindow::containing(today).unwrap();
        (
            format_date(window.from()).unwrap(),
            format_date(window.to()).unwrap(),
        )
    }

    #[test]
    fn first_half_of_month() {
        for day in 1..=14 {
            let today = Date::from_calendar_date(2024, Month::March, day).unwrap();
            assert_eq!(
                window_strings(today),
                ("2024-03-01".to_string(), "2024-03-15".to_string()),
                "day {day}"
            );
        }
    }

    #[test]
    fn second_half_of_month() {
        for day in 15..=31 {
            let today = Date::from_calendar_date(2024, Month::March, day).unwrap();
            assert_eq!(
                window_strings(today),
                ("2024-03-15".to_string(), "2024-04-01".to_string()),
                "day {day}"
            );
        }
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(
            window_strings(date!(2024 - 12 - 15)),
            ("2024-12-15".to_string(), "2025-01-01".to_string())
        );
        assert_eq!(
            window_strings(date!(2024 - 12 - 31)),
            ("2024-12-15".to_string(), "2025-01-01".to_string())
        );
    }

    #[test]
    fn december_first_half_stays_in_year() {
        assert_eq!(
            window_strings(date!(2024 - 12 - 14)),
            ("2024-12-01".to_string(), "2024-12-15".to_string())
        );
    }

    #[test]
    fn february_second_half_ends_on_march_first() {
        assert_eq!(
            window_strings(date!(2024 - 02 - 29)),
            ("2024-02-15".to_string(), "2024-03-01".to_string())
        );
        assert_eq!(
            window_strings(date!(2023 - 02 - 28)),
            ("2023-02-15".to_string(), "2023-03-01".to_string())
        );
    }

    #[test]
    fn bounds_are_ordered_and_aligned() {
        let mut day = date!(2023 - 01 - 01);
        while day < date!(2025 - 01 - 01) {
            let window = DateWindow::containing(day).unwrap();
            assert!(window.from() < window.to());
            assert!(window.contains(day));
            assert!(matches!(window.from().day(), 1 | 15));
            assert!(matches!(window.to().day(), 1 | 15));
            day = day.next_day().unwrap();
        }
    }

    #[test]
    fn formatting_is_zero_padded() {
        let early = Date::from_calendar_date(999, Month::January, 5).unwrap();
        assert_eq!(format_date(early).unwrap(), "0999-01-05");
        assert_eq!(format_date(date!(2025 - 07 - 01)).unwrap(), "2025-07-01");
    }

    #[test]
    fn query_pairs_use_api_names() {
        let window = DateWindow::containing(date!(2025 - 10 - 16)).unwrap();
        let [from, to] = window.query_pairs().unwrap();
        assert_eq!(from, ("fromDate", "2025-10-15".to_string()));
        assert_eq!(to, ("toDate", "2025-11-01".to_string()));
    }

    #[test]
    fn last_representable_december_is_an_error() {
        assert!(DateWindow::containing(date!(9999 - 12 - 20)).is_err());
        assert!(DateWindow::containing(date!(9999 - 12 - 10)).is_ok());
    }

    #[test]
    fn parse_date_round_trips_cli_input() {
        assert_eq!(parse_date("2024-12-20").unwrap(), date!(2024 - 12 - 20));
        assert!(parse_date("2024/12/20").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn display_shows_half_open_range() {
        let window = DateWindow::containing(date!(2024 - 06 - 03)).unwrap();
        assert_eq!(window.to_string(), "[2024-06-01, 2024-06-15)");
    }
}
