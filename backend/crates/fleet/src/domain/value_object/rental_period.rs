//! Rental Period Value Object
//!
//! A date range with the end strictly after the start. The number of billed
//! days is `end - start`, so a zero-length period cannot exist.

use chrono::NaiveDate;
use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RentalPeriodError {
    #[error("End date must be after the start date")]
    EndNotAfterStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[display("{start} to {end}")]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RentalPeriodError> {
        if end <= start {
            return Err(RentalPeriodError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Create from database value (column has an `end_date > start_date` check)
    pub fn from_db(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Billed days, always at least 1
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days() {
        let period = RentalPeriod::new(date(2026, 3, 1), date(2026, 3, 4)).unwrap();
        assert_eq!(period.days(), 3);
    }

    #[test]
    fn test_days_across_month_and_leap_day() {
        let period = RentalPeriod::new(date(2028, 2, 27), date(2028, 3, 2)).unwrap();
        assert_eq!(period.days(), 4);
    }

    #[test]
    fn test_rejects_same_day() {
        assert_eq!(
            RentalPeriod::new(date(2026, 3, 1), date(2026, 3, 1)),
            Err(RentalPeriodError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_rejects_end_before_start() {
        assert_eq!(
            RentalPeriod::new(date(2026, 3, 5), date(2026, 3, 1)),
            Err(RentalPeriodError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_display() {
        let period = RentalPeriod::new(date(2026, 1, 9), date(2026, 1, 10)).unwrap();
        assert_eq!(period.to_string(), "2026-01-09 to 2026-01-10");
    }
}
