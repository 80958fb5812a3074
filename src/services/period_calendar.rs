//! Conversions between calendar dates and forecast periods.
//!
//! The simulator only knows period counts. Callers turn a date range into a
//! (possibly fractional) number of periods before forecasting, and turn a
//! forecasted number of periods back into a completion date afterwards.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

pub const DEFAULT_PERIOD_DAYS: u32 = 7;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeriodCalendarError {
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("end date {end_date} must be after start date {start_date}")]
    EmptyRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("period length must be at least one day")]
    InvalidPeriodLength,
    #[error("date out of range: {periods} periods after {start_date}")]
    OutOfRange { start_date: NaiveDate, periods: f64 },
}

pub fn parse_date(value: &str) -> Result<NaiveDate, PeriodCalendarError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PeriodCalendarError::InvalidDate(value.to_string()))
}

/// Fractional number of periods between `start_date` and `end_date`.
/// No rounding is applied; a partial trailing period stays fractional.
pub fn periods_between(
    start_date: NaiveDate,
    end_date: NaiveDate,
    period_days: u32,
) -> Result<f64, PeriodCalendarError> {
    if period_days == 0 {
        return Err(PeriodCalendarError::InvalidPeriodLength);
    }
    if end_date <= start_date {
        return Err(PeriodCalendarError::EmptyRange {
            start_date,
            end_date,
        });
    }
    let days = (end_date - start_date).num_days();
    Ok(days as f64 / f64::from(period_days))
}

/// Date reached after `periods` periods, rounding partial days up.
pub fn end_date_for_periods(
    start_date: NaiveDate,
    periods: f64,
    period_days: u32,
) -> Result<NaiveDate, PeriodCalendarError> {
    let out_of_range = || PeriodCalendarError::OutOfRange {
        start_date,
        periods,
    };
    let days = (periods.max(0.0) * f64::from(period_days)).ceil();
    if !days.is_finite() || days > i32::MAX as f64 {
        return Err(out_of_range());
    }
    start_date
        .checked_add_signed(Duration::days(days as i64))
        .ok_or_else(out_of_range)
}

pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while is_weekend(next) {
        next += Duration::days(1);
    }
    next
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
