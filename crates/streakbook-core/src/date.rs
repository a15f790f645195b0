//! Calendar-day helpers.
//!
//! Every date in streakbook is a calendar day (`NaiveDate`), serialized as
//! `YYYY-MM-DD`. "Today" is evaluated in a fixed UTC offset rather than the
//! host's local zone, so the same instant maps to the same day on every
//! machine. Day arithmetic never looks at time-of-day.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// `strftime` pattern of a canonical day identifier.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Default offset: UTC+05:30 (Asia/Kolkata, no DST).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock evaluated in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns `None` when the offset is a full day or more.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    /// Calendar day of `instant` in this clock's offset.
    pub fn day_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::from_offset_minutes(DEFAULT_UTC_OFFSET_MINUTES)
            .unwrap_or_else(|| Self::new(Utc.fix()))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.day_at(Utc::now())
    }
}

/// Clock pinned to a settable day.
#[derive(Debug, Clone)]
pub struct FixedClock {
    day: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day: Cell::new(day) }
    }

    pub fn set(&self, day: NaiveDate) {
        self.day.set(day);
    }

    /// Moves the clock forward (or back, for negative `days`).
    pub fn advance(&self, days: i64) {
        self.day.set(self.day.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.day.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Whole days from `b` to `a`; positive when `a` is later.
pub fn day_difference(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

/// The Monday-to-Sunday week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Month bucket of `date`.
pub fn month_prefix(date: NaiveDate) -> YearMonth {
    YearMonth::of(date)
}

/// Strict `YYYY-MM-DD` parser.
pub fn parse_day(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DAY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new` and `of` only build months whose first day exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = *self;
        self.first_day()
            .iter_days()
            .take_while(move |day| month.contains(*day))
    }

    /// Previous month.
    pub fn pred(&self) -> Self {
        match self.month {
            1 => Self { year: self.year - 1, month: 12 },
            m => Self { year: self.year, month: m - 1 },
        }
    }

    /// Next month.
    pub fn succ(&self) -> Self {
        match self.month {
            12 => Self { year: self.year + 1, month: 1 },
            m => Self { year: self.year, month: m + 1 },
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 7 {
            return Err(ValidationError::InvalidMonth(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), DAY_FORMAT)
            .map(Self::of)
            .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn today_uses_fixed_offset_not_utc() {
        let clock = SystemClock::default();
        // 20:00 UTC is already the next day at +05:30.
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(clock.day_at(instant), day("2026-01-01"));

        let utc = SystemClock::from_offset_minutes(0).unwrap();
        assert_eq!(utc.day_at(instant), day("2025-12-31"));
    }

    #[test]
    fn offset_of_a_full_day_is_rejected() {
        assert!(SystemClock::from_offset_minutes(24 * 60).is_none());
        assert!(SystemClock::from_offset_minutes(-300).is_some());
    }

    #[test]
    fn day_difference_is_signed() {
        assert_eq!(day_difference(day("2025-03-02"), day("2025-03-01")), 1);
        assert_eq!(day_difference(day("2025-03-01"), day("2025-03-02")), -1);
        assert_eq!(day_difference(day("2025-03-01"), day("2025-03-01")), 0);
        // Leap day and DST weekends count as ordinary days.
        assert_eq!(day_difference(day("2024-03-01"), day("2024-02-28")), 2);
        assert_eq!(day_difference(day("2025-03-31"), day("2025-03-29")), 2);
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-12-03 is a Wednesday.
        let week = week_of(day("2025-12-03"));
        assert_eq!(week[0], day("2025-12-01"));
        assert_eq!(week[6], day("2025-12-07"));

        // Sunday belongs to the week that started six days earlier.
        let week = week_of(day("2025-12-07"));
        assert_eq!(week[0], day("2025-12-01"));

        let week = week_of(day("2025-12-01"));
        assert_eq!(week[0], day("2025-12-01"));
    }

    #[test]
    fn week_can_span_months() {
        let week = week_of(day("2026-01-01"));
        assert_eq!(week[0], day("2025-12-29"));
        assert_eq!(week[6], day("2026-01-04"));
    }

    #[test]
    fn month_prefix_formats_seven_chars() {
        let month = month_prefix(day("2025-07-19"));
        assert_eq!(month.to_string(), "2025-07");
        assert!(month.contains(day("2025-07-01")));
        assert!(!month.contains(day("2025-08-01")));
    }

    #[test]
    fn year_month_parses_and_steps() {
        let month: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(month.pred().to_string(), "2024-12");
        assert_eq!(month.succ().to_string(), "2025-02");
        assert_eq!("2024-02".parse::<YearMonth>().unwrap().days().count(), 29);
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025-1".parse::<YearMonth>().is_err());
    }

    #[test]
    fn parse_day_rejects_loose_formats() {
        assert!(parse_day("2025-1-05").is_err());
        assert!(parse_day("2025-02-30").is_err());
        assert!(parse_day("yesterday").is_err());
        assert_eq!(format_day(day(" 2025-02-03 ")), "2025-02-03");
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(day("2025-02-28"));
        clock.advance(1);
        assert_eq!(clock.today(), day("2025-03-01"));
        clock.set(day("2025-01-01"));
        assert_eq!(clock.today(), day("2025-01-01"));
    }
}
