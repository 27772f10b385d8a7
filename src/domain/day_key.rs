//! Calendar-day keys and timestamp bucketing.

use chrono::{DateTime, Datelike, Days, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier of one calendar day, used as the note storage key.
///
/// A `DayKey` is the local calendar date a timestamp falls on. Two timestamps
/// share a key iff they fall on the same day of the calendar that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from year, month and day, if the date exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the key `days` away from this one (negative goes back).
    ///
    /// `None` when the result falls outside the representable date range.
    pub fn offset_days(&self, days: i64) -> Option<Self> {
        let step = Days::new(days.unsigned_abs());
        if days < 0 {
            self.0.checked_sub_days(step)
        } else {
            self.0.checked_add_days(step)
        }
        .map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Error returned when a day key string is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDayKeyError {
    value: String,
}

impl fmt::Display for ParseDayKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid day '{}': expected YYYY-MM-DD", self.value)
    }
}

impl std::error::Error for ParseDayKeyError {}

impl FromStr for DayKey {
    type Err = ParseDayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ParseDayKeyError {
                value: s.to_string(),
            })
    }
}

// ===========================================
// Calendar
// ===========================================

/// The calendar whose day boundaries define note buckets.
///
/// `Local` follows the system timezone database, DST transitions included.
/// `Fixed` pins a constant UTC offset, which keeps bucketing deterministic
/// regardless of where the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Calendar {
    /// Maps a timestamp to the key of the calendar day it falls on.
    pub fn bucket<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> DayKey {
        let utc = timestamp.with_timezone(&Utc);
        match self {
            Calendar::Local => DayKey(utc.with_timezone(&Local).date_naive()),
            Calendar::Fixed(offset) => DayKey(utc.with_timezone(offset).date_naive()),
        }
    }

    /// Returns the first instant of `day` in this calendar.
    pub fn start_of_day(&self, day: DayKey) -> DateTime<FixedOffset> {
        match self {
            Calendar::Local => start_in(&Local, day.0),
            Calendar::Fixed(offset) => start_in(offset, day.0),
        }
    }

    /// Returns today's key.
    pub fn today(&self) -> DayKey {
        self.bucket(&Utc::now())
    }

    /// True when both timestamps fall on the same calendar day.
    pub fn same_day<A: TimeZone, B: TimeZone>(&self, a: &DateTime<A>, b: &DateTime<B>) -> bool {
        self.bucket(a) == self.bucket(b)
    }
}

/// Error returned when a calendar setting is neither `local` nor an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCalendarError {
    value: String,
}

impl fmt::Display for ParseCalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid calendar '{}': expected 'local' or an offset like +02:00",
            self.value
        )
    }
}

impl std::error::Error for ParseCalendarError {}

impl FromStr for Calendar {
    type Err = ParseCalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Calendar::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Calendar::Fixed(FixedOffset::east_opt(0).ok_or_else(
                || ParseCalendarError {
                    value: s.to_string(),
                },
            )?));
        }
        s.parse::<FixedOffset>()
            .map(Calendar::Fixed)
            .map_err(|_| ParseCalendarError {
                value: s.to_string(),
            })
    }
}

/// Midnight may be skipped by a DST jump; the first existing hour wins.
fn start_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<FixedOffset> {
    for hour in 0..24 {
        let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
            continue;
        };
        if let Some(start) = tz.from_local_datetime(&date.and_time(time)).earliest() {
            return start.fixed_offset();
        }
    }
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}
