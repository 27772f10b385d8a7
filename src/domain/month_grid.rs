//! Month view for calendar navigation.

use crate::domain::DayKey;
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cells in a grid: six full weeks.
pub const GRID_CELLS: usize = 42;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// `None` unless the month and the one after it are both representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_months(Months::new(1))?;
        Some(Self { year, month })
    }

    /// The month a day falls in.
    pub fn containing(day: DayKey) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> DayKey {
        DayKey::new(self.first_date())
    }

    fn first_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        (28..=31)
            .rev()
            .find(|&day| NaiveDate::from_ymd_opt(self.year, self.month, day).is_some())
            .unwrap_or(28)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Header text such as "January 2024".
    pub fn title(&self) -> String {
        self.first_date().format("%B %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid month '{}': expected YYYY-MM", s);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

/// One square of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: DayKey,
    /// False for padding days borrowed from the neighboring months.
    pub in_month: bool,
    pub has_note: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// A 6x7 month grid with note markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: Month,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Lays out `month`, marking days for which `has_note` is true.
    pub fn build(
        month: Month,
        today: DayKey,
        selected: DayKey,
        has_note: impl Fn(DayKey) -> bool,
    ) -> Self {
        let first = month.first_day();
        let leading = first.date().weekday().num_days_from_sunday() as i64;

        let cells = (0..GRID_CELLS as i64)
            .filter_map(|i| first.offset_days(i - leading))
            .map(|day| DayCell {
                day,
                in_month: Month::containing(day) == month,
                has_note: has_note(day),
                is_today: day == today,
                is_selected: day == selected,
            })
            .collect();

        Self { month, cells }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}
