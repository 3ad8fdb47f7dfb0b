//! Month container - days of one calendar month

use crate::domain::day::{Day, DayContent};
use crate::error::{DaybookError, Result};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// All days of one calendar month, identified by (year, month).
///
/// Days are owned exclusively and created lazily on first access, so a
/// month only ever holds days that something has touched. Iteration over
/// [`Month::days`] is in ascending day order. Ordering and equality
/// between months consider only the (year, month) identity.
#[derive(Debug, Clone)]
pub struct Month {
    year_number: i32,
    month_number: u32,
    days: BTreeMap<u32, Day>,

    /// Dirty flag for the persistence layer. Never set by this crate
    /// beyond its initial `false`.
    pub edited: bool,
}

impl Month {
    /// Create a month without any days.
    pub fn new(year_number: i32, month_number: u32) -> Self {
        Month {
            year_number,
            month_number,
            days: BTreeMap::new(),
            edited: false,
        }
    }

    /// Build a month from persisted content, one entry per day number.
    ///
    /// Fails with [`DaybookError::InvalidDate`] when a day number does
    /// not form a real date in this month, and with
    /// [`DaybookError::TextDecode`] when a day's text is malformed.
    pub fn from_content(
        year_number: i32,
        month_number: u32,
        month_content: BTreeMap<u32, DayContent>,
    ) -> Result<Self> {
        let mut month = Month::new(year_number, month_number);
        for (day_number, day_content) in month_content {
            let date = month.date_for(day_number)?;
            month
                .days
                .insert(day_number, Day::from_content(date, day_content)?);
        }
        Ok(month)
    }

    /// Boundary view for the persistence layer: day number -> content,
    /// with empty days skipped.
    pub fn to_content(&self) -> BTreeMap<u32, DayContent> {
        self.days
            .iter()
            .filter(|(_, day)| !day.is_empty())
            .map(|(&day_number, day)| (day_number, day.to_content()))
            .collect()
    }

    pub fn year_number(&self) -> i32 {
        self.year_number
    }

    pub fn month_number(&self) -> u32 {
        self.month_number
    }

    /// Get the day for `day_number`, creating and storing an empty one on
    /// first access. Repeated calls return the same stored day.
    ///
    /// Fails with [`DaybookError::InvalidDate`] when the day number does
    /// not exist in this month (e.g. 31 in February).
    pub fn get_day(&mut self, day_number: u32) -> Result<&mut Day> {
        let date = self.date_for(day_number)?;
        Ok(self.days.entry(day_number).or_insert_with(|| Day::new(date)))
    }

    /// Insert or overwrite the day stored at `day_number`. The day's own
    /// date is not validated against this month.
    pub fn set_day(&mut self, day_number: u32, day: Day) {
        self.days.insert(day_number, day);
    }

    /// Read view of the stored days, in ascending day order.
    pub fn days(&self) -> &BTreeMap<u32, Day> {
        &self.days
    }

    /// True when every stored day is empty, including when no day has
    /// been stored at all.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Day::is_empty)
    }

    /// True iff both dates are present and fall in the same calendar
    /// month of the same year.
    pub fn same_month(date1: Option<NaiveDate>, date2: Option<NaiveDate>) -> bool {
        match (date1, date2) {
            (Some(first), Some(second)) => {
                first.year() == second.year() && first.month() == second.month()
            }
            _ => false,
        }
    }

    fn date_for(&self, day_number: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year_number, self.month_number, day_number).ok_or(
            DaybookError::InvalidDate {
                year: self.year_number,
                month: self.month_number,
                day: day_number,
            },
        )
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Month {} {}", self.year_number, self.month_number)?;
        for (day_number, day) in &self.days {
            writeln!(f, "{}: {}", day_number, day.text())?;
        }
        Ok(())
    }
}

impl PartialEq for Month {
    fn eq(&self, other: &Self) -> bool {
        (self.year_number, self.month_number) == (other.year_number, other.month_number)
    }
}

impl Eq for Month {}

impl PartialOrd for Month {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Month {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year_number, self.month_number).cmp(&(other.year_number, other.month_number))
    }
}
