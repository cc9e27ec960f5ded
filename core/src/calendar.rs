use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Restaurant;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiaryDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl DiaryDate {
    /// Parses a strict `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, DateError> {
        let mut parts = value.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateError::BadFormat);
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(DateError::BadFormat);
        }
        let year: i32 = year.parse().map_err(|_| DateError::BadNumber { field: "year" })?;
        let month: u8 = month
            .parse()
            .map_err(|_| DateError::BadNumber { field: "month" })?;
        let day: u8 = day.parse().map_err(|_| DateError::BadNumber { field: "day" })?;
        if !(1..=12).contains(&month) {
            return Err(DateError::OutOfRange {
                field: "month",
                value: month,
            });
        }
        if !(1..=days_in_month(year, month)).contains(&day) {
            return Err(DateError::OutOfRange {
                field: "day",
                value: day,
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    pub fn month_abbrev(&self) -> &'static str {
        MONTH_ABBREVS[(self.month - 1) as usize]
    }

    /// Timeline section heading, e.g. "January 2025".
    pub fn month_label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// `month` must already be validated to 1..=12.
fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for DiaryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::str::FromStr for DiaryDate {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    BadFormat,
    BadNumber { field: &'static str },
    OutOfRange { field: &'static str, value: u8 },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::BadFormat => write!(f, "date must be YYYY-MM-DD"),
            DateError::BadNumber { field } => write!(f, "{field} is not a number"),
            DateError::OutOfRange { field, value } => {
                write!(f, "{field} {value} out of range")
            }
        }
    }
}

impl std::error::Error for DateError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    /// Index into the source record list; identity for the click path.
    pub index: usize,
    pub date: DiaryDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGroup {
    pub label: String,
    pub year: i32,
    pub month: u8,
    pub entries: Vec<CalendarEntry>,
}

/// Projects the record list into a reverse-chronological timeline:
/// undated (or unparseable-dated) records are skipped, remaining ones
/// grouped by calendar month, entries newest-first within each group,
/// groups newest-first by their most recent entry. Pure: the input is
/// never mutated and the output is deterministic.
pub fn month_groups(records: &[Restaurant]) -> Vec<MonthGroup> {
    let mut dated: Vec<CalendarEntry> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let raw = record.date?;
            let date = DiaryDate::parse(raw).ok()?;
            Some(CalendarEntry { index, date })
        })
        .collect();
    dated.sort_by(|a, b| b.date.cmp(&a.date));

    let mut groups: Vec<MonthGroup> = Vec::new();
    for entry in dated {
        match groups.last_mut() {
            Some(group) if group.year == entry.date.year && group.month == entry.date.month => {
                group.entries.push(entry);
            }
            _ => groups.push(MonthGroup {
                label: entry.date.month_label(),
                year: entry.date.year,
                month: entry.date.month,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Catalog entries whose `date` is present but unparseable. Reported
/// once at startup so a typo shows up in the console instead of
/// silently shrinking the calendar.
pub fn invalid_dates(records: &[Restaurant]) -> Vec<(usize, &'static str, DateError)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let raw = record.date?;
            DiaryDate::parse(raw).err().map(|err| (index, raw, err))
        })
        .collect()
}
