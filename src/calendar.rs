use bdays::HolidayCalendar;
use bdays::calendars::brazil::BRSettlement;
use bdays::calendars::us::USSettlement;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Number of years of holidays derived from a region code, starting at the
/// project start year.
const REGION_YEARS: i32 = 10;

#[derive(Debug, Clone)]
pub enum CalendarError {
    UnknownRegion(String),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::UnknownRegion(region) => {
                write!(f, "unknown holiday region \"{region}\"")
            }
        }
    }
}

impl std::error::Error for CalendarError {}

/// Business-day calendar: a Mon-Fri work week minus a set of holidays.
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkCalendar {
    /// Create a calendar with no holidays and a Mon-Fri work week.
    pub fn new() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }

    /// Create a calendar with the public holidays of a country over a
    /// 10-year window starting at `start_year`.
    ///
    /// Region codes map to the holiday sources provided by `bdays`:
    /// "US"/"USA" and "BR"/"BRA" are supported.
    pub fn from_region(region: &str, start_year: i32) -> Result<Self, CalendarError> {
        let end_year = start_year + REGION_YEARS - 1;
        match region.to_ascii_uppercase().as_str() {
            "US" | "USA" => Ok(Self::from_holiday_source(&USSettlement, start_year, end_year)),
            "BR" | "BRA" => Ok(Self::from_holiday_source(&BRSettlement, start_year, end_year)),
            _ => Err(CalendarError::UnknownRegion(region.to_string())),
        }
    }

    /// Sample a `bdays` holiday calendar day by day over a year range.
    fn from_holiday_source<C>(source: &C, start_year: i32, end_year: i32) -> Self
    where
        C: HolidayCalendar<NaiveDate>,
    {
        let mut calendar = Self::new();
        let mut date = NaiveDate::from_ymd_opt(start_year, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(end_year, 12, 31).unwrap();
        while date <= last {
            if source.is_holiday(date) {
                calendar.holidays.insert(date);
            }
            date = date + Duration::days(1);
        }
        calendar
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once
    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Check if a date can receive work: a working weekday that is not a
    /// holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// Advance a date by `count` business days, skipping week-ends and
    /// holidays. A count of zero returns `from` unchanged.
    pub fn add_business_days(&self, from: NaiveDate, count: i64) -> NaiveDate {
        let mut current = from;
        let mut to_add = count;
        while to_add > 0 {
            current = current + Duration::days(1);
            if self.is_business_day(current) {
                to_add -= 1;
            }
        }
        current
    }

    /// Describe every day in an inclusive date range, in order.
    pub fn days_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<DayInfo> {
        let mut days = Vec::new();
        let mut current = from;
        while current <= to {
            days.push(DayInfo {
                date: current,
                weekday: current.format("%A").to_string(),
                business_day: self.is_business_day(current),
            });
            current = current + Duration::days(1);
        }
        days
    }

    /// Holidays falling inside an inclusive date range, sorted.
    pub fn holidays_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut holidays: Vec<NaiveDate> = self
            .holidays
            .iter()
            .copied()
            .filter(|date| *date >= from && *date <= to)
            .collect();
        holidays.sort_unstable();
        holidays
    }
}

/// One day of a date range, with the metadata the plan renderers need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub weekday: String,
    pub business_day: bool,
}

/// A contiguous run of days belonging to the same calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSpan {
    pub label: String,
    pub days: usize,
}

/// Group a chronological sequence of dates into contiguous month buckets,
/// labelled like "December 2020".
pub fn month_spans(dates: &[NaiveDate]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for date in dates {
        let key = (date.year(), date.month());
        if current == Some(key) {
            if let Some(span) = spans.last_mut() {
                span.days += 1;
            }
        } else {
            spans.push(MonthSpan {
                label: date.format("%B %Y").to_string(),
                days: 1,
            });
            current = Some(key);
        }
    }
    spans
}
