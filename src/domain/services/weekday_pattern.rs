//! Weekday arithmetic for weekly-off patterns. Pure functions, no I/O.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use crate::domain::entities::WeekdayName;

pub fn weekday_name(date: NaiveDate) -> WeekdayName {
    WeekdayName::from(date.weekday())
}

/// Ordinal occurrence of the date's weekday within its month, starting at 1.
///
/// Days 1-7 hold the first occurrence of every weekday, 8-14 the second, and so on.
pub fn occurrence_in_month(date: NaiveDate) -> u32 {
    date.day0() / 7 + 1
}

pub fn matches_fixed(date: NaiveDate, weekdays: &BTreeSet<WeekdayName>) -> bool {
    weekdays.contains(&weekday_name(date))
}

/// Empty occurrence sets never match.
pub fn matches_nth(date: NaiveDate, target: WeekdayName, occurrences: &BTreeSet<u32>) -> bool {
    weekday_name(date) == target && occurrences.contains(&occurrence_in_month(date))
}
