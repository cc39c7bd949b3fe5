use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

use super::calendar_engine::CalendarResolutionEngine;
use crate::domain::{
    entities::{Classification, DateRange, DateResolution, Holiday, WorkingDayCount},
    errors::{CalendarError, CalendarResult},
    ports::calendar_rule_repository::CalendarRuleRepository,
};

/// Whole-month calendar with its summary
#[derive(Debug, Clone, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub summary: WorkingDayCount,
    pub calendar: Vec<DateResolution>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub working_days: usize,
    pub holidays: usize,
    pub weekly_offs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkingDaysReport {
    pub location_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
    pub total_summary: WorkingDayCount,
}

/// Read-only calendar views built on top of the resolution engine
#[derive(Clone)]
pub struct CalendarReportService {
    engine: Arc<CalendarResolutionEngine>,
    rule_repo: Arc<dyn CalendarRuleRepository>,
}

impl CalendarReportService {
    pub fn new(
        engine: Arc<CalendarResolutionEngine>,
        rule_repo: Arc<dyn CalendarRuleRepository>,
    ) -> Self {
        Self { engine, rule_repo }
    }

    pub async fn month_calendar(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
        month: u32,
    ) -> CalendarResult<MonthCalendar> {
        let range = month_bounds(year, month)?;
        let calendar = self
            .engine
            .resolve_range(organization_id, location_id, range.start(), range.end())
            .await?;

        Ok(MonthCalendar {
            year,
            month,
            month_name: month_name(month)?,
            summary: WorkingDayCount::from_resolutions(&calendar),
            calendar,
        })
    }

    /// Per-month counts over an arbitrary range, in chronological order
    pub async fn working_days_report(
        &self,
        organization_id: &str,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CalendarResult<WorkingDaysReport> {
        let resolutions = self
            .engine
            .resolve_range(organization_id, location_id, start, end)
            .await?;

        let mut monthly_breakdown: Vec<MonthlyBreakdown> = Vec::new();
        for resolution in &resolutions {
            let (year, month) = (resolution.date.year(), resolution.date.month());
            let needs_new = monthly_breakdown
                .last()
                .map_or(true, |m| m.year != year || m.month != month);
            if needs_new {
                monthly_breakdown.push(MonthlyBreakdown {
                    year,
                    month,
                    month_name: month_name(month)?,
                    working_days: 0,
                    holidays: 0,
                    weekly_offs: 0,
                });
            }

            if let Some(entry) = monthly_breakdown.last_mut() {
                match resolution.classification {
                    Classification::WorkingDay => entry.working_days += 1,
                    Classification::Holiday => entry.holidays += 1,
                    Classification::WeeklyOff => entry.weekly_offs += 1,
                }
            }
        }

        Ok(WorkingDaysReport {
            location_id: location_id.to_string(),
            start_date: start,
            end_date: end,
            monthly_breakdown,
            total_summary: WorkingDayCount::from_resolutions(&resolutions),
        })
    }

    /// Active holidays for the year, ordered by date
    pub async fn holidays_for_year(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
    ) -> CalendarResult<Vec<Holiday>> {
        self.rule_repo
            .list_active_holidays_for_year(organization_id, location_id, year)
            .await
    }
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> CalendarResult<DateRange> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{}-{:02}-01", year, month)))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| CalendarError::InvalidDate(format!("end of {}-{:02}", year, month)))?;
    DateRange::new(first, last)
}

fn month_name(month: u32) -> CalendarResult<String> {
    let month_enum = u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .ok_or(CalendarError::InvalidMonth(month))?;
    Ok(month_enum.name().to_string())
}
