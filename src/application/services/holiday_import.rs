use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::calendar_engine::CalendarResolutionEngine;
use crate::domain::{
    entities::{Holiday, HolidaySource},
    errors::{parse_iso_date, CalendarError, CalendarResult},
    ports::calendar_rule_repository::{CalendarRuleRepository, HolidayWriter},
};

/// Row errors kept in the report; the count still covers all of them
const MAX_REPORTED_ERRORS: usize = 50;
const MAX_HOLIDAY_NAME_LEN: usize = 100;
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// One already-parsed row of a holiday import file
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayImportRow {
    pub date: String,
    pub name: String,
    pub is_mandatory: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportRowError {
    /// Spreadsheet row number: the header is row 1, so data starts at 2
    pub row: usize,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub errors: usize,
    pub error_details: Vec<ImportRowError>,
}

/// Bulk holiday import for one location and year
#[derive(Clone)]
pub struct HolidayImportService {
    rule_repo: Arc<dyn CalendarRuleRepository>,
    holiday_writer: Arc<dyn HolidayWriter>,
    engine: Arc<CalendarResolutionEngine>,
}

impl HolidayImportService {
    pub fn new(
        rule_repo: Arc<dyn CalendarRuleRepository>,
        holiday_writer: Arc<dyn HolidayWriter>,
        engine: Arc<CalendarResolutionEngine>,
    ) -> Self {
        Self {
            rule_repo,
            holiday_writer,
            engine,
        }
    }

    /// Insert each valid row as an IMPORT holiday.
    ///
    /// Bad rows are reported and skipped; they never abort the batch. The
    /// engine cache is cleared once anything was imported.
    pub async fn import_holidays(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
        rows: Vec<HolidayImportRow>,
        created_by: &str,
    ) -> CalendarResult<ImportReport> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::Validation(format!(
                "Year {} is outside {}..={}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if self
            .rule_repo
            .find_location(organization_id, location_id)
            .await?
            .is_none()
        {
            return Err(CalendarError::LocationNotFound(location_id.to_string()));
        }

        let total_rows = rows.len();
        let mut imported = 0;
        let mut row_errors = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 2;
            match self
                .import_row(organization_id, location_id, year, row, created_by)
                .await
            {
                Ok(()) => imported += 1,
                Err(e) => {
                    warn!("Holiday import row {} rejected: {}", row_number, e);
                    row_errors.push(ImportRowError {
                        row: row_number,
                        error: e.to_string(),
                    });
                }
            }
        }

        if imported > 0 {
            self.engine.clear_cache().await;
        }

        metrics::counter!("calendar_holidays_imported_total").increment(imported as u64);
        info!(
            "Imported {} of {} holidays for location {} ({})",
            imported, total_rows, location_id, year
        );

        let errors = row_errors.len();
        row_errors.truncate(MAX_REPORTED_ERRORS);
        Ok(ImportReport {
            total_rows,
            imported,
            errors,
            error_details: row_errors,
        })
    }

    async fn import_row(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
        row: HolidayImportRow,
        created_by: &str,
    ) -> CalendarResult<()> {
        let date = parse_iso_date(&row.date)?;
        if date.year() != year {
            return Err(CalendarError::Validation(format!(
                "Holiday on {} is outside import year {}",
                date, year
            )));
        }

        let name = row.name.trim();
        if name.is_empty() || name.chars().count() > MAX_HOLIDAY_NAME_LEN {
            return Err(CalendarError::Validation(format!(
                "Holiday name must be 1-{} characters",
                MAX_HOLIDAY_NAME_LEN
            )));
        }

        if self
            .rule_repo
            .find_active_holiday(organization_id, location_id, date)
            .await?
            .is_some()
        {
            return Err(CalendarError::Validation(format!(
                "Holiday on {} already exists",
                date
            )));
        }

        let holiday = Holiday::new(
            organization_id.to_string(),
            location_id.to_string(),
            name.to_string(),
            date,
            row.is_mandatory.unwrap_or(true),
            HolidaySource::Import,
            created_by.to_string(),
        )
        .with_description(row.description);

        self.holiday_writer.create_holiday(&holiday).await
    }
}
