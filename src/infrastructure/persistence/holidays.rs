use crate::domain::entities::{Holiday, HolidaySource, RecordStatus};
use crate::domain::errors::{parse_iso_date, CalendarError, CalendarResult};
use crate::infrastructure::persistence::Database;
use chrono::NaiveDate;
use sqlx::{any::AnyRow, Row};
use std::str::FromStr;

const HOLIDAY_COLUMNS: &str = "id, organization_id, location_id, name, date, year, is_mandatory, \
     description, status, source, created_by, created_at";

impl Database {
    /// Create a new holiday
    pub async fn create_holiday(&self, holiday: &Holiday) -> CalendarResult<()> {
        sqlx::query(
            "INSERT INTO holidays (id, organization_id, location_id, name, date, year, is_mandatory,
                                   description, status, source, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&holiday.id)
        .bind(&holiday.organization_id)
        .bind(&holiday.location_id)
        .bind(&holiday.name)
        .bind(holiday.date.to_string())
        .bind(holiday.year as i64)
        .bind(holiday.is_mandatory as i64)
        .bind(&holiday.description)
        .bind(holiday.status.as_str())
        .bind(holiday.source.as_str())
        .bind(&holiday.created_by)
        .bind(&holiday.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a holiday by ID
    pub async fn get_holiday(&self, id: &str) -> CalendarResult<Option<Holiday>> {
        let row = sqlx::query(&format!("SELECT {} FROM holidays WHERE id = ?", HOLIDAY_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_holiday_row).transpose()
    }

    /// The ACTIVE holiday on a date, if any
    pub async fn get_active_holiday(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Option<Holiday>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM holidays
             WHERE organization_id = ? AND location_id = ? AND date = ? AND status = 'ACTIVE'",
            HOLIDAY_COLUMNS
        ))
        .bind(organization_id)
        .bind(location_id)
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_holiday_row).transpose()
    }

    /// ACTIVE holidays of a year ordered by date
    pub async fn list_active_holidays(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
    ) -> CalendarResult<Vec<Holiday>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM holidays
             WHERE organization_id = ? AND location_id = ? AND year = ? AND status = 'ACTIVE'
             ORDER BY date ASC",
            HOLIDAY_COLUMNS
        ))
        .bind(organization_id)
        .bind(location_id)
        .bind(year as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_holiday_row).collect()
    }

    /// Deactivate a holiday; holidays are never hard-deleted
    pub async fn deactivate_holiday(&self, id: &str) -> CalendarResult<()> {
        let result = sqlx::query(
            "UPDATE holidays SET status = 'INACTIVE' WHERE id = ? AND status = 'ACTIVE'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CalendarError::NotFound(format!(
                "Active holiday {} not found",
                id
            )));
        }

        Ok(())
    }
}

fn map_holiday_row(row: &AnyRow) -> CalendarResult<Holiday> {
    let date: String = row.try_get("date")?;
    let year: i64 = row.try_get("year")?;
    let is_mandatory: i64 = row.try_get("is_mandatory")?;
    let status: String = row.try_get("status")?;
    let source: String = row.try_get("source")?;

    Ok(Holiday {
        id: row.try_get("id")?,
        organization_id: row.try_get("organization_id")?,
        location_id: row.try_get("location_id")?,
        name: row.try_get("name")?,
        date: parse_iso_date(&date)?,
        year: year as i32,
        is_mandatory: is_mandatory != 0,
        description: row.try_get("description")?,
        status: RecordStatus::from_str(&status).map_err(CalendarError::Validation)?,
        source: HolidaySource::from_str(&source).map_err(CalendarError::Validation)?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}
