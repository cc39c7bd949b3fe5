use crate::domain::entities::{Location, RecordStatus};
use crate::domain::errors::{CalendarError, CalendarResult};
use crate::infrastructure::persistence::Database;
use sqlx::Row;
use std::str::FromStr;

impl Database {
    /// Create a new location
    pub async fn create_location(&self, location: &Location) -> CalendarResult<()> {
        sqlx::query(
            "INSERT INTO locations (id, organization_id, name, status, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&location.id)
        .bind(&location.organization_id)
        .bind(&location.name)
        .bind(location.status.as_str())
        .bind(&location.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a location scoped to its organization
    pub async fn get_location(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Option<Location>> {
        let row = sqlx::query(
            "SELECT id, organization_id, name, status, created_at
             FROM locations WHERE id = ? AND organization_id = ?",
        )
        .bind(location_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let status: String = row.try_get("status")?;
                Ok(Some(Location {
                    id: row.try_get("id")?,
                    organization_id: row.try_get("organization_id")?,
                    name: row.try_get("name")?,
                    status: RecordStatus::from_str(&status).map_err(CalendarError::Validation)?,
                    created_at: row.try_get("created_at")?,
                }))
            }
            None => Ok(None),
        }
    }
}
