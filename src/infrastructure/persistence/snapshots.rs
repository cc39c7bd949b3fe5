use crate::domain::entities::{CalendarSnapshot, DateResolution};
use crate::domain::errors::{parse_iso_date, CalendarResult};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{any::AnyRow, Row};

const SNAPSHOT_COLUMNS: &str =
    "id, organization_id, location_id, start_date, end_date, reason, resolutions, created_by, created_at";

#[async_trait]
impl SnapshotRepository for Database {
    /// Single insert; a failure leaves nothing behind
    async fn insert_snapshot(&self, snapshot: &CalendarSnapshot) -> CalendarResult<()> {
        let resolutions = serde_json::to_string(&snapshot.resolutions)?;

        sqlx::query(
            "INSERT INTO calendar_snapshots (id, organization_id, location_id, start_date, end_date,
                                             reason, resolutions, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&snapshot.id)
        .bind(&snapshot.organization_id)
        .bind(&snapshot.location_id)
        .bind(snapshot.start_date.to_string())
        .bind(snapshot.end_date.to_string())
        .bind(&snapshot.reason)
        .bind(resolutions)
        .bind(&snapshot.created_by)
        .bind(&snapshot.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_snapshot(&self, snapshot_id: &str) -> CalendarResult<Option<CalendarSnapshot>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM calendar_snapshots WHERE id = ?",
            SNAPSHOT_COLUMNS
        ))
        .bind(snapshot_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_snapshot_row).transpose()
    }

    async fn exists_covering(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<bool> {
        let iso = date.to_string();
        let count_row = sqlx::query(
            "SELECT COUNT(*) as count FROM calendar_snapshots
             WHERE organization_id = ? AND location_id = ? AND start_date <= ? AND end_date >= ?",
        )
        .bind(organization_id)
        .bind(location_id)
        .bind(&iso)
        .bind(&iso)
        .fetch_one(&self.pool)
        .await?;
        let count: i64 = count_row.try_get("count")?;

        Ok(count > 0)
    }

    async fn list_snapshots(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Vec<CalendarSnapshot>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM calendar_snapshots
             WHERE organization_id = ? AND location_id = ?
             ORDER BY created_at DESC, id DESC",
            SNAPSHOT_COLUMNS
        ))
        .bind(organization_id)
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_snapshot_row).collect()
    }
}

fn map_snapshot_row(row: &AnyRow) -> CalendarResult<CalendarSnapshot> {
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;
    let resolutions: String = row.try_get("resolutions")?;
    let resolutions: Vec<DateResolution> = serde_json::from_str(&resolutions)?;

    Ok(CalendarSnapshot {
        id: row.try_get("id")?,
        organization_id: row.try_get("organization_id")?,
        location_id: row.try_get("location_id")?,
        start_date: parse_iso_date(&start_date)?,
        end_date: parse_iso_date(&end_date)?,
        reason: row.try_get("reason")?,
        resolutions,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}
