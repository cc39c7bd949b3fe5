use crate::domain::entities::CalendarSnapshot;
use crate::domain::errors::CalendarResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Append-only store of calendar snapshots
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    async fn insert_snapshot(&self, snapshot: &CalendarSnapshot) -> CalendarResult<()>;

    async fn get_snapshot(&self, snapshot_id: &str) -> CalendarResult<Option<CalendarSnapshot>>;

    /// Whether any snapshot for the organization and location covers `date`
    async fn exists_covering(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<bool>;

    /// Newest first
    async fn list_snapshots(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Vec<CalendarSnapshot>>;
}
