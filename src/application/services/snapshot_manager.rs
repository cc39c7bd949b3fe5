use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::calendar_engine::CalendarResolutionEngine;
use crate::domain::{
    entities::{CalendarSnapshot, DateRange, DEFAULT_POLICY_VERSION},
    errors::CalendarResult,
    ports::{
        calendar_rule_repository::CalendarRuleRepository, snapshot_repository::SnapshotRepository,
    },
};

/// Freezes resolved classifications for a date range.
///
/// Locking is advisory: `is_date_locked` reports whether a snapshot covers a
/// date, and code that edits holidays or weekly-off rules is expected to check
/// it first. Nothing here blocks such edits.
#[derive(Clone)]
pub struct CalendarSnapshotManager {
    rule_repo: Arc<dyn CalendarRuleRepository>,
    snapshot_repo: Arc<dyn SnapshotRepository>,
    policy_version: String,
}

impl CalendarSnapshotManager {
    pub fn new(
        rule_repo: Arc<dyn CalendarRuleRepository>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self::with_policy_version(rule_repo, snapshot_repo, DEFAULT_POLICY_VERSION)
    }

    pub fn with_policy_version(
        rule_repo: Arc<dyn CalendarRuleRepository>,
        snapshot_repo: Arc<dyn SnapshotRepository>,
        policy_version: &str,
    ) -> Self {
        Self {
            rule_repo,
            snapshot_repo,
            policy_version: policy_version.to_string(),
        }
    }

    /// Resolve the range and persist it as a new snapshot, returning its id.
    ///
    /// Not idempotent: overlapping calls produce independent snapshots.
    pub async fn create_snapshot(
        &self,
        organization_id: &str,
        location_id: &str,
        range: DateRange,
        reason: &str,
        created_by: &str,
    ) -> CalendarResult<String> {
        // Snapshot-local engine: resolve against current rules, never a stale cache.
        let engine =
            CalendarResolutionEngine::with_policy_version(self.rule_repo.clone(), &self.policy_version);
        let resolutions = engine
            .resolve_date_range(organization_id, location_id, range, &self.policy_version)
            .await?;

        let snapshot = CalendarSnapshot::new(
            organization_id.to_string(),
            location_id.to_string(),
            range,
            reason.to_string(),
            resolutions,
            created_by.to_string(),
        );
        self.snapshot_repo.insert_snapshot(&snapshot).await?;

        metrics::counter!("calendar_snapshots_created_total").increment(1);
        info!(
            "Created calendar snapshot {} for location {} ({} to {})",
            snapshot.id, location_id, snapshot.start_date, snapshot.end_date
        );
        Ok(snapshot.id)
    }

    pub async fn get_snapshot(&self, snapshot_id: &str) -> CalendarResult<Option<CalendarSnapshot>> {
        self.snapshot_repo.get_snapshot(snapshot_id).await
    }

    /// True when any snapshot for the organization and location covers `date`
    pub async fn is_date_locked(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<bool> {
        self.snapshot_repo
            .exists_covering(organization_id, location_id, date)
            .await
    }

    pub async fn list_snapshots(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Vec<CalendarSnapshot>> {
        self.snapshot_repo
            .list_snapshots(organization_id, location_id)
            .await
    }
}
