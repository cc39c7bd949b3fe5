use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use super::resolution_cache::{CacheKey, ResolutionCache};
use crate::domain::{
    entities::{DateRange, DateResolution, WorkingDayCount, DEFAULT_POLICY_VERSION},
    errors::{parse_iso_date, CalendarError, CalendarResult},
    ports::calendar_rule_repository::CalendarRuleRepository,
};

/// Single authority for classifying dates as working day, holiday or weekly off.
///
/// Precedence is fixed: an active holiday beats any weekly-off rule, and a
/// matching weekly-off rule beats the working-day default. Results are cached
/// per (organization, location, date, policy version) until `clear_cache`.
#[derive(Clone)]
pub struct CalendarResolutionEngine {
    rule_repo: Arc<dyn CalendarRuleRepository>,
    cache: ResolutionCache,
    default_policy_version: String,
}

impl CalendarResolutionEngine {
    pub fn new(rule_repo: Arc<dyn CalendarRuleRepository>) -> Self {
        Self::with_policy_version(rule_repo, DEFAULT_POLICY_VERSION)
    }

    pub fn with_policy_version(
        rule_repo: Arc<dyn CalendarRuleRepository>,
        policy_version: &str,
    ) -> Self {
        Self {
            rule_repo,
            cache: ResolutionCache::new(),
            default_policy_version: policy_version.to_string(),
        }
    }

    pub fn default_policy_version(&self) -> &str {
        &self.default_policy_version
    }

    // ========================================
    // Single date
    // ========================================

    pub async fn resolve_date(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<DateResolution> {
        let policy_version = self.default_policy_version.clone();
        self.resolve_date_with_policy(organization_id, location_id, date, &policy_version)
            .await
    }

    pub async fn resolve_date_with_policy(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
        policy_version: &str,
    ) -> CalendarResult<DateResolution> {
        self.ensure_location(organization_id, location_id).await?;
        self.resolve_cached(organization_id, location_id, date, policy_version)
            .await
    }

    /// Resolve a `YYYY-MM-DD` date string
    pub async fn resolve_iso_date(
        &self,
        organization_id: &str,
        location_id: &str,
        date: &str,
    ) -> CalendarResult<DateResolution> {
        let date = parse_iso_date(date)?;
        self.resolve_date(organization_id, location_id, date).await
    }

    // ========================================
    // Ranges
    // ========================================

    /// One resolution per day from `start` to `end` inclusive, ascending.
    pub async fn resolve_range(
        &self,
        organization_id: &str,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CalendarResult<Vec<DateResolution>> {
        let policy_version = self.default_policy_version.clone();
        self.resolve_range_with_policy(organization_id, location_id, start, end, &policy_version)
            .await
    }

    pub async fn resolve_range_with_policy(
        &self,
        organization_id: &str,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        policy_version: &str,
    ) -> CalendarResult<Vec<DateResolution>> {
        let range = DateRange::new(start, end)?;
        self.resolve_date_range(organization_id, location_id, range, policy_version)
            .await
    }

    pub async fn resolve_date_range(
        &self,
        organization_id: &str,
        location_id: &str,
        range: DateRange,
        policy_version: &str,
    ) -> CalendarResult<Vec<DateResolution>> {
        self.ensure_location(organization_id, location_id).await?;

        let mut resolutions = Vec::with_capacity(range.len_days());
        for date in range.days() {
            let resolution = self
                .resolve_cached(organization_id, location_id, date, policy_version)
                .await?;
            resolutions.push(resolution);
        }

        debug!(
            organization_id,
            location_id,
            start = %range.start(),
            end = %range.end(),
            days = resolutions.len(),
            "Resolved calendar range"
        );
        Ok(resolutions)
    }

    /// Resolve a range given as `YYYY-MM-DD` strings
    pub async fn resolve_iso_range(
        &self,
        organization_id: &str,
        location_id: &str,
        start: &str,
        end: &str,
    ) -> CalendarResult<Vec<DateResolution>> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        self.resolve_range(organization_id, location_id, start, end)
            .await
    }

    pub async fn count_working_days(
        &self,
        organization_id: &str,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CalendarResult<WorkingDayCount> {
        let resolutions = self
            .resolve_range(organization_id, location_id, start, end)
            .await?;
        Ok(WorkingDayCount::from_resolutions(&resolutions))
    }

    // ========================================
    // Cache administration
    // ========================================

    /// Drop every cached resolution. Call after any holiday or weekly-off change.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        metrics::counter!("calendar_cache_clears_total").increment(1);
        tracing::info!("Calendar resolution cache cleared");
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    // ========================================
    // Helper Methods
    // ========================================

    async fn ensure_location(&self, organization_id: &str, location_id: &str) -> CalendarResult<()> {
        match self
            .rule_repo
            .find_location(organization_id, location_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(CalendarError::LocationNotFound(location_id.to_string())),
        }
    }

    async fn resolve_cached(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
        policy_version: &str,
    ) -> CalendarResult<DateResolution> {
        let key = CacheKey::new(organization_id, location_id, date, policy_version);
        if let Some(hit) = self.cache.get(&key).await {
            metrics::counter!("calendar_cache_hits_total").increment(1);
            return Ok(hit);
        }
        metrics::counter!("calendar_cache_misses_total").increment(1);

        let resolution = self
            .classify(organization_id, location_id, date, policy_version)
            .await?;
        Ok(self.cache.insert(key, resolution).await)
    }

    async fn classify(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
        policy_version: &str,
    ) -> CalendarResult<DateResolution> {
        if let Some(holiday) = self
            .rule_repo
            .find_active_holiday(organization_id, location_id, date)
            .await?
        {
            debug!(%date, holiday_id = %holiday.id, "Date resolved as holiday");
            return Ok(DateResolution::holiday(date, &holiday, policy_version));
        }

        let rules = self
            .rule_repo
            .find_active_weekly_off_rules(organization_id, location_id, date)
            .await?;

        // Several rules may match one date; the lowest rule id is reported.
        let deciding_rule = rules
            .iter()
            .filter(|rule| rule.applies_to(date))
            .min_by(|a, b| a.id.cmp(&b.id));

        if let Some(rule) = deciding_rule {
            debug!(%date, rule_id = %rule.id, "Date resolved as weekly off");
            return Ok(DateResolution::weekly_off(date, rule, policy_version));
        }

        Ok(DateResolution::working_day(date, policy_version))
    }
}
