use crate::domain::entities::{Holiday, Location, WeeklyOffRule};
use crate::domain::errors::CalendarResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read access to the holiday and weekly-off master data the engine resolves against
#[async_trait]
pub trait CalendarRuleRepository: Send + Sync {
    async fn find_active_holiday(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Option<Holiday>>;

    /// Active rules for the location whose validity window contains `date`.
    /// Implementations may return a broader set; the engine re-checks the window.
    async fn find_active_weekly_off_rules(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Vec<WeeklyOffRule>>;

    async fn find_location(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Option<Location>>;

    /// Active holidays for a calendar year, ordered by date
    async fn list_active_holidays_for_year(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
    ) -> CalendarResult<Vec<Holiday>>;
}

/// Write access used by the holiday import workflow
#[async_trait]
pub trait HolidayWriter: Send + Sync {
    async fn create_holiday(&self, holiday: &Holiday) -> CalendarResult<()>;
}
