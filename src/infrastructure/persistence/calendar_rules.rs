use crate::domain::entities::{Holiday, Location, RecordStatus, WeeklyOffRule};
use crate::domain::errors::CalendarResult;
use crate::domain::ports::calendar_rule_repository::{CalendarRuleRepository, HolidayWriter};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl CalendarRuleRepository for Database {
    async fn find_active_holiday(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Option<Holiday>> {
        self.get_active_holiday(organization_id, location_id, date)
            .await
    }

    async fn find_active_weekly_off_rules(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Vec<WeeklyOffRule>> {
        self.list_effective_weekly_off_rules(organization_id, location_id, date)
            .await
    }

    /// Inactive locations resolve as not found
    async fn find_location(
        &self,
        organization_id: &str,
        location_id: &str,
    ) -> CalendarResult<Option<Location>> {
        let location = self.get_location(organization_id, location_id).await?;
        Ok(location.filter(|l| l.status == RecordStatus::Active))
    }

    async fn list_active_holidays_for_year(
        &self,
        organization_id: &str,
        location_id: &str,
        year: i32,
    ) -> CalendarResult<Vec<Holiday>> {
        self.list_active_holidays(organization_id, location_id, year)
            .await
    }
}

#[async_trait]
impl HolidayWriter for Database {
    async fn create_holiday(&self, holiday: &Holiday) -> CalendarResult<()> {
        Database::create_holiday(self, holiday).await
    }
}
