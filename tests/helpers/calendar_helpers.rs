#![allow(dead_code)]
use chrono::NaiveDate;
use hr_calendar::{
    domain::entities::*,
    domain::ports::{
        calendar_rule_repository::CalendarRuleRepository, snapshot_repository::SnapshotRepository,
    },
    infrastructure::persistence::Database,
    CalendarResolutionEngine, CalendarSnapshotManager,
};
use std::sync::Arc;

pub const ORG: &str = "org-acme";

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Create a test location for an organization
pub async fn create_test_location(db: &Database, organization_id: &str, name: &str) -> Location {
    let location = Location::new(organization_id.to_string(), name.to_string());
    db.create_location(&location)
        .await
        .expect("Failed to create location");
    location
}

/// Create a manual, mandatory holiday
pub async fn create_test_holiday(
    db: &Database,
    location: &Location,
    date: NaiveDate,
    name: &str,
) -> Holiday {
    let holiday = Holiday::new(
        location.organization_id.clone(),
        location.id.clone(),
        name.to_string(),
        date,
        true,
        HolidaySource::Manual,
        "admin-1".to_string(),
    );
    db.create_holiday(&holiday)
        .await
        .expect("Failed to create holiday");
    holiday
}

/// Create an open-ended or bounded FIXED weekly-off rule
pub async fn create_fixed_rule(
    db: &Database,
    location: &Location,
    name: &str,
    weekdays: &[WeekdayName],
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
) -> WeeklyOffRule {
    let rule = WeeklyOffRule::fixed(
        location.organization_id.clone(),
        location.id.clone(),
        name.to_string(),
        weekdays.iter().copied(),
        effective_from,
        effective_to,
    )
    .expect("Invalid fixed rule");
    db.create_weekly_off_rule(&rule)
        .await
        .expect("Failed to create weekly-off rule");
    rule
}

/// Create an NTH_WEEKDAY weekly-off rule
pub async fn create_nth_rule(
    db: &Database,
    location: &Location,
    name: &str,
    weekday: WeekdayName,
    occurrences: &[u32],
    effective_from: NaiveDate,
) -> WeeklyOffRule {
    let rule = WeeklyOffRule::nth_weekday(
        location.organization_id.clone(),
        location.id.clone(),
        name.to_string(),
        weekday,
        occurrences.iter().copied(),
        effective_from,
        None,
    )
    .expect("Invalid nth-weekday rule");
    db.create_weekly_off_rule(&rule)
        .await
        .expect("Failed to create weekly-off rule");
    rule
}

pub fn engine_for(db: &Database) -> CalendarResolutionEngine {
    CalendarResolutionEngine::new(Arc::new(db.clone()) as Arc<dyn CalendarRuleRepository>)
}

pub fn snapshot_manager_for(db: &Database) -> CalendarSnapshotManager {
    CalendarSnapshotManager::new(
        Arc::new(db.clone()) as Arc<dyn CalendarRuleRepository>,
        Arc::new(db.clone()) as Arc<dyn SnapshotRepository>,
    )
}
