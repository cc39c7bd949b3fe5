use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DateRange, DateResolution};

/// Frozen classifications for a date range at one location.
///
/// Create-only. A date is locked when any snapshot for its organization and
/// location covers it; nothing here prevents rule edits, callers consult
/// `is_date_locked` before mutating holidays or weekly-off rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarSnapshot {
    pub id: String,
    pub organization_id: String,
    pub location_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub resolutions: Vec<DateResolution>,
    pub created_by: String,
    pub created_at: String,
}

impl CalendarSnapshot {
    pub fn new(
        organization_id: String,
        location_id: String,
        range: DateRange,
        reason: String,
        resolutions: Vec<DateResolution>,
        created_by: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id,
            location_id,
            start_date: range.start(),
            end_date: range.end(),
            reason,
            resolutions,
            created_by,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// The frozen resolution for `date`, if the snapshot covers it
    pub fn resolution_for(&self, date: NaiveDate) -> Option<&DateResolution> {
        if !self.covers(date) {
            return None;
        }
        let index = (date - self.start_date).num_days() as usize;
        self.resolutions.get(index).filter(|r| r.date == date)
    }
}
