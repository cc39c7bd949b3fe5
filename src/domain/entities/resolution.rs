use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Holiday, RuleType, WeekdayName, WeeklyOffRule};
use crate::domain::services::weekday_pattern;

/// Policy version recorded when callers do not ask for a specific one
pub const DEFAULT_POLICY_VERSION: &str = "v1";

/// Three-way verdict for a calendar date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    WorkingDay,
    Holiday,
    WeeklyOff,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::WorkingDay => write!(f, "WORKING_DAY"),
            Classification::Holiday => write!(f, "HOLIDAY"),
            Classification::WeeklyOff => write!(f, "WEEKLY_OFF"),
        }
    }
}

/// Record that decided a non-working classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reference_type", rename_all = "snake_case")]
pub enum ResolutionReference {
    Holiday {
        reference_id: String,
        holiday_name: String,
        is_mandatory: bool,
    },
    WeeklyOffRule {
        reference_id: String,
        rule_name: String,
        rule_type: RuleType,
    },
}

impl ResolutionReference {
    pub fn reference_id(&self) -> &str {
        match self {
            ResolutionReference::Holiday { reference_id, .. } => reference_id,
            ResolutionReference::WeeklyOffRule { reference_id, .. } => reference_id,
        }
    }
}

/// Classification of one date for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateResolution {
    pub date: NaiveDate,
    pub day_of_week: WeekdayName,
    pub classification: Classification,
    pub reference: Option<ResolutionReference>,
    pub policy_version_used: String,
}

impl DateResolution {
    pub fn working_day(date: NaiveDate, policy_version: &str) -> Self {
        Self {
            date,
            day_of_week: weekday_pattern::weekday_name(date),
            classification: Classification::WorkingDay,
            reference: None,
            policy_version_used: policy_version.to_string(),
        }
    }

    pub fn holiday(date: NaiveDate, holiday: &Holiday, policy_version: &str) -> Self {
        Self {
            date,
            day_of_week: weekday_pattern::weekday_name(date),
            classification: Classification::Holiday,
            reference: Some(ResolutionReference::Holiday {
                reference_id: holiday.id.clone(),
                holiday_name: holiday.name.clone(),
                is_mandatory: holiday.is_mandatory,
            }),
            policy_version_used: policy_version.to_string(),
        }
    }

    pub fn weekly_off(date: NaiveDate, rule: &WeeklyOffRule, policy_version: &str) -> Self {
        Self {
            date,
            day_of_week: weekday_pattern::weekday_name(date),
            classification: Classification::WeeklyOff,
            reference: Some(ResolutionReference::WeeklyOffRule {
                reference_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                rule_type: rule.rule_type(),
            }),
            policy_version_used: policy_version.to_string(),
        }
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference.as_ref().map(|r| r.reference_id())
    }

    pub fn is_working_day(&self) -> bool {
        self.classification == Classification::WorkingDay
    }
}

/// Tally of classifications over a range
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingDayCount {
    pub total_days: usize,
    pub working_days: usize,
    pub holidays: usize,
    pub weekly_offs: usize,
}

impl WorkingDayCount {
    pub fn record(&mut self, classification: Classification) {
        self.total_days += 1;
        match classification {
            Classification::WorkingDay => self.working_days += 1,
            Classification::Holiday => self.holidays += 1,
            Classification::WeeklyOff => self.weekly_offs += 1,
        }
    }

    pub fn from_resolutions<'a>(resolutions: impl IntoIterator<Item = &'a DateResolution>) -> Self {
        let mut counts = Self::default();
        for resolution in resolutions {
            counts.record(resolution.classification);
        }
        counts
    }
}
