use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use super::{RecordStatus, WeekdayName};
use crate::domain::errors::{CalendarError, CalendarResult};
use crate::domain::services::weekday_pattern;

/// Highest ordinal a weekday can reach inside one month
pub const MAX_OCCURRENCE: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Fixed,
    NthWeekday,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Fixed => "FIXED",
            RuleType::NthWeekday => "NTH_WEEKDAY",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIXED" => Ok(RuleType::Fixed),
            "NTH_WEEKDAY" => Ok(RuleType::NthWeekday),
            _ => Err(format!("Invalid rule type: {}", s)),
        }
    }
}

/// Pattern a weekly-off rule matches, decided by its rule type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleBody {
    /// Every listed weekday, e.g. {SATURDAY, SUNDAY}
    Fixed { weekdays: BTreeSet<WeekdayName> },
    /// Selected occurrences of one weekday, e.g. SATURDAY {2, 4}
    NthWeekday {
        weekday: WeekdayName,
        occurrences: BTreeSet<u32>,
    },
}

impl RuleBody {
    pub fn fixed(weekdays: impl IntoIterator<Item = WeekdayName>) -> CalendarResult<Self> {
        let weekdays: BTreeSet<WeekdayName> = weekdays.into_iter().collect();
        if weekdays.is_empty() {
            return Err(CalendarError::Validation(
                "FIXED rule requires at least one weekday".to_string(),
            ));
        }
        Ok(RuleBody::Fixed { weekdays })
    }

    pub fn nth_weekday(
        weekday: WeekdayName,
        occurrences: impl IntoIterator<Item = u32>,
    ) -> CalendarResult<Self> {
        let occurrences: BTreeSet<u32> = occurrences.into_iter().collect();
        if occurrences.is_empty() {
            return Err(CalendarError::Validation(
                "NTH_WEEKDAY rule requires at least one occurrence".to_string(),
            ));
        }
        if let Some(bad) = occurrences
            .iter()
            .find(|o| **o == 0 || **o > MAX_OCCURRENCE)
        {
            return Err(CalendarError::Validation(format!(
                "Occurrence {} is outside 1..={}",
                bad, MAX_OCCURRENCE
            )));
        }
        Ok(RuleBody::NthWeekday {
            weekday,
            occurrences,
        })
    }

    /// Rebuild a body from its stored columns.
    ///
    /// Unrecognised weekday symbols and out-of-range occurrences are dropped; what is
    /// left must still form a valid body.
    pub fn from_stored(
        rule_type: &str,
        fixed_weekdays: Option<Vec<String>>,
        nth_weekday: Option<&str>,
        nth_occurrences: Option<Vec<u32>>,
    ) -> CalendarResult<Self> {
        let rule_type = RuleType::from_str(rule_type).map_err(CalendarError::Validation)?;
        match rule_type {
            RuleType::Fixed => {
                let weekdays = fixed_weekdays
                    .unwrap_or_default()
                    .iter()
                    .filter_map(|w| WeekdayName::from_str(w).ok())
                    .collect::<Vec<_>>();
                RuleBody::fixed(weekdays)
            }
            RuleType::NthWeekday => {
                let weekday = nth_weekday
                    .and_then(|w| WeekdayName::from_str(w).ok())
                    .ok_or_else(|| {
                        CalendarError::Validation(
                            "NTH_WEEKDAY rule is missing a valid weekday".to_string(),
                        )
                    })?;
                let occurrences = nth_occurrences
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|o| (1..=MAX_OCCURRENCE).contains(o))
                    .collect::<Vec<_>>();
                RuleBody::nth_weekday(weekday, occurrences)
            }
        }
    }

    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleBody::Fixed { .. } => RuleType::Fixed,
            RuleBody::NthWeekday { .. } => RuleType::NthWeekday,
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            RuleBody::Fixed { weekdays } => weekday_pattern::matches_fixed(date, weekdays),
            RuleBody::NthWeekday {
                weekday,
                occurrences,
            } => weekday_pattern::matches_nth(date, *weekday, occurrences),
        }
    }
}

/// Recurring weekly-off rule for a location with a validity window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyOffRule {
    pub id: String,
    pub organization_id: String,
    pub location_id: String,
    pub name: String,
    pub body: RuleBody,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub status: RecordStatus,
    pub created_at: String,
}

impl WeeklyOffRule {
    pub fn new(
        organization_id: String,
        location_id: String,
        name: String,
        body: RuleBody,
        effective_from: NaiveDate,
        effective_to: Option<NaiveDate>,
    ) -> CalendarResult<Self> {
        if let Some(to) = effective_to {
            if effective_from > to {
                return Err(CalendarError::Validation(format!(
                    "effective_from {} is after effective_to {}",
                    effective_from, to
                )));
            }
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id,
            location_id,
            name,
            body,
            effective_from,
            effective_to,
            status: RecordStatus::Active,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn fixed(
        organization_id: String,
        location_id: String,
        name: String,
        weekdays: impl IntoIterator<Item = WeekdayName>,
        effective_from: NaiveDate,
        effective_to: Option<NaiveDate>,
    ) -> CalendarResult<Self> {
        let body = RuleBody::fixed(weekdays)?;
        Self::new(
            organization_id,
            location_id,
            name,
            body,
            effective_from,
            effective_to,
        )
    }

    pub fn nth_weekday(
        organization_id: String,
        location_id: String,
        name: String,
        weekday: WeekdayName,
        occurrences: impl IntoIterator<Item = u32>,
        effective_from: NaiveDate,
        effective_to: Option<NaiveDate>,
    ) -> CalendarResult<Self> {
        let body = RuleBody::nth_weekday(weekday, occurrences)?;
        Self::new(
            organization_id,
            location_id,
            name,
            body,
            effective_from,
            effective_to,
        )
    }

    pub fn rule_type(&self) -> RuleType {
        self.body.rule_type()
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Validity window check; an absent `effective_to` is open-ended.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.map_or(true, |to| date <= to)
    }

    /// True when the rule is active, in force on `date`, and its pattern matches.
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        self.is_active() && self.is_effective_on(date) && self.body.matches(date)
    }
}
