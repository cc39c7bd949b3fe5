use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// How a holiday entered the calendar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidaySource {
    Manual,
    Import,
}

impl HolidaySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidaySource::Manual => "MANUAL",
            HolidaySource::Import => "IMPORT",
        }
    }
}

impl std::str::FromStr for HolidaySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(HolidaySource::Manual),
            "IMPORT" => Ok(HolidaySource::Import),
            _ => Err(format!("Invalid holiday source: {}", s)),
        }
    }
}

/// Declared holiday for one (organization, location, date).
///
/// At most one ACTIVE holiday may exist per (organization, location, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holiday {
    pub id: String,
    pub organization_id: String,
    pub location_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub year: i32,
    pub is_mandatory: bool,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub source: HolidaySource,
    pub created_by: String,
    pub created_at: String,
}

impl Holiday {
    pub fn new(
        organization_id: String,
        location_id: String,
        name: String,
        date: NaiveDate,
        is_mandatory: bool,
        source: HolidaySource,
        created_by: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            organization_id,
            location_id,
            name,
            date,
            year: date.year(),
            is_mandatory,
            description: None,
            status: RecordStatus::Active,
            source,
            created_by,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}
