use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid range: start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type CalendarResult<T> = Result<T, CalendarError>;

// Convert from sqlx errors
impl From<sqlx::Error> for CalendarError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => CalendarError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                if message.contains("UNIQUE") || message.contains("unique") {
                    CalendarError::Validation(format!("Duplicate record: {}", message))
                } else {
                    CalendarError::Database(message.to_string())
                }
            }
            other => CalendarError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::Serialization(err.to_string())
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`) at the boundary.
pub fn parse_iso_date(value: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| CalendarError::InvalidDate(format!("{}: {}", value, e)))
}
