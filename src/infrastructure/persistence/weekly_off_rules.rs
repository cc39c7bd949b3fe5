use crate::domain::entities::{RecordStatus, RuleBody, WeeklyOffRule};
use crate::domain::errors::{parse_iso_date, CalendarError, CalendarResult};
use crate::infrastructure::persistence::Database;
use chrono::NaiveDate;
use sqlx::{any::AnyRow, Row};
use std::str::FromStr;

const RULE_COLUMNS: &str = "id, organization_id, location_id, name, rule_type, fixed_weekdays, \
     nth_weekday, nth_occurrences, effective_from, effective_to, status, created_at";

impl Database {
    /// Create a new weekly-off rule
    pub async fn create_weekly_off_rule(&self, rule: &WeeklyOffRule) -> CalendarResult<()> {
        let (fixed_weekdays, nth_weekday, nth_occurrences) = match &rule.body {
            RuleBody::Fixed { weekdays } => {
                let names: Vec<&str> = weekdays.iter().map(|w| w.as_str()).collect();
                (Some(serde_json::to_string(&names)?), None, None)
            }
            RuleBody::NthWeekday {
                weekday,
                occurrences,
            } => (
                None,
                Some(weekday.as_str().to_string()),
                Some(serde_json::to_string(occurrences)?),
            ),
        };

        sqlx::query(
            "INSERT INTO weekly_off_rules (id, organization_id, location_id, name, rule_type,
                                           fixed_weekdays, nth_weekday, nth_occurrences,
                                           effective_from, effective_to, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&rule.id)
        .bind(&rule.organization_id)
        .bind(&rule.location_id)
        .bind(&rule.name)
        .bind(rule.rule_type().as_str())
        .bind(fixed_weekdays)
        .bind(nth_weekday)
        .bind(nth_occurrences)
        .bind(rule.effective_from.to_string())
        .bind(rule.effective_to.map(|d| d.to_string()))
        .bind(rule.status.as_str())
        .bind(&rule.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// ACTIVE rules for a location whose validity window contains `date`, ordered by id.
    ///
    /// Rows whose stored configuration cannot form a rule are skipped with a warning
    /// so that incomplete authoring never makes the calendar unavailable.
    pub async fn list_effective_weekly_off_rules(
        &self,
        organization_id: &str,
        location_id: &str,
        date: NaiveDate,
    ) -> CalendarResult<Vec<WeeklyOffRule>> {
        let iso = date.to_string();
        let rows = sqlx::query(&format!(
            "SELECT {} FROM weekly_off_rules
             WHERE organization_id = ? AND location_id = ? AND status = 'ACTIVE'
               AND effective_from <= ?
               AND (effective_to IS NULL OR effective_to >= ?)
             ORDER BY id ASC",
            RULE_COLUMNS
        ))
        .bind(organization_id)
        .bind(location_id)
        .bind(&iso)
        .bind(&iso)
        .fetch_all(&self.pool)
        .await?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in &rows {
            match map_rule_row(row) {
                Ok(rule) => rules.push(rule),
                Err(CalendarError::Validation(reason)) => {
                    let id: String = row.try_get("id")?;
                    tracing::warn!("Skipping malformed weekly-off rule {}: {}", id, reason);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(rules)
    }

    /// Deactivate a weekly-off rule
    pub async fn deactivate_weekly_off_rule(&self, id: &str) -> CalendarResult<()> {
        let result = sqlx::query(
            "UPDATE weekly_off_rules SET status = 'INACTIVE' WHERE id = ? AND status = 'ACTIVE'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CalendarError::NotFound(format!(
                "Active weekly-off rule {} not found",
                id
            )));
        }

        Ok(())
    }
}

fn map_rule_row(row: &AnyRow) -> CalendarResult<WeeklyOffRule> {
    let rule_type: String = row.try_get("rule_type")?;
    let fixed_weekdays = json_column::<Vec<String>>(row, "fixed_weekdays")?;
    let nth_weekday: Option<String> = row.try_get("nth_weekday")?;
    let nth_occurrences = json_column::<Vec<u32>>(row, "nth_occurrences")?;
    let body = RuleBody::from_stored(
        &rule_type,
        fixed_weekdays,
        nth_weekday.as_deref(),
        nth_occurrences,
    )?;

    let effective_from: String = row.try_get("effective_from")?;
    let effective_to: Option<String> = row.try_get("effective_to")?;
    let status: String = row.try_get("status")?;

    Ok(WeeklyOffRule {
        id: row.try_get("id")?,
        organization_id: row.try_get("organization_id")?,
        location_id: row.try_get("location_id")?,
        name: row.try_get("name")?,
        body,
        effective_from: window_date("effective_from", &effective_from)?,
        effective_to: effective_to
            .map(|d| window_date("effective_to", &d))
            .transpose()?,
        status: RecordStatus::from_str(&status).map_err(CalendarError::Validation)?,
        created_at: row.try_get("created_at")?,
    })
}

/// A stored validity bound that is not `YYYY-MM-DD` makes the rule malformed
fn window_date(column: &str, raw: &str) -> CalendarResult<NaiveDate> {
    parse_iso_date(raw)
        .map_err(|e| CalendarError::Validation(format!("Invalid {} value: {}", column, e)))
}

/// Optional JSON array column; unparseable content counts as a malformed rule
fn json_column<T: serde::de::DeserializeOwned>(
    row: &AnyRow,
    column: &str,
) -> CalendarResult<Option<T>> {
    let raw: Option<String> = row.try_get(column)?;
    match raw {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            CalendarError::Validation(format!("Invalid {} value: {}", column, e))
        }),
        None => Ok(None),
    }
}
