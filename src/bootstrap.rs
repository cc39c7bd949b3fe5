use crate::application::services::*;
use crate::config::Config;
use crate::domain::ports::calendar_rule_repository::{CalendarRuleRepository, HolidayWriter};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

/// Calendar services sharing one engine (and therefore one resolution cache)
#[derive(Clone)]
pub struct CalendarServices {
    pub engine: Arc<CalendarResolutionEngine>,
    pub snapshot_manager: CalendarSnapshotManager,
    pub report_service: CalendarReportService,
    pub holiday_import_service: HolidayImportService,
}

pub fn build_calendar_services(db: Database, config: &Config) -> CalendarServices {
    let rule_repo = Arc::new(db.clone()) as Arc<dyn CalendarRuleRepository>;

    let engine = Arc::new(CalendarResolutionEngine::with_policy_version(
        rule_repo.clone(),
        &config.policy_version,
    ));
    tracing::info!(
        "Calendar resolution engine initialized (policy {})",
        config.policy_version
    );

    let snapshot_manager = CalendarSnapshotManager::with_policy_version(
        rule_repo.clone(),
        Arc::new(db.clone()) as Arc<dyn SnapshotRepository>,
        &config.policy_version,
    );

    let report_service = CalendarReportService::new(engine.clone(), rule_repo.clone());

    let holiday_import_service = HolidayImportService::new(
        rule_repo,
        Arc::new(db) as Arc<dyn HolidayWriter>,
        engine.clone(),
    );
    tracing::info!("Calendar snapshot, report and import services initialized");

    CalendarServices {
        engine,
        snapshot_manager,
        report_service,
        holiday_import_service,
    }
}

/// Connect, migrate and wire everything from configuration
pub async fn initialize(config: &Config) -> Result<(Database, CalendarServices), Box<dyn std::error::Error>> {
    let db = Database::connect_with_max(&config.database_url, config.database_max_connections).await?;
    db.run_migrations().await?;
    tracing::info!("Calendar database migrations applied");

    let services = build_calendar_services(db.clone(), config);
    Ok((db, services))
}
