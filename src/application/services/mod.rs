pub mod calendar_engine;
pub mod calendar_reports;
pub mod holiday_import;
pub mod resolution_cache;
pub mod snapshot_manager;

pub use calendar_engine::*;
pub use calendar_reports::*;
pub use holiday_import::*;
pub use resolution_cache::*;
pub use snapshot_manager::*;
