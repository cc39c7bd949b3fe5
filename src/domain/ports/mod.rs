pub mod calendar_rule_repository;
pub mod snapshot_repository;
