pub mod backfill_service;
pub mod chart_service;
pub mod history_service;
pub mod snapshot_service;
pub mod viz_service;
