//! Price-history tooling for prediction markets.
//!
//! Three binaries share this crate:
//! - `pm-backfill` polls Kalshi and appends snapshots to `price_history`
//! - `pm-history` prints a snapshot table for one market
//! - `pm-viz` renders tables, sparklines and a chart for one market

pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
