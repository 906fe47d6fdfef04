//! Entry points for the three binaries
//!
//! Each submodule owns its clap arguments and an `execute` function that
//! drives the services and prints the report.

pub mod backfill;
pub mod history;
pub mod viz;
