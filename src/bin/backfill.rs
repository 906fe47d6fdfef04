use std::process::ExitCode;

use clap::Parser;
use pm_history_tools::commands::backfill::{self, BackfillArgs};
use pm_history_tools::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = BackfillArgs::parse();
    logging::init("pm_history_tools=info");

    match backfill::execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Backfill aborted: {}", e);
            println!("{}", backfill::failure_line(&e));
            ExitCode::FAILURE
        }
    }
}
