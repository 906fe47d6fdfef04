use std::process::ExitCode;

use clap::Parser;
use pm_history_tools::commands::history::{self, HistoryArgs};
use pm_history_tools::logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = HistoryArgs::parse();
    logging::init("pm_history_tools=warn");

    match history::execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
