use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use pm_history_tools::commands::viz::{self, VizArgs};
use pm_history_tools::logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = VizArgs::parse();
    logging::init("pm_history_tools=warn");

    match viz::execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
