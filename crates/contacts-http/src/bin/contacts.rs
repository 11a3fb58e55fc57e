//! Contacts command-line binary

use clap::Parser;
use contacts_http::cli::{Cli, run};
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    contacts::telemetry::init();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
