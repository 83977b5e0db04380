use clap::Parser;
use conference_checkin::{cli::Args, startup};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> miette::Result<ExitCode> {
    // Parse flags first so --help works without any setup
    let args = Args::parse();

    // .env may set RUST_LOG, so it goes before logging
    startup::load_env();

    // Initialize logging
    startup::init_logging()?;

    // Load configuration
    let config = startup::load_config()?;

    startup::start(config, args).await
}
