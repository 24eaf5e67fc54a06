//! Binary crate for the `weather-web` server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and startup configuration
//! - Interactive provider configuration
//! - Running the HTTP server, or one-off lookups from the terminal

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    weather_web::telemetry::init(cmd.verbose);
    cmd.run().await
}
