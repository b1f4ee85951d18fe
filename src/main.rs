mod artifacts;
mod cli;
mod config;
mod error;
mod pipeline;
mod server;
mod types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting cicast - CI/CD Pipeline Outcome Prediction");
    cli.execute().await?;

    Ok(())
}
