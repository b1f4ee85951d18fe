use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::artifacts::ArtifactSet;
use crate::config::Config;
use crate::pipeline::InferencePipeline;
use crate::server;

#[derive(Parser)]
#[command(name = "cicast")]
#[command(author, version, about = "CI/CD Pipeline Outcome Prediction", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the training artifacts and serve the prediction endpoint
    Serve {
        #[arg(short, long, env = "CICAST_ARTIFACTS_DIR")]
        artifacts_dir: Option<PathBuf>,

        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Load the training artifacts and exit, reporting whether they are servable
    Check {
        #[arg(short, long, env = "CICAST_ARTIFACTS_DIR")]
        artifacts_dir: Option<PathBuf>,
    },
}

impl Cli {
    async fn execute_serve(
        &self,
        config: &Config,
        artifacts_dir: Option<&PathBuf>,
        host: Option<&str>,
        port: Option<u16>,
        threshold: Option<f64>,
    ) -> Result<()> {
        let artifacts_dir = artifacts_dir.unwrap_or(&config.model.artifacts_dir);
        let threshold = threshold.unwrap_or(config.model.threshold);

        info!("Loading artifacts from: {}", artifacts_dir.display());
        let artifacts = Arc::new(ArtifactSet::load(artifacts_dir)?);
        let pipeline = Arc::new(InferencePipeline::with_threshold(artifacts, threshold));

        let host = host.unwrap_or(&config.server.host);
        let port = port.unwrap_or(config.server.port);

        server::serve(pipeline, host, port).await
    }

    fn execute_check(&self, config: &Config, artifacts_dir: Option<&PathBuf>) -> Result<()> {
        let artifacts_dir = artifacts_dir.unwrap_or(&config.model.artifacts_dir);

        info!("Checking artifacts in: {}", artifacts_dir.display());
        let artifacts = ArtifactSet::load(artifacts_dir)?;

        println!(
            "Artifacts OK: {} jobs, {} stages, {} branches",
            artifacts.encoder.job_count(),
            artifacts.encoder.stage_count(),
            artifacts.encoder.branch_count()
        );

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match &self.command {
            Commands::Serve {
                artifacts_dir,
                host,
                port,
                threshold,
            } => {
                self.execute_serve(
                    &config,
                    artifacts_dir.as_ref(),
                    host.as_deref(),
                    *port,
                    *threshold,
                )
                .await
            }
            Commands::Check { artifacts_dir } => self.execute_check(&config, artifacts_dir.as_ref()),
        }
    }
}
