use std::error::Error;
use std::process::ExitCode;

use deploy::deployer::Deployer;
use deploy::fuel::{DeployTarget, FuelArtifacts, FuelSigners};
use deploy::shared::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::from(1)
        }
    }
}

async fn run() -> deploy::Result<()> {
    let config = config()?;
    let artifacts = FuelArtifacts::new(config.artifacts_dir.clone());
    let signers = FuelSigners::new(DeployTarget::OnChain(config));
    Deployer::new(signers, artifacts).run().await?;
    Ok(())
}
