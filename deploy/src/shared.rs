use std::path::PathBuf;

use dotenvy::dotenv;

use crate::error::{DeployError, Result};

pub const DEFAULT_FUEL_URL: &str = "http://127.0.0.1:4000";

#[derive(Debug, Clone)]
pub struct Config {
    pub fuel_url: String,
    pub signer_keys: Vec<String>,
    pub artifacts_dir: PathBuf,
}

pub fn config() -> Result<Config> {
    // a missing .env is fine, everything can come from the environment
    if let Err(err) = dotenv() {
        if !err.not_found() {
            return Err(DeployError::Config(format!("failed to load .env: {err}")));
        }
    }
    Ok(Config {
        fuel_url: var("FUEL_URL")?.unwrap_or_else(|| DEFAULT_FUEL_URL.to_string()),
        signer_keys: var("DEPLOYER_PK")?
            .map(|keys| parse_keys(&keys))
            .unwrap_or_default(),
        artifacts_dir: var("ARTIFACTS_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    })
}

fn var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(DeployError::Config(format!("env var {name}: {err}"))),
    }
}

pub fn parse_keys(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
