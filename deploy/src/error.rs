use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("no signer available: the signer provider returned no accounts")]
    NoSignerAvailable,

    #[error("contract artifact `{name}` not found at {}", path.display())]
    ArtifactNotFound { name: String, path: PathBuf },

    #[error(transparent)]
    Deployment(BoxError),

    #[error("failed to write address file {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to connect to provider at {url}")]
    Provider {
        url: String,
        #[source]
        source: fuels::types::errors::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DeployError {
    pub fn deployment(err: impl Into<BoxError>) -> Self {
        DeployError::Deployment(err.into())
    }
}
