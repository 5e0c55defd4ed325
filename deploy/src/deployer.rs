use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::address_file;
use crate::error::{DeployError, Result};

pub const ARTIFACT_NAME: &str = "HawdPool";
pub const ADDRESS_FILE: &str = "./contracts.js";

/// An account able to authorize the deployment transaction.
#[async_trait]
pub trait Signer: Send + Sync {
    fn address(&self) -> String;

    /// Base asset balance, when the backing provider can report one.
    async fn balance(&self) -> Option<u64> {
        None
    }
}

#[async_trait]
pub trait SignerProvider: Send + Sync {
    type Signer: Signer;

    async fn get_signers(&self) -> Result<Vec<Self::Signer>>;
}

#[async_trait]
pub trait ContractFactory<S>: Send {
    /// Submits the contract creation and resolves once it is confirmed.
    async fn deploy(self, signer: &S) -> Result<DeployedContractHandle>;
}

pub trait ArtifactSource: Send + Sync {
    type Signer;
    type Factory: ContractFactory<Self::Signer>;

    fn get_contract_factory(&self, name: &str) -> Result<Self::Factory>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContractHandle {
    pub address: String,
}

/// Deploys one named artifact and records its address for downstream imports.
pub struct Deployer<P, A> {
    signers: P,
    artifacts: A,
    artifact_name: String,
    output: PathBuf,
}

impl<P, A> Deployer<P, A>
where
    P: SignerProvider,
    A: ArtifactSource<Signer = P::Signer>,
{
    pub fn new(signers: P, artifacts: A) -> Self {
        Self {
            signers,
            artifacts,
            artifact_name: ARTIFACT_NAME.to_string(),
            output: PathBuf::from(ADDRESS_FILE),
        }
    }

    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    #[instrument(skip_all, fields(artifact = %self.artifact_name))]
    pub async fn run(&self) -> Result<DeployedContractHandle> {
        let signer = self.acquire_signer().await?;
        let factory = self.locate_artifact(&self.artifact_name)?;
        let contract = self.deploy(factory, &signer).await?;
        println!("Contract address: {}", contract.address);
        self.write_address_file(&contract.address)?;
        Ok(contract)
    }

    pub async fn acquire_signer(&self) -> Result<P::Signer> {
        let signer = self
            .signers
            .get_signers()
            .await?
            .into_iter()
            .next()
            .ok_or(DeployError::NoSignerAvailable)?;
        debug!(account = %signer.address(), "Deploying contracts with the account");
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Some(balance) = signer.balance().await {
                debug!(balance, "Account balance");
            }
        }
        Ok(signer)
    }

    pub fn locate_artifact(&self, name: &str) -> Result<A::Factory> {
        let factory = self.artifacts.get_contract_factory(name)?;
        debug!(name, "resolved contract artifact");
        Ok(factory)
    }

    pub async fn deploy(
        &self,
        factory: A::Factory,
        signer: &P::Signer,
    ) -> Result<DeployedContractHandle> {
        info!("Deploying {} contract...", self.artifact_name);
        let contract = factory.deploy(signer).await?;
        info!(address = %contract.address, "contract deployed");
        Ok(contract)
    }

    pub fn write_address_file(&self, address: &str) -> Result<()> {
        address_file::write(&self.output, &self.artifact_name, address)?;
        info!(path = %self.output.display(), "wrote address file");
        Ok(())
    }
}
