use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use deploy::deployer::{ArtifactSource, ContractFactory, DeployedContractHandle, Signer, SignerProvider};
use deploy::error::{DeployError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSigner(pub String);

#[async_trait]
impl Signer for TestSigner {
    fn address(&self) -> String {
        self.0.clone()
    }
}

pub struct StaticSigners(pub Vec<TestSigner>);

#[async_trait]
impl SignerProvider for StaticSigners {
    type Signer = TestSigner;

    async fn get_signers(&self) -> Result<Vec<TestSigner>> {
        Ok(self.0.clone())
    }
}

pub fn signers(accounts: &[&str]) -> StaticSigners {
    StaticSigners(accounts.iter().map(|a| TestSigner(a.to_string())).collect())
}

#[derive(Clone)]
pub enum Outcome {
    Address(String),
    Reject(String),
}

/// Resolves a single artifact name and records which signer each deployment used.
#[derive(Clone)]
pub struct StaticArtifacts {
    pub name: String,
    pub outcomes: Vec<Outcome>,
    pub deployments: Arc<AtomicUsize>,
    pub used_signers: Arc<std::sync::Mutex<Vec<TestSigner>>>,
}

impl StaticArtifacts {
    pub fn new(name: &str, outcomes: Vec<Outcome>) -> Self {
        Self {
            name: name.to_string(),
            outcomes,
            deployments: Arc::new(AtomicUsize::new(0)),
            used_signers: Arc::new(std::sync::Mutex::new(vec![])),
        }
    }

    pub fn deploying(name: &str, address: &str) -> Self {
        Self::new(name, vec![Outcome::Address(address.to_string())])
    }

    pub fn rejecting(name: &str, reason: &str) -> Self {
        Self::new(name, vec![Outcome::Reject(reason.to_string())])
    }

    pub fn deployment_count(&self) -> usize {
        self.deployments.load(Ordering::SeqCst)
    }
}

impl ArtifactSource for StaticArtifacts {
    type Signer = TestSigner;
    type Factory = StaticFactory;

    fn get_contract_factory(&self, name: &str) -> Result<StaticFactory> {
        if name != self.name {
            return Err(DeployError::ArtifactNotFound {
                name: name.to_string(),
                path: format!("artifacts/{name}.json").into(),
            });
        }
        Ok(StaticFactory {
            artifacts: self.clone(),
        })
    }
}

pub struct StaticFactory {
    artifacts: StaticArtifacts,
}

#[async_trait]
impl ContractFactory<TestSigner> for StaticFactory {
    async fn deploy(self, signer: &TestSigner) -> Result<DeployedContractHandle> {
        let n = self.artifacts.deployments.fetch_add(1, Ordering::SeqCst);
        self.artifacts.used_signers.lock().unwrap().push(signer.clone());
        let outcome = self.artifacts.outcomes[n.min(self.artifacts.outcomes.len() - 1)].clone();
        match outcome {
            Outcome::Address(address) => Ok(DeployedContractHandle { address }),
            Outcome::Reject(reason) => Err(DeployError::deployment(io::Error::other(reason))),
        }
    }
}
