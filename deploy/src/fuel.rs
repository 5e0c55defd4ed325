use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use fuels::accounts::ViewOnlyAccount;
use fuels::crypto::SecretKey;
use fuels::prelude::{
    AssetId,
    Contract,
    ContractId,
    LoadConfiguration,
    Provider,
    TxPolicies,
    WalletUnlocked,
};
use rand::Rng;
use tracing::warn;

use crate::deployer::{
    ArtifactSource,
    ContractFactory,
    DeployedContractHandle,
    Signer,
    SignerProvider,
};
use crate::error::{DeployError, Result};
use crate::shared::Config;

pub enum DeployTarget {
    /// Wallets already funded on a node the caller launched.
    Local(Vec<WalletUnlocked>),
    OnChain(Config),
}

pub struct FuelSigners {
    target: DeployTarget,
}

impl FuelSigners {
    pub fn new(target: DeployTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl SignerProvider for FuelSigners {
    type Signer = WalletUnlocked;

    async fn get_signers(&self) -> Result<Vec<WalletUnlocked>> {
        let config = match &self.target {
            DeployTarget::Local(wallets) => return Ok(wallets.clone()),
            DeployTarget::OnChain(config) => config,
        };
        if config.signer_keys.is_empty() {
            return Ok(vec![]);
        }
        let keys = config
            .signer_keys
            .iter()
            .map(|key| {
                SecretKey::from_str(key)
                    .map_err(|err| DeployError::Config(format!("invalid private key: {err}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let provider = Provider::connect(&config.fuel_url)
            .await
            .map_err(|source| DeployError::Provider {
                url: config.fuel_url.clone(),
                source,
            })?;
        Ok(keys
            .into_iter()
            .map(|key| WalletUnlocked::new_from_private_key(key, Some(provider.clone())))
            .collect())
    }
}

#[async_trait]
impl Signer for WalletUnlocked {
    fn address(&self) -> String {
        format!("0x{}", ViewOnlyAccount::address(self).hash())
    }

    async fn balance(&self) -> Option<u64> {
        match self.get_asset_balance(&AssetId::BASE).await {
            Ok(balance) => Some(balance),
            Err(err) => {
                warn!(%err, "could not fetch account balance");
                None
            }
        }
    }
}

/// Compiled forc projects laid out as `<root>/<stem>/out/release/<stem>.bin`.
pub struct FuelArtifacts {
    root: PathBuf,
}

impl FuelArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn binary_path(&self, name: &str) -> PathBuf {
        let stem = artifact_stem(name);
        self.root
            .join(&stem)
            .join("out")
            .join("release")
            .join(format!("{stem}.bin"))
    }
}

impl ArtifactSource for FuelArtifacts {
    type Signer = WalletUnlocked;
    type Factory = FuelContractFactory;

    fn get_contract_factory(&self, name: &str) -> Result<FuelContractFactory> {
        let binary = self.binary_path(name);
        if !binary.is_file() {
            return Err(DeployError::ArtifactNotFound {
                name: name.to_string(),
                path: binary,
            });
        }
        Ok(FuelContractFactory { binary })
    }
}

pub struct FuelContractFactory {
    binary: PathBuf,
}

#[async_trait]
impl ContractFactory<WalletUnlocked> for FuelContractFactory {
    async fn deploy(self, wallet: &WalletUnlocked) -> Result<DeployedContractHandle> {
        let salt = rand::thread_rng().gen::<[u8; 32]>();
        let id: ContractId = Contract::load_from(&self.binary, LoadConfiguration::default())
            .map_err(DeployError::deployment)?
            .with_salt(salt)
            .deploy(wallet, TxPolicies::default())
            .await
            .map_err(DeployError::deployment)?
            .into();
        Ok(DeployedContractHandle {
            address: format!("0x{id}"),
        })
    }
}

/// `HawdPool` -> `hawd_pool`, the project name forc builds the artifact under.
/// Runs of capitals stay together, so `ERC20Pool` -> `erc20_pool`.
pub fn artifact_stem(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut stem = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 && !stem.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                stem.push('_');
            }
        }
        stem.push(ch.to_ascii_lowercase());
    }
    stem
}
