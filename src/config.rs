//! Chain configuration
//!
//! Network id and minimum fees are passed explicitly to the calls that need
//! them; nothing here is read from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::constants::DEFAULT_NETWORK_ID;
use crate::primitives::{NetworkId, U64};
use crate::transaction::Action;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Network the client talks to and the fees it pays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    #[serde(default = "default_network_id")]
    pub network_id: NetworkId,
    #[serde(default)]
    pub fees: FeeSchedule,
}

fn default_network_id() -> NetworkId {
    DEFAULT_NETWORK_ID
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(default_network_id())
    }
}

impl ChainConfig {
    pub fn new(network_id: NetworkId) -> Self {
        Self {
            network_id,
            fees: FeeSchedule::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Minimum fee per action type, in CCC base units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeSchedule {
    pub pay: U64,
    pub set_regular_key: U64,
    pub create_shard: U64,
    pub set_shard_owners: U64,
    pub set_shard_users: U64,
    #[serde(rename = "wrapCCC")]
    pub wrap_ccc: U64,
    pub store: U64,
    pub remove: U64,
    #[serde(rename = "unwrapCCC")]
    pub unwrap_ccc: U64,
    pub mint_asset: U64,
    pub transfer_asset: U64,
    pub change_asset_scheme: U64,
    pub compose_asset: U64,
    pub decompose_asset: U64,
    pub increase_asset_supply: U64,
    pub custom: U64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            pay: U64::new(100),
            set_regular_key: U64::new(10_000),
            create_shard: U64::new(1_000_000),
            set_shard_owners: U64::new(100_000),
            set_shard_users: U64::new(10_000),
            wrap_ccc: U64::new(100_000),
            store: U64::new(5_000),
            remove: U64::new(5_000),
            unwrap_ccc: U64::new(100),
            mint_asset: U64::new(100_000),
            transfer_asset: U64::new(100),
            change_asset_scheme: U64::new(100_000),
            compose_asset: U64::new(1_000_000),
            decompose_asset: U64::new(100_000),
            increase_asset_supply: U64::new(100_000),
            custom: U64::zero(),
        }
    }
}

impl FeeSchedule {
    pub fn min_fee(&self, action: &Action) -> U64 {
        match action {
            Action::Pay(_) => self.pay,
            Action::SetRegularKey(_) => self.set_regular_key,
            Action::CreateShard(_) => self.create_shard,
            Action::SetShardOwners(_) => self.set_shard_owners,
            Action::SetShardUsers(_) => self.set_shard_users,
            Action::WrapCcc(_) => self.wrap_ccc,
            Action::Store(_) => self.store,
            Action::Remove(_) => self.remove,
            Action::UnwrapCcc(_) => self.unwrap_ccc,
            Action::MintAsset(_) => self.mint_asset,
            Action::TransferAsset(_) => self.transfer_asset,
            Action::ChangeAssetScheme(_) => self.change_asset_scheme,
            Action::ComposeAsset(_) => self.compose_asset,
            Action::DecomposeAsset(_) => self.decompose_asset,
            Action::IncreaseAssetSupply(_) => self.increase_asset_supply,
            Action::Custom(_) => self.custom,
        }
    }
}
