//! Asset records as reported by the node

use serde::{Deserialize, Serialize};

use super::{AssetOutPoint, AssetTransferInput, Timelock};
use crate::primitives::{hex_serde, H160, H256, U64};

/// An unspent asset. Read-only; spend it through [`Asset::create_transfer_input`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_type: H256,
    pub lock_script_hash: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters: Vec<Vec<u8>>,
    pub quantity: U64,
    pub shard_id: u16,
    pub tracker: H256,
    pub transaction_output_index: usize,
}

impl Asset {
    pub fn out_point(&self) -> AssetOutPoint {
        AssetOutPoint::new(
            self.tracker,
            self.transaction_output_index,
            self.asset_type,
            self.shard_id,
            self.quantity,
        )
        .with_owner(self.lock_script_hash, self.parameters.clone())
    }

    pub fn create_transfer_input(&self, timelock: Option<Timelock>) -> AssetTransferInput {
        AssetTransferInput::new(self.out_point(), timelock)
    }
}
