//! Reference to a previously created asset

use serde::{Deserialize, Serialize};

use crate::primitives::{hex_serde, H160, H256, U64};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOutPoint {
    /// Tracker of the transaction that created the asset
    pub tracker: H256,
    pub index: usize,
    pub asset_type: H256,
    pub shard_id: u16,
    pub quantity: U64,
    /// Lock script hash of the spent output. Informational, never encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_script_hash: Option<H160>,
    /// Parameters of the spent output. Informational, never encoded.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "hex_serde::option_bytes_list"
    )]
    pub parameters: Option<Vec<Vec<u8>>>,
}

impl AssetOutPoint {
    pub fn new(tracker: H256, index: usize, asset_type: H256, shard_id: u16, quantity: U64) -> Self {
        Self {
            tracker,
            index,
            asset_type,
            shard_id,
            quantity,
            lock_script_hash: None,
            parameters: None,
        }
    }

    /// Attach the owner hints used by signers to pick an unlock template
    pub fn with_owner(mut self, lock_script_hash: H160, parameters: Vec<Vec<u8>>) -> Self {
        self.lock_script_hash = Some(lock_script_hash);
        self.parameters = Some(parameters);
        self
    }
}

impl Encodable for AssetOutPoint {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            self.tracker.to_rlp(),
            self.index.to_rlp(),
            self.asset_type.to_rlp(),
            self.shard_id.to_rlp(),
            self.quantity.to_rlp(),
        ])
    }
}

impl Decodable for AssetOutPoint {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let fields = item.expect_list(5)?;
        Ok(Self::new(
            H256::from_rlp(&fields[0])?,
            usize::from_rlp(&fields[1])?,
            H256::from_rlp(&fields[2])?,
            u16::from_rlp(&fields[3])?,
            U64::from_rlp(&fields[4])?,
        ))
    }
}
