//! Transfer and mint outputs

use serde::{Deserialize, Serialize};

use crate::address::{AssetAddress, AssetAddressType};
use crate::primitives::{hex_serde, H160, H256, U64};
use crate::rlp::{decode_bytes_list, encode_bytes_list, Decodable, Encodable, RlpError, RlpItem};
use crate::script::StandardScript;

/// Lock script hash and parameters that an asset address stands for
pub fn owner_from_address(address: &AssetAddress) -> (H160, Vec<Vec<u8>>) {
    match address.address_type {
        AssetAddressType::LockScriptHash => (address.payload, Vec::new()),
        AssetAddressType::P2pkh => (
            StandardScript::P2pkh.lock_script_hash(),
            vec![address.payload.0.to_vec()],
        ),
        AssetAddressType::P2pkhBurn => (
            StandardScript::P2pkhBurn.lock_script_hash(),
            vec![address.payload.0.to_vec()],
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransferOutput {
    pub lock_script_hash: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters: Vec<Vec<u8>>,
    pub asset_type: H256,
    pub shard_id: u16,
    pub quantity: U64,
}

impl AssetTransferOutput {
    pub fn from_address(address: &AssetAddress, asset_type: H256, shard_id: u16, quantity: U64) -> Self {
        let (lock_script_hash, parameters) = owner_from_address(address);
        Self {
            lock_script_hash,
            parameters,
            asset_type,
            shard_id,
            quantity,
        }
    }
}

impl Encodable for AssetTransferOutput {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            self.lock_script_hash.to_rlp(),
            encode_bytes_list(&self.parameters),
            self.asset_type.to_rlp(),
            self.shard_id.to_rlp(),
            self.quantity.to_rlp(),
        ])
    }
}

impl Decodable for AssetTransferOutput {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let fields = item.expect_list(5)?;
        Ok(Self {
            lock_script_hash: H160::from_rlp(&fields[0])?,
            parameters: decode_bytes_list(&fields[1])?,
            asset_type: H256::from_rlp(&fields[2])?,
            shard_id: u16::from_rlp(&fields[3])?,
            quantity: U64::from_rlp(&fields[4])?,
        })
    }
}

/// The single output slot of mint and compose actions.
/// Its fields are spliced into the enclosing action's RLP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMintOutput {
    pub lock_script_hash: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters: Vec<Vec<u8>>,
    pub supply: U64,
}

impl AssetMintOutput {
    pub fn from_address(address: &AssetAddress, supply: U64) -> Self {
        let (lock_script_hash, parameters) = owner_from_address(address);
        Self {
            lock_script_hash,
            parameters,
            supply,
        }
    }

    /// Stand-in used when a signature attests to no output
    pub fn zero() -> Self {
        Self {
            lock_script_hash: H160::zero(),
            parameters: Vec::new(),
            supply: U64::zero(),
        }
    }

    /// `lockScriptHash, parameters, supply` as consecutive list fields
    pub(crate) fn rlp_fields(&self) -> [RlpItem; 3] {
        [
            self.lock_script_hash.to_rlp(),
            encode_bytes_list(&self.parameters),
            self.supply.to_rlp(),
        ]
    }

    pub(crate) fn from_rlp_fields(fields: &[RlpItem]) -> Result<Self, RlpError> {
        if fields.len() != 3 {
            return Err(RlpError::ListLength {
                expected: 3,
                actual: fields.len(),
            });
        }
        Ok(Self {
            lock_script_hash: H160::from_rlp(&fields[0])?,
            parameters: decode_bytes_list(&fields[1])?,
            supply: U64::from_rlp(&fields[2])?,
        })
    }
}
