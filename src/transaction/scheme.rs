//! Asset scheme administration

use serde::{Deserialize, Serialize};

use super::{decode_optional_address, decode_text, encode_text, split_approvals, with_approvals};
use crate::address::PlatformAddress;
use crate::asset::{Asset, AssetMintOutput};
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature};
use crate::primitives::{NetworkId, H160, H256};
use crate::rlp::{decode_list, encode_list, encode_optional, Decodable, Encodable, RlpError, RlpItem};

/// Replace the metadata and permissions of an existing asset scheme.
/// `seq` is the scheme's change counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAssetScheme {
    pub network_id: NetworkId,
    pub shard_id: u16,
    pub asset_type: H256,
    pub seq: u64,
    pub metadata: String,
    pub approver: Option<PlatformAddress>,
    pub registrar: Option<PlatformAddress>,
    pub allowed_script_hashes: Vec<H160>,
    pub approvals: Vec<EcdsaSignature>,
}

impl ChangeAssetScheme {
    const CORE_LEN: usize = 9;

    fn core_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::uint(u64::from(action_tag::CHANGE_ASSET_SCHEME)),
            self.network_id.to_rlp(),
            self.shard_id.to_rlp(),
            self.asset_type.to_rlp(),
            self.seq.to_rlp(),
            encode_text(&self.metadata),
            encode_optional(self.approver.as_ref()),
            encode_optional(self.registrar.as_ref()),
            encode_list(&self.allowed_script_hashes),
        ]
    }

    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields()).encode())
    }
}

impl Encodable for ChangeAssetScheme {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(self.core_fields(), &self.approvals)
    }
}

impl Decodable for ChangeAssetScheme {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::CHANGE_ASSET_SCHEME, Self::CORE_LEN)?;
        let network_id = NetworkId::from_rlp(&f[1])?;
        Ok(Self {
            network_id,
            shard_id: u16::from_rlp(&f[2])?,
            asset_type: H256::from_rlp(&f[3])?,
            seq: u64::from_rlp(&f[4])?,
            metadata: decode_text(&f[5])?,
            approver: decode_optional_address(&f[6], network_id)?,
            registrar: decode_optional_address(&f[7], network_id)?,
            allowed_script_hashes: decode_list(&f[8])?,
            approvals,
        })
    }
}

/// Mint additional supply of an existing asset type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncreaseAssetSupply {
    pub network_id: NetworkId,
    pub shard_id: u16,
    pub asset_type: H256,
    pub seq: u64,
    pub output: AssetMintOutput,
    pub approvals: Vec<EcdsaSignature>,
}

impl IncreaseAssetSupply {
    const CORE_LEN: usize = 8;

    fn core_fields(&self) -> Vec<RlpItem> {
        let mut fields = vec![
            RlpItem::uint(u64::from(action_tag::INCREASE_ASSET_SUPPLY)),
            self.network_id.to_rlp(),
            self.shard_id.to_rlp(),
            self.asset_type.to_rlp(),
            self.seq.to_rlp(),
        ];
        fields.extend(self.output.rlp_fields());
        fields
    }

    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields()).encode())
    }

    /// The newly supplied asset
    pub fn minted_asset(&self) -> Asset {
        Asset {
            asset_type: self.asset_type,
            lock_script_hash: self.output.lock_script_hash,
            parameters: self.output.parameters.clone(),
            quantity: self.output.supply,
            shard_id: self.shard_id,
            tracker: self.tracker(),
            transaction_output_index: 0,
        }
    }
}

impl Encodable for IncreaseAssetSupply {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(self.core_fields(), &self.approvals)
    }
}

impl Decodable for IncreaseAssetSupply {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::INCREASE_ASSET_SUPPLY, Self::CORE_LEN)?;
        Ok(Self {
            network_id: NetworkId::from_rlp(&f[1])?,
            shard_id: u16::from_rlp(&f[2])?,
            asset_type: H256::from_rlp(&f[3])?,
            seq: u64::from_rlp(&f[4])?,
            output: AssetMintOutput::from_rlp_fields(&f[5..8])?,
            approvals,
        })
    }
}
