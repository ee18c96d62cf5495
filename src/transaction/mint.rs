//! Asset minting

use serde::{Deserialize, Serialize};

use super::{decode_optional_address, decode_text, encode_text, split_approvals, with_approvals};
use crate::address::PlatformAddress;
use crate::asset::{asset_scheme_address, Asset, AssetMintOutput};
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature};
use crate::primitives::{NetworkId, H160, H256};
use crate::rlp::{decode_list, encode_list, encode_optional, Decodable, Encodable, RlpError, RlpItem};

/// Create a new asset scheme and its initial supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintAsset {
    pub network_id: NetworkId,
    pub shard_id: u16,
    pub metadata: String,
    pub output: AssetMintOutput,
    pub approver: Option<PlatformAddress>,
    pub registrar: Option<PlatformAddress>,
    pub allowed_script_hashes: Vec<H160>,
    pub approvals: Vec<EcdsaSignature>,
}

const CORE_LEN: usize = 10;

impl MintAsset {
    pub fn new(network_id: NetworkId, shard_id: u16, metadata: String, output: AssetMintOutput) -> Self {
        Self {
            network_id,
            shard_id,
            metadata,
            output,
            approver: None,
            registrar: None,
            allowed_script_hashes: Vec::new(),
            approvals: Vec::new(),
        }
    }

    fn core_fields(&self) -> Vec<RlpItem> {
        let mut fields = vec![
            RlpItem::uint(u64::from(action_tag::MINT_ASSET)),
            self.network_id.to_rlp(),
            self.shard_id.to_rlp(),
            encode_text(&self.metadata),
            encode_optional(self.approver.as_ref()),
            encode_optional(self.registrar.as_ref()),
            encode_list(&self.allowed_script_hashes),
        ];
        fields.extend(self.output.rlp_fields());
        fields
    }

    /// Identity of this mint, independent of approvals
    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields()).encode())
    }

    pub fn asset_scheme_address(&self) -> H256 {
        asset_scheme_address(&self.tracker(), self.shard_id)
    }

    /// Asset type of the minted supply
    pub fn asset_type(&self) -> H256 {
        self.asset_scheme_address()
    }

    pub fn minted_asset(&self) -> Asset {
        Asset {
            asset_type: self.asset_type(),
            lock_script_hash: self.output.lock_script_hash,
            parameters: self.output.parameters.clone(),
            quantity: self.output.supply,
            shard_id: self.shard_id,
            tracker: self.tracker(),
            transaction_output_index: 0,
        }
    }
}

impl Encodable for MintAsset {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(self.core_fields(), &self.approvals)
    }
}

impl Decodable for MintAsset {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::MINT_ASSET, CORE_LEN)?;
        let network_id = NetworkId::from_rlp(&f[1])?;
        Ok(Self {
            network_id,
            shard_id: u16::from_rlp(&f[2])?,
            metadata: decode_text(&f[3])?,
            approver: decode_optional_address(&f[4], network_id)?,
            registrar: decode_optional_address(&f[5], network_id)?,
            allowed_script_hashes: decode_list(&f[6])?,
            output: AssetMintOutput::from_rlp_fields(&f[7..10])?,
            approvals,
        })
    }
}
