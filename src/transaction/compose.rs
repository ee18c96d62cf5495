//! Composing several assets into a new one

use serde::{Deserialize, Serialize};

use super::{decode_optional_address, decode_text, encode_text, split_approvals, with_approvals};
use crate::address::PlatformAddress;
use crate::asset::{asset_scheme_address, Asset, AssetMintOutput, AssetTransferInput};
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature};
use crate::primitives::{NetworkId, H160, H256};
use crate::rlp::{decode_list, encode_list, encode_optional, Decodable, Encodable, RlpError, RlpItem};
use crate::signing::{
    attach_witness, keyed_partial_hash, select_inputs, HashWithoutScript, InputTarget, OutputTag,
    SignatureTag, SigningError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeAsset {
    pub network_id: NetworkId,
    pub shard_id: u16,
    pub metadata: String,
    pub approver: Option<PlatformAddress>,
    pub registrar: Option<PlatformAddress>,
    pub allowed_script_hashes: Vec<H160>,
    pub inputs: Vec<AssetTransferInput>,
    pub output: AssetMintOutput,
    pub approvals: Vec<EcdsaSignature>,
}

const CORE_LEN: usize = 11;

impl ComposeAsset {
    pub fn new(
        network_id: NetworkId,
        shard_id: u16,
        metadata: String,
        inputs: Vec<AssetTransferInput>,
        output: AssetMintOutput,
    ) -> Self {
        Self {
            network_id,
            shard_id,
            metadata,
            approver: None,
            registrar: None,
            allowed_script_hashes: Vec::new(),
            inputs,
            output,
            approvals: Vec::new(),
        }
    }

    fn core_fields(&self, inputs: &[AssetTransferInput], output: &AssetMintOutput) -> Vec<RlpItem> {
        let mut fields = vec![
            RlpItem::uint(u64::from(action_tag::COMPOSE_ASSET)),
            self.network_id.to_rlp(),
            self.shard_id.to_rlp(),
            encode_text(&self.metadata),
            encode_optional(self.approver.as_ref()),
            encode_optional(self.registrar.as_ref()),
            encode_list(&self.allowed_script_hashes),
            encode_list(inputs),
        ];
        fields.extend(output.rlp_fields());
        fields
    }

    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields(&self.inputs, &self.output)).encode())
    }

    pub fn asset_scheme_address(&self) -> H256 {
        asset_scheme_address(&self.tracker(), self.shard_id)
    }

    pub fn asset_type(&self) -> H256 {
        self.asset_scheme_address()
    }

    pub fn composed_asset(&self) -> Asset {
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

    pub fn with_witness(
        mut self,
        target: InputTarget,
        lock_script: Vec<u8>,
        unlock_script: Vec<u8>,
    ) -> Result<Self, SigningError> {
        match target {
            InputTarget::Input(index) => {
                attach_witness(&mut self.inputs, index, "input", lock_script, unlock_script)?
            }
            InputTarget::Burn(_) => return Err(SigningError::UnsupportedTarget("burn")),
        }
        Ok(self)
    }
}

impl HashWithoutScript for ComposeAsset {
    /// The single output is attested by `All`; an empty index set stands for
    /// "no output" and hashes a zeroed placeholder.
    fn hash_without_script(
        &self,
        tag: &SignatureTag,
        target: Option<InputTarget>,
    ) -> Result<H256, SigningError> {
        let (inputs, _) = select_inputs(&self.inputs, &[], tag.input, target)?;
        let output = match &tag.output {
            OutputTag::All => self.output.clone(),
            OutputTag::Indices(indices) if indices.is_empty() => AssetMintOutput::zero(),
            OutputTag::Indices(_) => {
                return Err(SigningError::UnsupportedTag(
                    "compose outputs must be all or an empty set",
                ))
            }
        };
        keyed_partial_hash(&RlpItem::List(self.core_fields(&inputs, &output)), tag)
    }
}

impl Encodable for ComposeAsset {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(self.core_fields(&self.inputs, &self.output), &self.approvals)
    }
}

impl Decodable for ComposeAsset {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::COMPOSE_ASSET, CORE_LEN)?;
        let network_id = NetworkId::from_rlp(&f[1])?;
        Ok(Self {
            network_id,
            shard_id: u16::from_rlp(&f[2])?,
            metadata: decode_text(&f[3])?,
            approver: decode_optional_address(&f[4], network_id)?,
            registrar: decode_optional_address(&f[5], network_id)?,
            allowed_script_hashes: decode_list(&f[6])?,
            inputs: decode_list(&f[7])?,
            output: AssetMintOutput::from_rlp_fields(&f[8..11])?,
            approvals,
        })
    }
}
