//! Decomposing an asset back into its parts

use serde::{Deserialize, Serialize};

use super::{split_approvals, with_approvals, TransactionError};
use crate::asset::{asset_address, Asset, AssetTransferInput, AssetTransferOutput};
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature};
use crate::primitives::{NetworkId, H256};
use crate::rlp::{decode_list, encode_list, Decodable, Encodable, RlpError, RlpItem};
use crate::signing::{
    keyed_partial_hash, select_inputs, select_outputs, HashWithoutScript, InputTarget,
    SignatureTag, SigningError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposeAsset {
    pub network_id: NetworkId,
    pub input: AssetTransferInput,
    pub outputs: Vec<AssetTransferOutput>,
    pub approvals: Vec<EcdsaSignature>,
}

const CORE_LEN: usize = 4;

impl DecomposeAsset {
    pub fn new(network_id: NetworkId, input: AssetTransferInput, outputs: Vec<AssetTransferOutput>) -> Self {
        Self {
            network_id,
            input,
            outputs,
            approvals: Vec::new(),
        }
    }

    fn core_fields(&self, input: &AssetTransferInput, outputs: &[AssetTransferOutput]) -> Vec<RlpItem> {
        vec![
            RlpItem::uint(u64::from(action_tag::DECOMPOSE_ASSET)),
            self.network_id.to_rlp(),
            input.to_rlp(),
            encode_list(outputs),
        ]
    }

    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields(&self.input, &self.outputs)).encode())
    }

    fn output(&self, index: usize) -> Result<&AssetTransferOutput, TransactionError> {
        self.outputs.get(index).ok_or(TransactionError::OutputOutOfRange {
            index,
            len: self.outputs.len(),
        })
    }

    pub fn asset_address(&self, index: usize) -> Result<H256, TransactionError> {
        let output = self.output(index)?;
        Ok(asset_address(&self.tracker(), output.shard_id, index))
    }

    pub fn decomposed_asset(&self, index: usize) -> Result<Asset, TransactionError> {
        let output = self.output(index)?;
        Ok(Asset {
            asset_type: output.asset_type,
            lock_script_hash: output.lock_script_hash,
            parameters: output.parameters.clone(),
            quantity: output.quantity,
            shard_id: output.shard_id,
            tracker: self.tracker(),
            transaction_output_index: index,
        })
    }

    pub fn with_witness(
        self,
        target: InputTarget,
        lock_script: Vec<u8>,
        unlock_script: Vec<u8>,
    ) -> Result<Self, SigningError> {
        match target {
            InputTarget::Input(0) => {
                let input = self.input.with_witness(lock_script, unlock_script)?;
                Ok(Self { input, ..self })
            }
            InputTarget::Input(index) => Err(SigningError::TargetOutOfRange {
                kind: "input",
                index,
                len: 1,
            }),
            InputTarget::Burn(_) => Err(SigningError::UnsupportedTarget("burn")),
        }
    }
}

impl HashWithoutScript for DecomposeAsset {
    fn hash_without_script(
        &self,
        tag: &SignatureTag,
        target: Option<InputTarget>,
    ) -> Result<H256, SigningError> {
        let (inputs, _) = select_inputs(std::slice::from_ref(&self.input), &[], tag.input, target)?;
        let outputs = select_outputs(&self.outputs, &tag.output)?;
        let input = inputs.first().ok_or(SigningError::UnsupportedTarget("input"))?;
        keyed_partial_hash(&RlpItem::List(self.core_fields(input, &outputs)), tag)
    }
}

impl Encodable for DecomposeAsset {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(self.core_fields(&self.input, &self.outputs), &self.approvals)
    }
}

impl Decodable for DecomposeAsset {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::DECOMPOSE_ASSET, CORE_LEN)?;
        Ok(Self {
            network_id: NetworkId::from_rlp(&f[1])?,
            input: AssetTransferInput::from_rlp(&f[2])?,
            outputs: decode_list(&f[3])?,
            approvals,
        })
    }
}
