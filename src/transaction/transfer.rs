//! Asset transfers

use serde::{Deserialize, Serialize};

use super::{decode_text, encode_text, split_approvals, sum_quantities, with_approvals, TransactionError};
use crate::asset::{asset_address, Asset, AssetTransferInput, AssetTransferOutput, OrderOnTransfer};
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature};
use crate::primitives::{NetworkId, H256, U64};
use crate::rlp::{decode_list, decode_optional, encode_list, encode_optional, Decodable, Encodable, RlpError, RlpItem};
use crate::signing::{
    attach_witness, keyed_partial_hash, select_inputs, select_outputs, HashWithoutScript,
    InputTarget, SignatureTag, SigningError,
};

/// Spend inputs (and burn `burns`) into new outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAsset {
    pub network_id: NetworkId,
    pub burns: Vec<AssetTransferInput>,
    pub inputs: Vec<AssetTransferInput>,
    pub outputs: Vec<AssetTransferOutput>,
    pub orders: Vec<OrderOnTransfer>,
    pub metadata: String,
    pub approvals: Vec<EcdsaSignature>,
    pub expiration: Option<u64>,
}

const CORE_LEN: usize = 8;

impl TransferAsset {
    pub fn new(
        network_id: NetworkId,
        inputs: Vec<AssetTransferInput>,
        outputs: Vec<AssetTransferOutput>,
    ) -> Self {
        Self {
            network_id,
            burns: Vec::new(),
            inputs,
            outputs,
            orders: Vec::new(),
            metadata: String::new(),
            approvals: Vec::new(),
            expiration: None,
        }
    }

    fn core_fields(
        &self,
        burns: &[AssetTransferInput],
        inputs: &[AssetTransferInput],
        outputs: &[AssetTransferOutput],
    ) -> Vec<RlpItem> {
        vec![
            RlpItem::uint(u64::from(action_tag::TRANSFER_ASSET)),
            self.network_id.to_rlp(),
            encode_list(burns),
            encode_list(inputs),
            encode_list(outputs),
            encode_list(&self.orders),
            encode_text(&self.metadata),
            encode_optional(self.expiration.as_ref()),
        ]
    }

    pub fn tracker(&self) -> H256 {
        blake256(&RlpItem::List(self.core_fields(&self.burns, &self.inputs, &self.outputs)).encode())
    }

    fn output(&self, index: usize) -> Result<&AssetTransferOutput, TransactionError> {
        self.outputs.get(index).ok_or(TransactionError::OutputOutOfRange {
            index,
            len: self.outputs.len(),
        })
    }

    /// Address of the asset created by output `index`
    pub fn asset_address(&self, index: usize) -> Result<H256, TransactionError> {
        let output = self.output(index)?;
        Ok(asset_address(&self.tracker(), output.shard_id, index))
    }

    /// The asset that output `index` creates
    pub fn transfer_output_asset(&self, index: usize) -> Result<Asset, TransactionError> {
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

    /// Total spent quantity of `asset_type`, burns included
    pub fn input_quantity(&self, asset_type: &H256) -> Result<U64, TransactionError> {
        sum_quantities(
            self.inputs
                .iter()
                .chain(self.burns.iter())
                .filter(|input| input.prev_out.asset_type == *asset_type)
                .map(|input| input.prev_out.quantity),
        )
    }

    pub fn output_quantity(&self, asset_type: &H256) -> Result<U64, TransactionError> {
        sum_quantities(
            self.outputs
                .iter()
                .filter(|output| output.asset_type == *asset_type)
                .map(|output| output.quantity),
        )
    }

    /// Attach the witness of one input or burn
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
            InputTarget::Burn(index) => {
                attach_witness(&mut self.burns, index, "burn", lock_script, unlock_script)?
            }
        }
        Ok(self)
    }
}

impl HashWithoutScript for TransferAsset {
    fn hash_without_script(
        &self,
        tag: &SignatureTag,
        target: Option<InputTarget>,
    ) -> Result<H256, SigningError> {
        if !self.orders.is_empty() && !tag.is_all() {
            return Err(SigningError::OrdersRequireFullTag);
        }
        let (inputs, burns) = select_inputs(&self.inputs, &self.burns, tag.input, target)?;
        let outputs = select_outputs(&self.outputs, &tag.output)?;
        keyed_partial_hash(&RlpItem::List(self.core_fields(&burns, &inputs, &outputs)), tag)
    }
}

impl Encodable for TransferAsset {
    fn to_rlp(&self) -> RlpItem {
        with_approvals(
            self.core_fields(&self.burns, &self.inputs, &self.outputs),
            &self.approvals,
        )
    }
}

impl Decodable for TransferAsset {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let (f, approvals) = split_approvals(item, action_tag::TRANSFER_ASSET, CORE_LEN)?;
        Ok(Self {
            network_id: NetworkId::from_rlp(&f[1])?,
            burns: decode_list(&f[2])?,
            inputs: decode_list(&f[3])?,
            outputs: decode_list(&f[4])?,
            orders: decode_list(&f[5])?,
            metadata: decode_text(&f[6])?,
            expiration: decode_optional(&f[7])?,
            approvals,
        })
    }
}
