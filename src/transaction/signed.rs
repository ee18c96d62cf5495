//! Signed transactions

use serde::{Deserialize, Serialize};

use super::{Action, Transaction, TransactionError};
use crate::address::PlatformAddress;
use crate::crypto::{blake256, EcdsaSignature, PublicKey, SignatureError};
use crate::primitives::{NetworkId, H160, H256, U64};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// A transaction with its sender's signature, optionally with the block
/// position reported by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SignedTransactionJson", try_from = "SignedTransactionJson")]
pub struct SignedTransaction {
    seq: u64,
    fee: U64,
    network_id: NetworkId,
    action: Action,
    signature: EcdsaSignature,
    block_number: Option<u64>,
    block_hash: Option<H256>,
    transaction_index: Option<usize>,
}

impl SignedTransaction {
    /// Attach a signature made over `unsigned.unsigned_hash()`
    pub fn new(unsigned: Transaction, signature: EcdsaSignature) -> Result<Self, TransactionError> {
        Ok(Self {
            seq: unsigned.seq().ok_or(TransactionError::SeqNotSet)?,
            fee: unsigned.fee().ok_or(TransactionError::FeeNotSet)?,
            network_id: unsigned.network_id(),
            action: unsigned.action().clone(),
            signature,
            block_number: None,
            block_hash: None,
            transaction_index: None,
        })
    }

    /// Record where the transaction was included
    pub fn with_block_info(mut self, block_number: u64, block_hash: H256, transaction_index: usize) -> Self {
        self.block_number = Some(block_number);
        self.block_hash = Some(block_hash);
        self.transaction_index = Some(transaction_index);
        self
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn fee(&self) -> U64 {
        self.fee
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn signature(&self) -> &EcdsaSignature {
        &self.signature
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    pub fn block_hash(&self) -> Option<H256> {
        self.block_hash
    }

    pub fn transaction_index(&self) -> Option<usize> {
        self.transaction_index
    }

    /// Not yet included in a block
    pub fn is_pending(&self) -> bool {
        self.block_number.is_none()
    }

    /// The envelope without the signature, seq and fee set
    pub fn unsigned(&self) -> Transaction {
        Transaction::from_parts(self.network_id, self.action.clone(), self.seq, self.fee)
    }

    fn unsigned_fields(&self) -> Vec<RlpItem> {
        vec![
            self.seq.to_rlp(),
            self.fee.to_rlp(),
            self.network_id.to_rlp(),
            self.action.to_rlp(),
        ]
    }

    /// Message that was signed
    pub fn unsigned_hash(&self) -> H256 {
        blake256(&RlpItem::List(self.unsigned_fields()).encode())
    }

    /// Network identifier of the transaction, covering the signature
    pub fn hash(&self) -> H256 {
        blake256(&self.rlp_bytes())
    }

    pub fn signer_public(&self) -> Result<PublicKey, SignatureError> {
        self.signature.recover(&self.unsigned_hash())
    }

    pub fn signer_account_id(&self) -> Result<H160, SignatureError> {
        Ok(self.signer_public()?.account_id())
    }

    pub fn signer_address(&self) -> Result<PlatformAddress, SignatureError> {
        Ok(PlatformAddress::from_account_id(self.network_id, self.signer_account_id()?))
    }

    pub fn to_json(&self) -> Result<serde_json::Value, TransactionError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, TransactionError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// `[seq, fee, networkId, action, signature]`
impl Encodable for SignedTransaction {
    fn to_rlp(&self) -> RlpItem {
        let mut fields = self.unsigned_fields();
        fields.push(self.signature.to_rlp());
        RlpItem::List(fields)
    }
}

impl Decodable for SignedTransaction {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(5)?;
        let network_id = NetworkId::from_rlp(&f[2])?;
        Ok(Self {
            seq: u64::from_rlp(&f[0])?,
            fee: U64::from_rlp(&f[1])?,
            network_id,
            action: Action::from_rlp_on(&f[3], network_id)?,
            signature: EcdsaSignature::from_rlp(&f[4])?,
            block_number: None,
            block_hash: None,
            transaction_index: None,
        })
    }
}

/// Node JSON form
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignedTransactionJson {
    block_number: Option<u64>,
    block_hash: Option<H256>,
    transaction_index: Option<usize>,
    sig: EcdsaSignature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<H256>,
    seq: u64,
    fee: U64,
    network_id: NetworkId,
    action: Action,
}

impl From<SignedTransaction> for SignedTransactionJson {
    fn from(tx: SignedTransaction) -> Self {
        Self {
            hash: Some(tx.hash()),
            block_number: tx.block_number,
            block_hash: tx.block_hash,
            transaction_index: tx.transaction_index,
            sig: tx.signature,
            seq: tx.seq,
            fee: tx.fee,
            network_id: tx.network_id,
            action: tx.action,
        }
    }
}

impl TryFrom<SignedTransactionJson> for SignedTransaction {
    type Error = TransactionError;

    fn try_from(json: SignedTransactionJson) -> Result<Self, Self::Error> {
        let tx = SignedTransaction {
            seq: json.seq,
            fee: json.fee,
            network_id: json.network_id,
            action: json.action,
            signature: json.sig,
            block_number: json.block_number,
            block_hash: json.block_hash,
            transaction_index: json.transaction_index,
        };
        if let Some(declared) = json.hash {
            let computed = tx.hash();
            if declared != computed {
                return Err(TransactionError::HashMismatch { declared, computed });
            }
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;
    use crate::transaction::Pay;

    fn signed() -> SignedTransaction {
        let secret = PrivateKey::from_bytes(&[0x11; 32]).unwrap();
        let tc = NetworkId::new("tc").unwrap();
        let receiver = PlatformAddress::from_account_id(tc, H160([1; 20]));
        Transaction::new(tc, Pay::new(receiver, U64::new(5)))
            .sign(&secret, 1, U64::new(10))
            .unwrap()
    }

    #[test]
    fn test_hash_covers_signature() {
        let tx = signed();
        let mut fields = tx.unsigned_fields();
        fields.push(tx.signature.to_rlp());
        assert_eq!(tx.hash(), blake256(&RlpItem::List(fields).encode()));
        assert_eq!(tx.unsigned_hash(), tx.unsigned().unsigned_hash().unwrap());
    }

    #[test]
    fn test_rlp_roundtrip() {
        let tx = signed();
        let decoded = SignedTransaction::decode(&tx.rlp_bytes()).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.signer_public().unwrap(), tx.signer_public().unwrap());
    }

    #[test]
    fn test_json_roundtrip_with_block_info() {
        let tx = signed().with_block_info(12, H256([9; 32]), 0);
        assert!(!tx.is_pending());
        let json = tx.to_json().unwrap();
        assert_eq!(json["hash"], serde_json::json!(tx.hash()));
        assert_eq!(json["blockNumber"], 12);
        assert_eq!(json["transactionIndex"], 0);
        assert_eq!(json["action"]["type"], "pay");
        assert_eq!(SignedTransaction::from_json(json).unwrap(), tx);
    }

    #[test]
    fn test_node_json_with_bech32_receiver() {
        let tx = signed();
        let node = serde_json::json!({
            "blockNumber": null,
            "blockHash": null,
            "transactionIndex": null,
            "sig": tx.signature(),
            "seq": 1,
            "fee": "0xa",
            "networkId": "tc",
            "action": {
                "type": "pay",
                "receiver": "tcc1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyxrj9dm",
                "quantity": "0x5"
            }
        });
        let parsed = SignedTransaction::from_json(node.clone()).unwrap();
        assert_eq!(parsed, tx);
        assert_eq!(parsed.signer_public().unwrap(), tx.signer_public().unwrap());

        let mut emitted = parsed.to_json().unwrap();
        assert_eq!(emitted["hash"], serde_json::json!(tx.hash()));
        emitted.as_object_mut().unwrap().remove("hash");
        assert_eq!(emitted, node);
    }

    #[test]
    fn test_pending_json_has_null_block_fields() {
        let json = signed().to_json().unwrap();
        assert!(json["blockNumber"].is_null());
        assert!(json["blockHash"].is_null());
        assert!(json["transactionIndex"].is_null());
    }

    #[test]
    fn test_declared_hash_checked() {
        let mut json = signed().to_json().unwrap();
        json["hash"] = serde_json::json!(H256::zero());
        assert!(matches!(
            SignedTransaction::from_json(json),
            Err(TransactionError::Json(_))
        ));
    }

    #[test]
    fn test_signer_address() {
        let tx = signed();
        let address = tx.signer_address().unwrap();
        assert_eq!(address.network_id, tx.network_id());
        assert_eq!(address.account_id, tx.signer_account_id().unwrap());
    }
}
