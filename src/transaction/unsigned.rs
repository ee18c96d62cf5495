//! Unsigned transaction envelope

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Action, SignedTransaction, TransactionError};
use crate::config::ChainConfig;
use crate::crypto::{blake256, PrivateKey};
use crate::keystore::KeyStore;
use crate::primitives::{NetworkId, H256, U64};
use crate::rlp::{Encodable, RlpItem};

/// An action with its envelope. `seq` and `fee` can each be set once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    action: Action,
    network_id: NetworkId,
    seq: Option<u64>,
    fee: Option<U64>,
}

impl Transaction {
    pub fn new(network_id: NetworkId, action: impl Into<Action>) -> Self {
        Self {
            action: action.into(),
            network_id,
            seq: None,
            fee: None,
        }
    }

    pub(crate) fn from_parts(network_id: NetworkId, action: Action, seq: u64, fee: U64) -> Self {
        Self {
            action,
            network_id,
            seq: Some(seq),
            fee: Some(fee),
        }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn seq(&self) -> Option<u64> {
        self.seq
    }

    pub fn fee(&self) -> Option<U64> {
        self.fee
    }

    pub fn set_seq(&mut self, seq: u64) -> Result<(), TransactionError> {
        if self.seq.is_some() {
            return Err(TransactionError::SeqAlreadySet);
        }
        self.seq = Some(seq);
        Ok(())
    }

    pub fn set_fee(&mut self, fee: U64) -> Result<(), TransactionError> {
        if self.fee.is_some() {
            return Err(TransactionError::FeeAlreadySet);
        }
        self.fee = Some(fee);
        Ok(())
    }

    /// `[seq, fee, networkId, action]`; fails until both seq and fee are set
    pub fn to_rlp(&self) -> Result<RlpItem, TransactionError> {
        let seq = self.seq.ok_or(TransactionError::SeqNotSet)?;
        let fee = self.fee.ok_or(TransactionError::FeeNotSet)?;
        Ok(RlpItem::List(self.rlp_fields(seq, fee)))
    }

    fn rlp_fields(&self, seq: u64, fee: U64) -> Vec<RlpItem> {
        vec![
            seq.to_rlp(),
            fee.to_rlp(),
            self.network_id.to_rlp(),
            self.action.to_rlp(),
        ]
    }

    pub fn rlp_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(self.to_rlp()?.encode())
    }

    /// Message signed by the sender
    pub fn unsigned_hash(&self) -> Result<H256, TransactionError> {
        Ok(blake256(&self.rlp_bytes()?))
    }

    /// Set seq and fee, then sign with `secret`
    pub fn sign(mut self, secret: &PrivateKey, seq: u64, fee: U64) -> Result<SignedTransaction, TransactionError> {
        self.set_seq(seq)?;
        self.set_fee(fee)?;
        let hash = self.unsigned_hash()?;
        let signature = secret.sign(&hash)?;
        debug!(%hash, seq, %fee, action = self.action.type_name(), "signed transaction");
        SignedTransaction::new(self, signature)
    }

    /// Sign paying the configured minimum fee for this action
    pub fn sign_with_config(
        self,
        secret: &PrivateKey,
        seq: u64,
        config: &ChainConfig,
    ) -> Result<SignedTransaction, TransactionError> {
        if self.network_id != config.network_id {
            return Err(TransactionError::NetworkMismatch {
                expected: config.network_id,
                actual: self.network_id,
            });
        }
        let fee = config.fees.min_fee(&self.action);
        self.sign(secret, seq, fee)
    }

    /// Sign through a key store
    pub async fn sign_with_key_store(
        mut self,
        key_store: &dyn KeyStore,
        key_id: &str,
        passphrase: Option<&str>,
        seq: u64,
        fee: U64,
    ) -> Result<SignedTransaction, TransactionError> {
        self.set_seq(seq)?;
        self.set_fee(fee)?;
        let hash = self.unsigned_hash()?;
        let signature = key_store.sign(key_id, &hash, passphrase).await?;
        debug!(%hash, seq, %fee, key_id, action = self.action.type_name(), "signed transaction with key store");
        SignedTransaction::new(self, signature)
    }
}
