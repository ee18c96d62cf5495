//! Transfer inputs and their witnesses

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AssetOutPoint, Timelock};
use crate::rlp::{decode_optional, encode_optional, Decodable, Encodable, RlpError, RlpItem};
use crate::signing::SigningError;

/// An asset being spent. Scripts stay empty until a witness is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransferInput {
    pub prev_out: AssetOutPoint,
    pub timelock: Option<Timelock>,
    lock_script: Vec<u8>,
    unlock_script: Vec<u8>,
}

impl AssetTransferInput {
    pub fn new(prev_out: AssetOutPoint, timelock: Option<Timelock>) -> Self {
        Self {
            prev_out,
            timelock,
            lock_script: Vec::new(),
            unlock_script: Vec::new(),
        }
    }

    pub fn lock_script(&self) -> &[u8] {
        &self.lock_script
    }

    pub fn unlock_script(&self) -> &[u8] {
        &self.unlock_script
    }

    pub fn has_witness(&self) -> bool {
        !self.lock_script.is_empty() || !self.unlock_script.is_empty()
    }

    /// Attach lock and unlock scripts, producing the witnessed input
    pub fn with_witness(self, lock_script: Vec<u8>, unlock_script: Vec<u8>) -> Result<Self, SigningError> {
        if self.has_witness() {
            return Err(SigningError::WitnessAlreadyAttached);
        }
        debug!(
            tracker = %self.prev_out.tracker,
            index = self.prev_out.index,
            "attaching witness to input"
        );
        Ok(Self {
            lock_script,
            unlock_script,
            ..self
        })
    }

    /// Projection used for partial hashing
    pub fn without_script(&self) -> Self {
        Self::new(self.prev_out.clone(), self.timelock)
    }
}

impl Encodable for AssetTransferInput {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            self.prev_out.to_rlp(),
            encode_optional(self.timelock.as_ref()),
            RlpItem::bytes(self.lock_script.clone()),
            RlpItem::bytes(self.unlock_script.clone()),
        ])
    }
}

impl Decodable for AssetTransferInput {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let fields = item.expect_list(4)?;
        Ok(Self {
            prev_out: AssetOutPoint::from_rlp(&fields[0])?,
            timelock: decode_optional(&fields[1])?,
            lock_script: fields[2].as_bytes()?.to_vec(),
            unlock_script: fields[3].as_bytes()?.to_vec(),
        })
    }
}
