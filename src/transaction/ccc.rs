//! Moving CCC between accounts and the asset layer

use serde::{Deserialize, Serialize};

use super::expect_tag;
use crate::address::{AssetAddress, PlatformAddress};
use crate::asset::{owner_from_address, AssetTransferInput};
use crate::constants::action_tag;
use crate::crypto::blake256;
use crate::primitives::{hex_serde, NetworkId, H160, H256, U64};
use crate::rlp::{decode_bytes_list, encode_bytes_list, Decodable, Encodable, RlpError, RlpItem};
use crate::signing::{
    keyed_partial_hash, HashWithoutScript, InputTarget, SignatureTag, SigningError,
};

/// Wrap CCC from the payer's balance into an asset on `shard_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapCcc {
    pub shard_id: u16,
    pub lock_script_hash: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters: Vec<Vec<u8>>,
    pub quantity: U64,
    pub payer: PlatformAddress,
}

impl WrapCcc {
    pub fn to_address(
        shard_id: u16,
        recipient: &AssetAddress,
        quantity: U64,
        payer: PlatformAddress,
    ) -> Self {
        let (lock_script_hash, parameters) = owner_from_address(recipient);
        Self {
            shard_id,
            lock_script_hash,
            parameters,
            quantity,
            payer,
        }
    }
}

impl Encodable for WrapCcc {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::WRAP_CCC)),
            self.shard_id.to_rlp(),
            self.lock_script_hash.to_rlp(),
            encode_bytes_list(&self.parameters),
            self.quantity.to_rlp(),
            self.payer.to_rlp(),
        ])
    }
}

impl WrapCcc {
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(6)?;
        expect_tag(&f[0], action_tag::WRAP_CCC)?;
        Ok(Self {
            shard_id: u16::from_rlp(&f[1])?,
            lock_script_hash: H160::from_rlp(&f[2])?,
            parameters: decode_bytes_list(&f[3])?,
            quantity: U64::from_rlp(&f[4])?,
            payer: PlatformAddress::from_rlp_on(&f[5], network_id)?,
        })
    }
}

/// Burn a wrapped-CCC asset and credit `receiver`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnwrapCcc {
    pub network_id: NetworkId,
    pub burn: AssetTransferInput,
    pub receiver: PlatformAddress,
}

impl UnwrapCcc {
    pub fn new(network_id: NetworkId, burn: AssetTransferInput, receiver: PlatformAddress) -> Self {
        Self {
            network_id,
            burn,
            receiver,
        }
    }

    fn core(&self, burn: &AssetTransferInput) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::UNWRAP_CCC)),
            self.network_id.to_rlp(),
            burn.to_rlp(),
            self.receiver.to_rlp(),
        ])
    }

    pub fn tracker(&self) -> H256 {
        blake256(&self.rlp_bytes())
    }

    /// Attach the burn's witness
    pub fn with_witness(
        self,
        target: InputTarget,
        lock_script: Vec<u8>,
        unlock_script: Vec<u8>,
    ) -> Result<Self, SigningError> {
        check_burn_target(target)?;
        let burn = self.burn.with_witness(lock_script, unlock_script)?;
        Ok(Self { burn, ..self })
    }

    /// The unwrapped quantity
    pub fn quantity(&self) -> U64 {
        self.burn.prev_out.quantity
    }
}

fn check_burn_target(target: InputTarget) -> Result<(), SigningError> {
    match target {
        InputTarget::Burn(0) => Ok(()),
        InputTarget::Burn(index) => Err(SigningError::TargetOutOfRange {
            kind: "burn",
            index,
            len: 1,
        }),
        InputTarget::Input(_) => Err(SigningError::UnsupportedTarget("input")),
    }
}

impl HashWithoutScript for UnwrapCcc {
    /// Only the all/all tag is accepted; the burn is the sole spending slot.
    fn hash_without_script(
        &self,
        tag: &SignatureTag,
        target: Option<InputTarget>,
    ) -> Result<H256, SigningError> {
        if !tag.is_all() {
            return Err(SigningError::UnsupportedTag("unwrapCCC only supports all/all"));
        }
        if let Some(target) = target {
            check_burn_target(target)?;
        }
        keyed_partial_hash(&self.core(&self.burn.without_script()), tag)
    }
}

impl Encodable for UnwrapCcc {
    fn to_rlp(&self) -> RlpItem {
        self.core(&self.burn)
    }
}

impl Decodable for UnwrapCcc {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(4)?;
        expect_tag(&f[0], action_tag::UNWRAP_CCC)?;
        let network_id = NetworkId::from_rlp(&f[1])?;
        Ok(Self {
            network_id,
            burn: AssetTransferInput::from_rlp(&f[2])?,
            receiver: PlatformAddress::from_rlp_on(&f[3], network_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetOutPoint;
    use crate::signing::{InputTag, OutputTag};
    use crate::transaction::Action;

    fn unwrap() -> UnwrapCcc {
        let prev_out = AssetOutPoint::new(H256([1; 32]), 0, H256([2; 32]), 0, U64::new(50));
        UnwrapCcc::new(
            NetworkId::new("tc").unwrap(),
            AssetTransferInput::new(prev_out, None),
            PlatformAddress::from_account_id(NetworkId::TESTNET, H160([3; 20])),
        )
    }

    #[test]
    fn test_roundtrips() {
        let wrap: Action = WrapCcc {
            shard_id: 0,
            lock_script_hash: H160([1; 20]),
            parameters: vec![vec![2; 20]],
            quantity: U64::new(1000),
            payer: PlatformAddress::from_account_id(NetworkId::TESTNET, H160([3; 20])),
        }
        .into();
        for action in [wrap, unwrap().into()] {
            assert_eq!(Action::decode_on(&action.rlp_bytes(), NetworkId::TESTNET).unwrap(), action);
            assert_eq!(Action::from_json(action.to_json().unwrap()).unwrap(), action);
        }
    }

    #[test]
    fn test_only_full_tag() {
        let tx = unwrap();
        assert!(tx.hash_without_script(&SignatureTag::all(), None).is_ok());
        let partial = SignatureTag::new(InputTag::Single, OutputTag::All);
        assert!(matches!(
            tx.hash_without_script(&partial, Some(InputTarget::Burn(0))),
            Err(SigningError::UnsupportedTag(_))
        ));
        assert_eq!(
            tx.hash_without_script(&SignatureTag::all(), Some(InputTarget::Input(0))),
            Err(SigningError::UnsupportedTarget("input"))
        );
    }

    #[test]
    fn test_witness_excluded_from_partial_hash() {
        let tx = unwrap();
        let before = tx.hash_without_script(&SignatureTag::all(), None).unwrap();
        let signed = tx
            .clone()
            .with_witness(InputTarget::Burn(0), vec![1], vec![2])
            .unwrap();
        assert_eq!(signed.hash_without_script(&SignatureTag::all(), None).unwrap(), before);
        assert_ne!(signed.tracker(), tx.tracker());
        assert_eq!(signed.quantity(), U64::new(50));
    }
}
