//! Certified text storage

use serde::{Deserialize, Serialize};

use super::{decode_text, encode_text, expect_tag};
use crate::address::PlatformAddress;
use crate::constants::action_tag;
use crate::crypto::{blake256, EcdsaSignature, PrivateKey, PublicKey, SignatureError};
use crate::primitives::{NetworkId, H256};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// Store `content` on chain, certified by the holder of `certifier`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub content: String,
    pub certifier: PlatformAddress,
    pub signature: EcdsaSignature,
}

impl Store {
    /// Certify `content` with `secret`
    pub fn sign(
        network_id: NetworkId,
        content: String,
        secret: &PrivateKey,
    ) -> Result<Self, SignatureError> {
        let signature = secret.sign(&Self::content_hash(&content))?;
        Ok(Self {
            content,
            certifier: PlatformAddress::from_public(network_id, &secret.public_key()),
            signature,
        })
    }

    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(4)?;
        expect_tag(&f[0], action_tag::STORE)?;
        Ok(Self {
            content: decode_text(&f[1])?,
            certifier: PlatformAddress::from_rlp_on(&f[2], network_id)?,
            signature: EcdsaSignature::from_rlp(&f[3])?,
        })
    }

    /// Message the certifier signs: blake256 of the RLP-encoded content
    pub fn content_hash(content: &str) -> H256 {
        blake256(&encode_text(content).encode())
    }

    /// Whether the signature was made by `certifier`
    pub fn verify(&self) -> bool {
        matches!(
            self.signature.recover(&Self::content_hash(&self.content)),
            Ok(public) if public.account_id() == self.certifier.account_id
        )
    }
}

impl Encodable for Store {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::STORE)),
            encode_text(&self.content),
            self.certifier.to_rlp(),
            self.signature.to_rlp(),
        ])
    }
}

/// Remove stored text identified by the hash of its store transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remove {
    pub hash: H256,
    pub signature: EcdsaSignature,
}

impl Remove {
    pub fn sign(hash: H256, secret: &PrivateKey) -> Result<Self, SignatureError> {
        Ok(Self {
            hash,
            signature: secret.sign(&hash)?,
        })
    }

    /// Key that authorized the removal
    pub fn signer_public(&self) -> Result<PublicKey, SignatureError> {
        self.signature.recover(&self.hash)
    }
}

impl Encodable for Remove {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::REMOVE)),
            self.hash.to_rlp(),
            self.signature.to_rlp(),
        ])
    }
}

impl Decodable for Remove {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(3)?;
        expect_tag(&f[0], action_tag::REMOVE)?;
        Ok(Self {
            hash: H256::from_rlp(&f[1])?,
            signature: EcdsaSignature::from_rlp(&f[2])?,
        })
    }
}
