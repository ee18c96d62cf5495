//! ECDSA signatures over secp256k1
//!
//! Transactions are signed with recoverable signatures (`r ‖ s ‖ v`, 65
//! bytes) so the signer's public key never travels on the wire.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::blake160;
use crate::primitives::{strip_hex_prefix, H160, H256, H512};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// Signature errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Signing failed: {0}")]
    SigningFailed(String),
    #[error("Public key recovery failed")]
    RecoveryFailed,
}

/// 32-byte secp256k1 secret
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

impl PrivateKey {
    /// Generate a new random private key
    pub fn generate() -> Self {
        PrivateKey(SigningKey::random(&mut OsRng))
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, SignatureError> {
        SigningKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|_| SignatureError::InvalidPrivateKey)
    }

    /// Parse a 64-digit hex secret, with or without `0x`
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let secret = H256::from_hex(s).map_err(|_| SignatureError::InvalidPrivateKey)?;
        Self::from_bytes(&secret.0)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.0.verifying_key())
    }

    /// Sign a 32-byte message hash
    pub fn sign(&self, message: &H256) -> Result<EcdsaSignature, SignatureError> {
        let (signature, recovery_id) = self
            .0
            .sign_prehash_recoverable(&message.0)
            .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(EcdsaSignature(out))
    }
}

/// Uncompressed public key without the SEC1 `0x04` tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub H512);

impl PublicKey {
    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut out = [0u8; 64];
        out.copy_from_slice(&point.as_bytes()[1..]);
        PublicKey(H512(out))
    }

    /// Validate and wrap 64 raw bytes
    pub fn from_h512(value: H512) -> Result<Self, SignatureError> {
        let key = PublicKey(value);
        key.verifying_key()?;
        Ok(key)
    }

    fn verifying_key(&self) -> Result<VerifyingKey, SignatureError> {
        let mut sec1 = [0u8; 65];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(&self.0 .0);
        VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| SignatureError::InvalidPublicKey)
    }

    pub fn as_h512(&self) -> &H512 {
        &self.0
    }

    /// Account id: blake160 of the 64 key bytes
    pub fn account_id(&self) -> H160 {
        blake160(&self.0 .0)
    }

    /// Verify a signature by recovering its signer
    pub fn verify(&self, message: &H256, signature: &EcdsaSignature) -> bool {
        matches!(signature.recover(message), Ok(recovered) if recovered == *self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = H512::deserialize(deserializer)?;
        PublicKey::from_h512(raw).map_err(de::Error::custom)
    }
}

/// 65-byte recoverable signature `r ‖ s ‖ v`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcdsaSignature(pub [u8; 65]);

impl EcdsaSignature {
    pub const LEN: usize = 65;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != Self::LEN {
            return Err(SignatureError::InvalidSignature);
        }
        let mut out = [0u8; 65];
        out.copy_from_slice(bytes);
        Ok(EcdsaSignature(out))
    }

    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes =
            hex::decode(strip_hex_prefix(s)).map_err(|_| SignatureError::InvalidSignature)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; 65] {
        self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Recover the public key that produced this signature over `message`
    pub fn recover(&self, message: &H256) -> Result<PublicKey, SignatureError> {
        let signature =
            Signature::from_slice(&self.0[..64]).map_err(|_| SignatureError::InvalidSignature)?;
        let recovery_id = RecoveryId::from_byte(self.v()).ok_or(SignatureError::InvalidSignature)?;
        let key = VerifyingKey::recover_from_prehash(&message.0, &signature, recovery_id)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(PublicKey::from_verifying_key(&key))
    }
}

impl fmt::Display for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(self.0))
    }
}

impl FromStr for EcdsaSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Encodable for EcdsaSignature {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::bytes(self.0.to_vec())
    }
}

impl Decodable for EcdsaSignature {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let bytes = item.as_bytes()?;
        EcdsaSignature::from_bytes(bytes).map_err(|_| RlpError::InvalidLength {
            expected: EcdsaSignature::LEN,
            actual: bytes.len(),
        })
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EcdsaSignature::from_hex(&s).map_err(de::Error::custom)
    }
}
