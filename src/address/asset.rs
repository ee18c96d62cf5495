//! Asset (owner) address

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{decode_bech32, encode_bech32, AddressError};
use crate::primitives::{NetworkId, H160};

/// How the payload of an asset address is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetAddressType {
    /// Payload is the lock script hash itself
    LockScriptHash = 0,
    /// Payload is a public key hash locked by the standard P2PKH script
    P2pkh = 1,
    /// Payload is a public key hash locked by the P2PKH-with-burn script
    P2pkhBurn = 2,
}

impl AssetAddressType {
    pub fn from_byte(byte: u8) -> Result<Self, AddressError> {
        match byte {
            0 => Ok(AssetAddressType::LockScriptHash),
            1 => Ok(AssetAddressType::P2pkh),
            2 => Ok(AssetAddressType::P2pkhBurn),
            other => Err(AddressError::UnknownType(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetAddress {
    pub network_id: NetworkId,
    pub address_type: AssetAddressType,
    pub payload: H160,
}

impl AssetAddress {
    pub fn from_lock_script_hash(network_id: NetworkId, lock_script_hash: H160) -> Self {
        Self {
            network_id,
            address_type: AssetAddressType::LockScriptHash,
            payload: lock_script_hash,
        }
    }

    pub fn from_p2pkh(network_id: NetworkId, public_key_hash: H160) -> Self {
        Self {
            network_id,
            address_type: AssetAddressType::P2pkh,
            payload: public_key_hash,
        }
    }

    pub fn from_p2pkh_burn(network_id: NetworkId, public_key_hash: H160) -> Self {
        Self {
            network_id,
            address_type: AssetAddressType::P2pkhBurn,
            payload: public_key_hash,
        }
    }

    pub fn encode(&self) -> Result<String, AddressError> {
        let mut data = Vec::with_capacity(21);
        data.push(self.address_type as u8);
        data.extend_from_slice(&self.payload.0);
        encode_bech32(&self.network_id, 'a', &data)
    }
}

impl fmt::Display for AssetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.encode().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for AssetAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (network_id, kind, data) = decode_bech32(s)?;
        if kind != 'a' {
            return Err(AddressError::InvalidPrefix(format!("{}{}", network_id, kind)));
        }
        let (type_byte, payload) = data
            .split_first()
            .ok_or(AddressError::InvalidPayloadLength(0))?;
        let address_type = AssetAddressType::from_byte(*type_byte)?;
        let payload = H160::from_slice(payload)
            .map_err(|_| AddressError::InvalidPayloadLength(payload.len()))?;
        Ok(Self {
            network_id,
            address_type,
            payload,
        })
    }
}

impl Serialize for AssetAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for AssetAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
