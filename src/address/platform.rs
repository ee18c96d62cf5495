//! Platform (account) address

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{decode_bech32, encode_bech32, AddressError};
use crate::crypto::PublicKey;
use crate::primitives::{NetworkId, H160};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// Account address: a network id and a 20-byte account id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformAddress {
    pub network_id: NetworkId,
    pub account_id: H160,
}

impl PlatformAddress {
    pub fn from_account_id(network_id: NetworkId, account_id: H160) -> Self {
        Self {
            network_id,
            account_id,
        }
    }

    pub fn from_public(network_id: NetworkId, public: &PublicKey) -> Self {
        Self::from_account_id(network_id, public.account_id())
    }

    /// Bech32 string form
    pub fn encode(&self) -> Result<String, AddressError> {
        encode_bech32(&self.network_id, 'c', &self.account_id.0)
    }

    /// Decode an RLP account id. The wire form has no network id, so the
    /// caller supplies the one of the enclosing transaction or action.
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        Ok(Self::from_account_id(network_id, H160::from_rlp(item)?))
    }
}

/// Only the account id goes on the wire
impl Encodable for PlatformAddress {
    fn to_rlp(&self) -> RlpItem {
        self.account_id.to_rlp()
    }
}

impl fmt::Display for PlatformAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.encode().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for PlatformAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (network_id, kind, payload) = decode_bech32(s)?;
        if kind != 'c' {
            return Err(AddressError::InvalidPrefix(format!("{}{}", network_id, kind)));
        }
        let account_id = H160::from_slice(&payload)
            .map_err(|_| AddressError::InvalidPayloadLength(payload.len()))?;
        Ok(Self::from_account_id(network_id, account_id))
    }
}

impl Serialize for PlatformAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for PlatformAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;

    fn tc() -> NetworkId {
        NetworkId::new("tc").unwrap()
    }

    #[test]
    fn test_string_roundtrip() {
        let address = PlatformAddress::from_account_id(tc(), H160([0xab; 20]));
        let s = address.to_string();
        assert!(s.starts_with("tcc1"));
        assert_eq!(s.parse::<PlatformAddress>().unwrap(), address);
    }

    #[test]
    fn test_from_public() {
        let public = PrivateKey::generate().public_key();
        let address = PlatformAddress::from_public(tc(), &public);
        assert_eq!(address.account_id, public.account_id());
    }

    #[test]
    fn test_asset_address_is_not_platform_address() {
        let asset = crate::address::AssetAddress::from_lock_script_hash(tc(), H160([1; 20]));
        assert!(matches!(
            asset.to_string().parse::<PlatformAddress>(),
            Err(AddressError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_rlp_carries_account_id_only() {
        let address = PlatformAddress::from_account_id(tc(), H160([0xab; 20]));
        assert_eq!(address.to_rlp(), H160([0xab; 20]).to_rlp());
        assert_eq!(PlatformAddress::from_rlp_on(&address.to_rlp(), tc()).unwrap(), address);

        let mainnet = PlatformAddress::from_rlp_on(&address.to_rlp(), NetworkId::MAINNET).unwrap();
        assert_eq!(mainnet.account_id, address.account_id);
        assert!(mainnet.to_string().starts_with("ccc1"));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            "not-an-address".parse::<PlatformAddress>(),
            Err(AddressError::InvalidBech32(_))
        ));
    }
}
