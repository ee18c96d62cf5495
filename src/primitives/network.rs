//! Network identifier

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::PrimitiveError;
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// Two-character network id such as `tc` (testnet) or `cc` (mainnet)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId([u8; 2]);

impl NetworkId {
    /// Public test network
    pub const TESTNET: NetworkId = NetworkId(*b"tc");
    /// Main network
    pub const MAINNET: NetworkId = NetworkId(*b"cc");

    pub fn new(id: &str) -> Result<Self, PrimitiveError> {
        let bytes = id.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_alphanumeric()) {
            return Err(PrimitiveError::InvalidNetworkId(id.to_string()));
        }
        Ok(NetworkId([bytes[0], bytes[1]]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are admitted by the constructors.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkId({})", self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Encodable for NetworkId {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::bytes(self.0.to_vec())
    }
}

impl Decodable for NetworkId {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let bytes = item.as_bytes()?;
        let s = std::str::from_utf8(bytes)
            .map_err(|_| RlpError::InvalidValue("network id is not UTF-8".to_string()))?;
        NetworkId::new(s).map_err(|e| RlpError::InvalidValue(e.to_string()))
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetworkId::new(&s).map_err(de::Error::custom)
    }
}
